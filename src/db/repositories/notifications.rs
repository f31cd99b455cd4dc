use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::notification::{NewNotification, Notification};

pub struct NotificationsRepo;

impl NotificationsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_notification: &NewNotification,
    ) -> Result<Notification, diesel::result::Error> {
        diesel::insert_into(crate::schema::notifications::table)
            .values(new_notification)
            .get_result(conn)
    }

    pub fn find_scoped(
        conn: &mut PgConnection,
        team: Uuid,
        notification_id: Uuid,
    ) -> Result<Option<Notification>, diesel::result::Error> {
        use crate::schema::notifications::dsl::*;
        notifications
            .filter(id.eq(notification_id))
            .filter(team_id.eq(team))
            .select(Notification::as_select())
            .first::<Notification>(conn)
            .optional()
    }

    pub fn set_read(
        conn: &mut PgConnection,
        team: Uuid,
        notification_id: Uuid,
    ) -> Result<Notification, diesel::result::Error> {
        use crate::schema::notifications::dsl::*;
        diesel::update(
            notifications
                .filter(id.eq(notification_id))
                .filter(team_id.eq(team)),
        )
        .set(read.eq(true))
        .get_result(conn)
    }

    pub fn delete_scoped(
        conn: &mut PgConnection,
        team: Uuid,
        notification_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::notifications::dsl::*;
        diesel::delete(
            notifications
                .filter(id.eq(notification_id))
                .filter(team_id.eq(team)),
        )
        .execute(conn)
    }

    /// Most recent first.
    pub fn list_scoped(
        conn: &mut PgConnection,
        team: Uuid,
        read_filter: Option<bool>,
    ) -> Result<Vec<Notification>, diesel::result::Error> {
        use crate::schema::notifications::dsl::*;

        let mut query = notifications
            .filter(team_id.eq(team))
            .select(Notification::as_select())
            .into_boxed();

        if let Some(wanted) = read_filter {
            query = query.filter(read.eq(wanted));
        }

        query.order(created_at.desc()).load(conn)
    }

    /// Nulls the appointment reference on every notification pointing at the
    /// given row. The notifications themselves survive; returns the updated
    /// rows so callers can fan them out.
    pub fn clear_appointment_refs(
        conn: &mut PgConnection,
        team: Uuid,
        appointment: Uuid,
    ) -> Result<Vec<Notification>, diesel::result::Error> {
        use crate::schema::notifications::dsl::*;
        diesel::update(
            notifications
                .filter(team_id.eq(team))
                .filter(appointment_id.eq(appointment)),
        )
        .set(appointment_id.eq(None::<Uuid>))
        .get_results(conn)
    }
}
