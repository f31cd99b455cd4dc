use uuid::Uuid;

use crate::{
    db::models::notification::{
        CreateNotificationRequest, NewNotification, Notification, NotificationFilter,
    },
    db::repositories::{AppointmentsRepo, NotificationsRepo},
    error::AppError,
    services::context::RequestContext,
    validation::notification as rules,
};

pub struct NotificationsService;

impl NotificationsService {
    /// Creates a notification. A linked appointment must belong to the
    /// caller's team: the reference may go stale later (nulled on delete),
    /// but it can never point across the tenant boundary.
    pub fn create(
        conn: &mut diesel::PgConnection,
        ctx: &RequestContext,
        req: &CreateNotificationRequest,
    ) -> Result<Notification, AppError> {
        rules::validate_title(&req.title)?;
        rules::validate_message(&req.message)?;
        let notification_type = rules::parse_notification_type(req.notification_type.as_deref())?;

        if let Some(appointment_id) = req.appointment_id {
            if AppointmentsRepo::find_scoped(conn, ctx.team_id, appointment_id)?.is_none() {
                return Err(AppError::validation(
                    "Referenced appointment does not exist in this team",
                ));
            }
        }

        let new_notification = NewNotification {
            team_id: ctx.team_id,
            appointment_id: req.appointment_id,
            title: req.title.trim().to_string(),
            message: req.message.clone(),
            notification_type,
        };

        Ok(NotificationsRepo::insert(conn, &new_notification)?)
    }

    /// Idempotent: an already-read notification is returned unchanged and
    /// the `bool` tells the caller nothing was mutated (so nothing is
    /// published).
    pub fn mark_read(
        conn: &mut diesel::PgConnection,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<(Notification, bool), AppError> {
        let existing = NotificationsRepo::find_scoped(conn, ctx.team_id, notification_id)?
            .ok_or_else(|| AppError::not_found("Notification"))?;

        if existing.read {
            return Ok((existing, false));
        }

        let updated =
            NotificationsRepo::set_read(conn, ctx.team_id, notification_id).map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::not_found("Notification"),
                other => other.into(),
            })?;
        Ok((updated, true))
    }

    pub fn delete(
        conn: &mut diesel::PgConnection,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<(), AppError> {
        let deleted = NotificationsRepo::delete_scoped(conn, ctx.team_id, notification_id)?;
        if deleted == 0 {
            return Err(AppError::not_found("Notification"));
        }
        Ok(())
    }

    pub fn list(
        conn: &mut diesel::PgConnection,
        ctx: &RequestContext,
        filter: &NotificationFilter,
    ) -> Result<Vec<Notification>, AppError> {
        Ok(NotificationsRepo::list_scoped(
            conn,
            ctx.team_id,
            filter.read,
        )?)
    }
}
