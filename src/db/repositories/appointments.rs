use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::AppointmentStatus;
use crate::db::models::appointment::{Appointment, AppointmentChangeset, NewAppointment};

pub struct AppointmentsRepo;

impl AppointmentsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_appointment: &NewAppointment,
    ) -> Result<Appointment, diesel::result::Error> {
        diesel::insert_into(crate::schema::appointments::table)
            .values(new_appointment)
            .get_result(conn)
    }

    /// Scoped lookup: a row belonging to another team is invisible here,
    /// which is what collapses Forbidden into NotFound upstream.
    pub fn find_scoped(
        conn: &mut PgConnection,
        team: Uuid,
        appointment_id: Uuid,
    ) -> Result<Option<Appointment>, diesel::result::Error> {
        use crate::schema::appointments::dsl::*;
        appointments
            .filter(id.eq(appointment_id))
            .filter(team_id.eq(team))
            .select(Appointment::as_select())
            .first::<Appointment>(conn)
            .optional()
    }

    pub fn update_scoped(
        conn: &mut PgConnection,
        team: Uuid,
        appointment_id: Uuid,
        changes: &AppointmentChangeset,
    ) -> Result<Appointment, diesel::result::Error> {
        use crate::schema::appointments::dsl::*;
        diesel::update(
            appointments
                .filter(id.eq(appointment_id))
                .filter(team_id.eq(team)),
        )
        .set(changes)
        .get_result(conn)
    }

    pub fn delete_scoped(
        conn: &mut PgConnection,
        team: Uuid,
        appointment_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::appointments::dsl::*;
        diesel::delete(
            appointments
                .filter(id.eq(appointment_id))
                .filter(team_id.eq(team)),
        )
        .execute(conn)
    }

    /// Team-scoped listing ordered by date, then time of day.
    pub fn list_scoped(
        conn: &mut PgConnection,
        team: Uuid,
        from: Option<chrono::NaiveDate>,
        to: Option<chrono::NaiveDate>,
        status_filter: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, diesel::result::Error> {
        use crate::schema::appointments::dsl::*;

        let mut query = appointments
            .filter(team_id.eq(team))
            .select(Appointment::as_select())
            .into_boxed();

        if let Some(from_date) = from {
            query = query.filter(date.ge(from_date));
        }
        if let Some(to_date) = to {
            query = query.filter(date.le(to_date));
        }
        if let Some(wanted) = status_filter {
            query = query.filter(status.eq(wanted));
        }

        query.order((date.asc(), time.asc())).load(conn)
    }
}
