use diesel::Connection;
use uuid::Uuid;

use crate::{
    db::enums::{AppointmentStatus, NotificationType},
    db::models::appointment::{
        Appointment, AppointmentChangeset, AppointmentFilter, CreateAppointmentRequest,
        NewAppointment, UpdateAppointmentRequest,
    },
    db::models::notification::{NewNotification, Notification},
    db::repositories::{AppointmentsRepo, NotificationsRepo},
    error::AppError,
    services::context::RequestContext,
    validation::appointment as rules,
};

pub struct AppointmentsService;

impl AppointmentsService {
    /// Creates an appointment and, in the same transaction, the `new_termin`
    /// notification announcing it. `team_id` is stamped from the
    /// authenticated context, never from the request body.
    pub fn create(
        conn: &mut diesel::PgConnection,
        ctx: &RequestContext,
        req: &CreateAppointmentRequest,
    ) -> Result<(Appointment, Notification), AppError> {
        rules::validate_customer_name(&req.customer_name)?;
        rules::validate_reminder_minutes(req.reminder_minutes)?;
        let status = rules::parse_status(req.status.as_deref())?;
        let created_by = rules::normalize_created_by(req.created_by.as_deref());

        let team_id = ctx.team_id;

        let result = conn.transaction::<(Appointment, Notification), AppError, _>(|conn| {
            let new_appointment = NewAppointment {
                team_id,
                customer_name: req.customer_name.trim().to_string(),
                phone: req.phone.clone().unwrap_or_default(),
                date: req.date,
                time: req.time,
                note: req.note.clone(),
                reminder_minutes: req
                    .reminder_minutes
                    .unwrap_or(rules::DEFAULT_REMINDER_MINUTES),
                status,
                created_by,
            };

            let appointment = AppointmentsRepo::insert(conn, &new_appointment)?;

            let new_notification = NewNotification {
                team_id,
                appointment_id: Some(appointment.id),
                title: "Neuer Termin".to_string(),
                message: format!(
                    "{} am {} um {}",
                    appointment.customer_name,
                    appointment.date.format("%d.%m.%Y"),
                    appointment.time.format("%H:%M")
                ),
                notification_type: NotificationType::NewTermin,
            };

            let notification = NotificationsRepo::insert(conn, &new_notification)?;

            Ok((appointment, notification))
        })?;

        Ok(result)
    }

    /// Partial update with last-writer-wins semantics; `updated_at` is
    /// refreshed on every successful call.
    pub fn update(
        conn: &mut diesel::PgConnection,
        ctx: &RequestContext,
        appointment_id: Uuid,
        req: &UpdateAppointmentRequest,
    ) -> Result<Appointment, AppError> {
        rules::validate_update(req)?;

        let status = match req.status.as_deref() {
            Some(s) => Some(rules::parse_status_value(s)?),
            None => None,
        };

        if AppointmentsRepo::find_scoped(conn, ctx.team_id, appointment_id)?.is_none() {
            return Err(AppError::not_found("Appointment"));
        }

        let changes = AppointmentChangeset {
            customer_name: req.customer_name.as_ref().map(|s| s.trim().to_string()),
            phone: req.phone.clone(),
            date: req.date,
            time: req.time,
            note: req.note.clone(),
            reminder_minutes: req.reminder_minutes,
            status,
            created_by: req.created_by.clone(),
            updated_at: chrono::Utc::now(),
        };

        // The row can vanish between the check and the update; that is still
        // a plain 404 to the caller.
        AppointmentsRepo::update_scoped(conn, ctx.team_id, appointment_id, &changes).map_err(|e| {
            match e {
                diesel::result::Error::NotFound => AppError::not_found("Appointment"),
                other => other.into(),
            }
        })
    }

    /// Deletes an appointment, clearing (not deleting) any notification that
    /// references it, all in one transaction. Returns the cleared rows so
    /// they can be fanned out as updates.
    pub fn delete(
        conn: &mut diesel::PgConnection,
        ctx: &RequestContext,
        appointment_id: Uuid,
    ) -> Result<Vec<Notification>, AppError> {
        let team_id = ctx.team_id;

        conn.transaction::<Vec<Notification>, AppError, _>(|conn| {
            let cleared = NotificationsRepo::clear_appointment_refs(conn, team_id, appointment_id)?;

            let deleted = AppointmentsRepo::delete_scoped(conn, team_id, appointment_id)?;
            if deleted == 0 {
                return Err(AppError::not_found("Appointment"));
            }

            Ok(cleared)
        })
    }

    pub fn get(
        conn: &mut diesel::PgConnection,
        ctx: &RequestContext,
        appointment_id: Uuid,
    ) -> Result<Appointment, AppError> {
        AppointmentsRepo::find_scoped(conn, ctx.team_id, appointment_id)?
            .ok_or_else(|| AppError::not_found("Appointment"))
    }

    pub fn list(
        conn: &mut diesel::PgConnection,
        ctx: &RequestContext,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, AppError> {
        let status: Option<AppointmentStatus> = match filter.status.as_deref() {
            Some(s) => Some(rules::parse_status_value(s)?),
            None => None,
        };

        Ok(AppointmentsRepo::list_scoped(
            conn,
            ctx.team_id,
            filter.from,
            filter.to,
            status,
        )?)
    }
}
