use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::AppointmentStatus;

// Appointment ("Termin") models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Appointment {
    pub id: Uuid,
    pub team_id: Uuid,
    pub customer_name: String,
    pub phone: String,
    pub date: chrono::NaiveDate,
    pub time: chrono::NaiveTime,
    pub note: Option<String>,
    pub reminder_minutes: i32,
    pub status: AppointmentStatus,
    pub created_by: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::appointments)]
pub struct NewAppointment {
    pub team_id: Uuid,
    pub customer_name: String,
    pub phone: String,
    pub date: chrono::NaiveDate,
    pub time: chrono::NaiveTime,
    pub note: Option<String>,
    pub reminder_minutes: i32,
    pub status: AppointmentStatus,
    pub created_by: String,
}

/// Partial update; `None` fields are left untouched. `updated_at` is always
/// refreshed so last-writer-wins stays observable to stream consumers.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::appointments)]
pub struct AppointmentChangeset {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub date: Option<chrono::NaiveDate>,
    pub time: Option<chrono::NaiveTime>,
    pub note: Option<String>,
    pub reminder_minutes: Option<i32>,
    pub status: Option<AppointmentStatus>,
    pub created_by: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// Appointment API DTOs
#[derive(Deserialize, Validate)]
pub struct CreateAppointmentRequest {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    pub phone: Option<String>,
    pub date: chrono::NaiveDate,
    pub time: chrono::NaiveTime,
    pub note: Option<String>,
    #[validate(range(min = 0, message = "Reminder lead time must be >= 0 minutes"))]
    pub reminder_minutes: Option<i32>,
    pub status: Option<String>,
    pub created_by: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateAppointmentRequest {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub date: Option<chrono::NaiveDate>,
    pub time: Option<chrono::NaiveTime>,
    pub note: Option<String>,
    pub reminder_minutes: Option<i32>,
    pub status: Option<String>,
    pub created_by: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct AppointmentFilter {
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
    pub status: Option<String>,
}
