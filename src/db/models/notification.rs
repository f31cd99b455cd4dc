use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::NotificationType;

// Notification models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Notification {
    pub id: Uuid,
    pub team_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::notifications)]
pub struct NewNotification {
    pub team_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
}

// Notification API DTOs
#[derive(Deserialize, Validate)]
pub struct CreateNotificationRequest {
    #[validate(length(min = 1, message = "Notification title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Notification message is required"))]
    pub message: String,
    pub notification_type: Option<String>,
    pub appointment_id: Option<Uuid>,
}

/// PATCH body; the read flag is the only mutable field.
#[derive(Deserialize)]
pub struct UpdateNotificationRequest {
    pub read: Option<bool>,
}

#[derive(Deserialize, Default)]
pub struct NotificationFilter {
    pub read: Option<bool>,
}
