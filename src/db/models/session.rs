use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A server-held login session. The row id doubles as the opaque bearer
/// token handed to the client; the bound `team_id` is never taken from
/// client input after login.
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Session {
    pub id: Uuid,
    pub team_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession {
    pub id: Uuid,
    pub team_id: Uuid,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

// Session API DTOs
#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub channel_code: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: Uuid,
    pub team_id: Uuid,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}
