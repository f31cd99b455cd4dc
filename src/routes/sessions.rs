use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::{
    AppState, db,
    db::models::{ApiResponse, CreateSessionRequest, SessionResponse},
    error::AppError,
    services::SessionsService,
};

/// Exchanges a channel code for a session token. This is the only
/// authentication step; everything after runs against the server-held
/// session.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db::get_conn(&state.db)?;

    let session = SessionsService::open(&mut conn, &payload.channel_code, state.config.session_ttl())?;
    tracing::info!(team_id = %session.team_id, "Session opened");

    let response = ApiResponse::created(
        SessionResponse {
            token: session.id,
            team_id: session.team_id,
            expires_at: session.expires_at,
        },
        "Session created successfully",
    );
    Ok((StatusCode::CREATED, Json(response)))
}
