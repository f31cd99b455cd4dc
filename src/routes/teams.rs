use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::{
    AppState, db,
    db::models::{ApiResponse, TeamInfo},
    error::AppError,
    services::{RequestContext, TeamsService},
};

/// 创建团队。Public: the returned channel code IS the team's credential and
/// is shown exactly once here.
pub async fn create_team(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db::get_conn(&state.db)?;

    let team = TeamsService::create(&mut conn, state.config.channel_code_length)?;
    tracing::info!(team_id = %team.id, "Team created");

    let response = ApiResponse::created(TeamInfo::from(team), "Team created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Tenant teardown. Appointments, notifications and sessions cascade away;
/// cached tokens are dropped and the team's stream is closed with a final
/// team-deleted event.
pub async fn delete_team(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db::get_conn(&state.db)?;

    let tokens = TeamsService::teardown(&mut conn, &ctx)?;

    for token in tokens {
        state.session_cache.invalidate(token).await;
    }
    state.fanout.close_team(ctx.team_id).await;

    tracing::info!(team_id = %ctx.team_id, "Team deleted");
    let response = ApiResponse::<()>::ok("Team deleted successfully");
    Ok((StatusCode::OK, Json(response)))
}
