use axum::{
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    AppState,
    cache::CachedSession,
    db,
    error::AppError,
    services::{RequestContext, SessionsService},
};

/// Binds the request to the team its session was opened for. The context is
/// the only source of tenant scope downstream; client-supplied team ids are
/// never read.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)
        .ok_or_else(|| AppError::auth("Missing authentication token"))?;
    let token =
        Uuid::parse_str(&token).map_err(|_| AppError::auth("Invalid session token"))?;

    let ctx = authenticate_token(&state, token).await?;
    request.extensions_mut().insert(ctx);

    Ok(next.run(request).await)
}

/// Token resolution shared by the HTTP middleware and the stream upgrade:
/// Redis first, Postgres on a miss. A cache outage degrades to the database
/// lookup, never to a rejection.
pub async fn authenticate_token(state: &AppState, token: Uuid) -> Result<RequestContext, AppError> {
    if let Some(cached) = state.session_cache.get(token).await {
        return Ok(RequestContext {
            team_id: cached.team_id,
            session_id: token,
        });
    }

    let mut conn = db::get_conn(&state.db)?;
    let session = SessionsService::authenticate(&mut conn, token)?;
    drop(conn);

    state
        .session_cache
        .put(
            token,
            &CachedSession {
                team_id: session.team_id,
                expires_at: session.expires_at,
            },
        )
        .await;

    Ok(SessionsService::context_for(&session))
}

fn bearer_token<B>(request: &Request<B>) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_str| {
            auth_str
                .strip_prefix("Bearer ")
                .map(|token| token.to_string())
        })
}
