pub mod appointments;
pub mod notifications;
pub mod sessions;
pub mod teams;

use crate::AppState;
use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use std::sync::Arc;

/// Routes reachable without a session.
pub fn create_public_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/teams", post(teams::create_team))
        .route("/sessions", post(sessions::create_session))
        .with_state(state)
}

/// Session-scoped routes; main.rs layers the auth middleware on top, so
/// every handler here can rely on a `RequestContext` being present.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/appointments", get(appointments::get_appointments))
        .route("/appointments", post(appointments::create_appointment))
        .route(
            "/appointments/:appointment_id",
            get(appointments::get_appointment),
        )
        .route(
            "/appointments/:appointment_id",
            patch(appointments::update_appointment),
        )
        .route(
            "/appointments/:appointment_id",
            delete(appointments::delete_appointment),
        )
        .route("/notifications", get(notifications::get_notifications))
        .route("/notifications", post(notifications::create_notification))
        .route(
            "/notifications/:notification_id",
            patch(notifications::update_notification),
        )
        .route(
            "/notifications/:notification_id",
            delete(notifications::delete_notification),
        )
        .route("/team", delete(teams::delete_team))
        .with_state(state)
}
