use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::AppError;

/// Tenant scope for one request. Built exclusively by the auth middleware
/// from a server-held session row; `team_id` never comes from client input.
/// Every store call takes this explicitly, so no query can forget its scope.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub team_id: Uuid,
    pub session_id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or_else(|| AppError::auth("Missing authentication context"))
    }
}
