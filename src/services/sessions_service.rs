use uuid::Uuid;

use crate::{
    db::models::session::{NewSession, Session},
    db::repositories::SessionsRepo,
    error::AppError,
    services::context::RequestContext,
    services::teams_service::TeamsService,
};

pub struct SessionsService;

impl SessionsService {
    /// Exchanges a channel code for a session. An unknown code is a plain
    /// 401; there is no secondary secret.
    pub fn open(
        conn: &mut diesel::PgConnection,
        channel_code: &str,
        ttl: chrono::Duration,
    ) -> Result<Session, AppError> {
        if channel_code.trim().is_empty() {
            return Err(AppError::validation("Channel code is required"));
        }

        let team = match TeamsService::resolve(conn, channel_code) {
            Ok(team) => team,
            Err(AppError::NotFound { .. }) => return Err(AppError::auth("Invalid channel code")),
            Err(e) => return Err(e),
        };

        let new_session = NewSession {
            id: Uuid::new_v4(),
            team_id: team.id,
            expires_at: chrono::Utc::now() + ttl,
        };

        Ok(SessionsRepo::insert(conn, &new_session)?)
    }

    /// Resolves a bearer token to the session it was bound to at login.
    pub fn authenticate(
        conn: &mut diesel::PgConnection,
        token: Uuid,
    ) -> Result<Session, AppError> {
        SessionsRepo::find_valid(conn, token, chrono::Utc::now())?
            .ok_or_else(|| AppError::auth("Invalid or expired session"))
    }

    pub fn context_for(session: &Session) -> RequestContext {
        RequestContext {
            team_id: session.team_id,
            session_id: session.id,
        }
    }
}
