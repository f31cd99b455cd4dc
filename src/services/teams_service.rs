use diesel::result::{DatabaseErrorKind, Error as DieselError};
use rand::Rng;
use rand::distributions::Alphanumeric;
use uuid::Uuid;

use crate::{
    db::models::api::error_codes,
    db::models::team::{NewTeam, Team},
    db::repositories::{SessionsRepo, TeamsRepo},
    error::AppError,
    services::context::RequestContext,
};

/// Attempts before giving up on finding a free channel code. Collisions are
/// vanishingly rare at the default code length; the cap only matters when an
/// operator configures a very short code.
const MAX_CODE_ATTEMPTS: u32 = 5;

pub struct TeamsService;

impl TeamsService {
    /// Random alphanumeric, case-sensitive. Uniqueness is enforced by the
    /// storage layer, not here.
    pub fn generate_channel_code(length: usize) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }

    /// Creates a tenant, regenerating the code on a unique-constraint
    /// collision up to `MAX_CODE_ATTEMPTS` times.
    pub fn create(conn: &mut diesel::PgConnection, code_length: usize) -> Result<Team, AppError> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let new_team = NewTeam {
                channel_code: Self::generate_channel_code(code_length),
            };

            match TeamsRepo::insert(conn, &new_team) {
                Ok(team) => return Ok(team),
                Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                    tracing::debug!(attempt, "Channel code collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::conflict_with_code(
            "Could not allocate a unique channel code",
            Some("channel_code".to_string()),
            error_codes::TEAM_CODE_EXISTS,
        ))
    }

    /// Exact-match lookup; possession of the code is the credential.
    pub fn resolve(conn: &mut diesel::PgConnection, channel_code: &str) -> Result<Team, AppError> {
        TeamsRepo::find_by_code(conn, channel_code)?
            .ok_or_else(|| AppError::not_found("Team"))
    }

    /// Tenant teardown. Appointments, notifications and sessions go with the
    /// team; returns the live session tokens so the caller can drop their
    /// cache entries.
    pub fn teardown(
        conn: &mut diesel::PgConnection,
        ctx: &RequestContext,
    ) -> Result<Vec<Uuid>, AppError> {
        let tokens = SessionsRepo::tokens_for_team(conn, ctx.team_id)?;

        let deleted = TeamsRepo::delete_by_id(conn, ctx.team_id)?;
        if deleted == 0 {
            return Err(AppError::not_found("Team"));
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::TeamsService;

    #[test]
    fn generated_codes_are_alphanumeric_with_requested_length() {
        let code = TeamsService::generate_channel_code(8);
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));

        let long = TeamsService::generate_channel_code(32);
        assert_eq!(long.len(), 32);
    }

    #[test]
    fn generated_codes_differ() {
        let a = TeamsService::generate_channel_code(16);
        let b = TeamsService::generate_channel_code(16);
        assert_ne!(a, b);
    }
}
