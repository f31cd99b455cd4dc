use diesel::prelude::*;

use crate::db::models::session::{NewSession, Session};

pub struct SessionsRepo;

impl SessionsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_session: &NewSession,
    ) -> Result<Session, diesel::result::Error> {
        diesel::insert_into(crate::schema::sessions::table)
            .values(new_session)
            .get_result(conn)
    }

    /// Looks up a session by token, excluding expired rows.
    pub fn find_valid(
        conn: &mut PgConnection,
        token: uuid::Uuid,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<Session>, diesel::result::Error> {
        use crate::schema::sessions::dsl::*;
        sessions
            .filter(id.eq(token))
            .filter(expires_at.gt(now))
            .select(Session::as_select())
            .first::<Session>(conn)
            .optional()
    }

    pub fn tokens_for_team(
        conn: &mut PgConnection,
        team: uuid::Uuid,
    ) -> Result<Vec<uuid::Uuid>, diesel::result::Error> {
        use crate::schema::sessions::dsl::*;
        sessions.filter(team_id.eq(team)).select(id).load(conn)
    }

    pub fn delete_expired(
        conn: &mut PgConnection,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::sessions::dsl::*;
        diesel::delete(sessions.filter(expires_at.le(now))).execute(conn)
    }
}
