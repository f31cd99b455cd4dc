use diesel::prelude::*;

use crate::db::models::team::{NewTeam, Team};

pub struct TeamsRepo;

impl TeamsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_team: &NewTeam,
    ) -> Result<Team, diesel::result::Error> {
        diesel::insert_into(crate::schema::teams::table)
            .values(new_team)
            .get_result(conn)
    }

    /// Exact, case-sensitive lookup; `channel_code` carries a unique index.
    pub fn find_by_code(
        conn: &mut PgConnection,
        code: &str,
    ) -> Result<Option<Team>, diesel::result::Error> {
        use crate::schema::teams::dsl::*;
        teams
            .filter(channel_code.eq(code))
            .select(Team::as_select())
            .first::<Team>(conn)
            .optional()
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        team_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::teams::dsl::*;
        diesel::delete(teams.filter(id.eq(team_id))).execute(conn)
    }
}
