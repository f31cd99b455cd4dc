use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Team models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Team {
    pub id: Uuid,
    pub channel_code: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::teams)]
pub struct NewTeam {
    pub channel_code: String,
}

// Team API DTOs
#[derive(Serialize)]
pub struct TeamInfo {
    pub id: Uuid,
    pub channel_code: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Team> for TeamInfo {
    fn from(team: Team) -> Self {
        TeamInfo {
            id: team.id,
            channel_code: team.channel_code,
            created_at: team.created_at,
        }
    }
}
