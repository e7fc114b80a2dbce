use chrono::Utc;
use sea_orm::FromQueryResult;
use uuid::Uuid;

use crate::domain::member::entities::{Member, MemberTeamRow, Team};
use crate::entity::{members, teams};

impl From<members::Model> for Member {
    fn from(model: members::Model) -> Self {
        Member {
            id: model.id,
            username: model.username,
            age: model.age,
            team_id: model.team_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<&members::Model> for Member {
    fn from(model: &members::Model) -> Self {
        Member {
            id: model.id,
            username: model.username.clone(),
            age: model.age,
            team_id: model.team_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<teams::Model> for Team {
    fn from(model: teams::Model) -> Self {
        Team {
            id: model.id,
            name: model.name,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// Raw row shape produced by the member/team search projection.
#[derive(Debug, FromQueryResult)]
pub struct MemberTeamQueryRow {
    pub member_id: Uuid,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<Uuid>,
    pub team_name: Option<String>,
}

impl From<MemberTeamQueryRow> for MemberTeamRow {
    fn from(row: MemberTeamQueryRow) -> Self {
        MemberTeamRow {
            member_id: row.member_id,
            username: row.username,
            age: row.age,
            team_id: row.team_id,
            team_name: row.team_name,
        }
    }
}
