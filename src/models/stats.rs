//! Per-matchday stat lines and the match sheets (matches, participations, goals) used by dashboards.

use crate::models::user::{UserId, UserSummary};
use serde::{Deserialize, Serialize};

/// Identifier of a match (one game within a matchday).
pub type MatchId = i64;

/// Goals and assists of one player on one matchday.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatLine {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
}

/// A match between two numbered teams.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    #[serde(default)]
    pub id: Option<MatchId>,
    #[serde(default)]
    pub team1: Option<i64>,
    #[serde(default)]
    pub team2: Option<i64>,
    #[serde(default)]
    pub score_team1: Option<u32>,
    #[serde(default)]
    pub score_team2: Option<u32>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl MatchRecord {
    /// Finished once it has an end time, or both scores are recorded.
    pub fn is_finished(&self) -> bool {
        self.end_time.is_some() || (self.score_team1.is_some() && self.score_team2.is_some())
    }
}

/// Team number a participation belongs to.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    #[serde(default)]
    pub team: Option<i64>,
}

/// A player's participation in a match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub team: Option<TeamRef>,
}

impl Participation {
    /// Embedded user id first, then the flat `userId`.
    pub fn resolved_user_id(&self) -> Option<UserId> {
        self.user.as_ref().and_then(|u| u.id).or(self.user_id)
    }

    pub fn resolved_name(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .filter(|n| !n.is_empty())
            .or(self.user_name.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or(crate::logic::UNKNOWN_PLAYER)
    }

    pub fn team_number(&self) -> Option<i64> {
        self.team.as_ref().and_then(|t| t.team)
    }
}

/// A goal, referencing scorer and assister by participation id.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    #[serde(default)]
    pub scorer_participation_id: Option<i64>,
    #[serde(default)]
    pub assist_participation_id: Option<i64>,
    #[serde(default)]
    pub is_own_goal: bool,
}
