//! Matchday: a single scheduled session with a player capacity.

use crate::models::group::GroupId;
use crate::models::timestamp::{parse_timestamp, parse_wall_clock};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a matchday on the remote API.
pub type MatchdayId = i64;

/// A scheduled game day of a group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matchday {
    pub id: MatchdayId,
    #[serde(default)]
    pub organization_id: GroupId,
    pub date: String,
    /// Seats on the list. Missing means no seats yet.
    #[serde(default)]
    pub number_players: Option<u32>,
    #[serde(default)]
    pub players_teams: Option<u32>,
    #[serde(default)]
    pub number_teams: Option<u32>,
    #[serde(default)]
    pub dedicated_goal_keeper: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub list_released: Option<bool>,
}

impl Matchday {
    /// Capacity used to rank the attendance list; 0 when the matchday has none set.
    pub fn capacity(&self) -> u32 {
        self.number_players.unwrap_or(0)
    }

    /// Start instant, if the date parses.
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date)
    }

    /// Date as written by the organizer (zone designator ignored).
    pub fn wall_clock(&self) -> Option<NaiveDateTime> {
        parse_wall_clock(&self.date)
    }
}

/// Fields an admin fills in to create or edit a matchday.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchdayDraft {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub number_players: u32,
    #[serde(default)]
    pub players_teams: u32,
    #[serde(default)]
    pub number_teams: u32,
    #[serde(default)]
    pub dedicated_goal_keeper: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub list_released: bool,
}

impl MatchdayDraft {
    /// Blank locations are sent as absent.
    pub fn normalized(mut self) -> Self {
        self.location = self
            .location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        self
    }
}
