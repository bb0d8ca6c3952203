//! AttendanceRecord and AttendanceStatus for a matchday's attendance list.

use crate::models::matchday::MatchdayId;
use crate::models::timestamp::parse_timestamp;
use crate::models::user::{UserId, UserSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of an attendance record on the remote API.
pub type AttendanceId = i64;

/// Name shown when neither the record nor its user carries one.
const NO_NAME: &str = "Sem nome";

/// Errors raised while ranking or editing an attendance list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AttendanceError {
    /// `timeConfirmed` could not be parsed as a timestamp.
    MalformedTimestamp { id: AttendanceId, value: String },
    /// Skill level outside 1..=5.
    InvalidLevel(u8),
    /// No record with this id in the matchday's list.
    AttendanceNotFound(AttendanceId),
    /// The matchday does not belong to the group being worked on.
    MatchdayNotFound(MatchdayId),
}

impl std::fmt::Display for AttendanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceError::MalformedTimestamp { id, value } => {
                write!(f, "Attendance {} has an invalid confirmation time: {:?}", id, value)
            }
            AttendanceError::InvalidLevel(level) => {
                write!(f, "Level must be between 1 and 5 (got {})", level)
            }
            AttendanceError::AttendanceNotFound(_) => write!(f, "Attendance record not found"),
            AttendanceError::MatchdayNotFound(_) => write!(f, "Matchday not found"),
        }
    }
}

impl std::error::Error for AttendanceError {}

/// Where a record sits once the list is ranked against the matchday capacity.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Confirmed and within capacity.
    Confirmed,
    /// Confirmed but beyond capacity (waitlist).
    Waiting,
    /// Not confirmed (gave up); never holds a seat.
    Canceled,
}

/// A player's confirmation or cancellation entry for a matchday.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub matchday_id: MatchdayId,
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<i64>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_email: Option<String>,
    /// Raw timestamp as sent by the API; parsed when ranking.
    pub time_confirmed: String,
    pub confirmed: bool,
    #[serde(default)]
    pub goalkeeper: bool,
    /// Skill level 1..=5 set by an admin.
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

impl AttendanceRecord {
    /// Create a record with no name, level or embedded user.
    pub fn new(
        id: AttendanceId,
        matchday_id: MatchdayId,
        user_id: UserId,
        time_confirmed: impl Into<String>,
        confirmed: bool,
    ) -> Self {
        Self {
            id,
            matchday_id,
            user_id,
            player_id: None,
            player_name: None,
            player_email: None,
            time_confirmed: time_confirmed.into(),
            confirmed,
            goalkeeper: false,
            level: None,
            user: None,
        }
    }

    /// Builder-style: set the player name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    /// Name to display: explicit player name, then the user's name, then a placeholder.
    pub fn display_name(&self) -> &str {
        self.player_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.user.as_ref().and_then(|u| u.name.as_deref()))
            .unwrap_or(NO_NAME)
    }

    /// Parsed `time_confirmed`, failing on anything that is not a timestamp.
    pub fn confirmed_at(&self) -> Result<DateTime<Utc>, AttendanceError> {
        parse_timestamp(&self.time_confirmed).ok_or_else(|| AttendanceError::MalformedTimestamp {
            id: self.id,
            value: self.time_confirmed.clone(),
        })
    }
}
