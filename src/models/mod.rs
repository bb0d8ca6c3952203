//! Data structures for the pelada organizer: attendance, matchdays, groups, users, stats.

mod attendance;
mod group;
mod matchday;
mod stats;
mod timestamp;
mod user;

pub use attendance::{AttendanceError, AttendanceId, AttendanceRecord, AttendanceStatus};
pub use group::{Group, GroupId, GroupMember};
pub use matchday::{Matchday, MatchdayDraft, MatchdayId};
pub use stats::{GoalRecord, MatchId, MatchRecord, Participation, PlayerStatLine, TeamRef};
pub use timestamp::{parse_timestamp, parse_wall_clock};
pub use user::{Collaborator, User, UserId, UserSummary};
