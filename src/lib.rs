//! Pelada organizer: models, attendance ranking, dashboards, a client for the pelada REST API
//! and the JSON web server built on it.

pub mod client;
pub mod config;
pub mod logic;
pub mod models;
pub mod server;
pub mod session;

pub use client::{ApiClient, ApiError};
pub use config::Config;
pub use logic::{
    aggregate_performances, aggregate_player_totals, available_months, classify_attendance,
    default_month, filter_matchdays, top_assists, top_performers, top_scorers, validate_level,
    AttendanceBoard, MatchSheet, MatchdayStats, MonthKey, PeriodFilter, PlayerPerformance,
    PlayerTotals, RankedAttendance,
};
pub use models::{
    AttendanceError, AttendanceId, AttendanceRecord, AttendanceStatus, Group, GroupId, GroupMember,
    Matchday, MatchdayDraft, MatchdayId, User, UserId,
};
pub use session::{Session, SessionError, SessionSummary};
