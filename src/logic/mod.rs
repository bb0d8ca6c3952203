//! Pelada business logic: attendance ranking, dashboard aggregations, period filters.

mod attendance;
mod leaders;
mod performers;
mod period;

pub use attendance::{classify_attendance, validate_level, AttendanceBoard, RankedAttendance};
pub use leaders::{aggregate_player_totals, top_assists, top_scorers, MatchdayStats, PlayerTotals};
pub use performers::{
    aggregate_performances, match_outcomes, top_performers, MatchOutcome, MatchSheet,
    PlayerPerformance,
};
pub use period::{
    available_months, default_month, filter_matchdays, MonthKey, MonthOption, PeriodFilter,
    RECENT_WINDOW_DAYS,
};

/// Dashboard cards show the top three players.
pub const TOP_N: usize = 3;

/// Name used for players the API returns without one.
pub const UNKNOWN_PLAYER: &str = "Jogador";
