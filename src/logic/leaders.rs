//! Top scorers and top assists over the stat lines of a set of matchdays.

use crate::logic::UNKNOWN_PLAYER;
use crate::models::{MatchdayId, PlayerStatLine, UserId};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Stat lines fetched for one matchday.
#[derive(Clone, Debug, Default)]
pub struct MatchdayStats {
    pub matchday_id: MatchdayId,
    pub lines: Vec<PlayerStatLine>,
}

/// A player's totals across the evaluated matchdays.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTotals {
    pub user_id: UserId,
    pub user_name: String,
    pub total_goals: u32,
    pub total_assists: u32,
    /// Distinct matchdays the player has a stat line in.
    pub matchday_count: usize,
}

/// Sum goals and assists per user. Lines without a user id are ignored.
/// Output keeps the order in which users first appear.
pub fn aggregate_player_totals(stats: &[MatchdayStats]) -> Vec<PlayerTotals> {
    let mut order: Vec<UserId> = Vec::new();
    let mut by_user: HashMap<UserId, (PlayerTotals, HashSet<MatchdayId>)> = HashMap::new();

    for day in stats {
        for line in &day.lines {
            let Some(user_id) = line.user_id else {
                continue;
            };
            let (totals, days) = by_user.entry(user_id).or_insert_with(|| {
                order.push(user_id);
                let name = line
                    .user_name
                    .as_deref()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(UNKNOWN_PLAYER);
                (
                    PlayerTotals {
                        user_id,
                        user_name: name.to_string(),
                        total_goals: 0,
                        total_assists: 0,
                        matchday_count: 0,
                    },
                    HashSet::new(),
                )
            });
            totals.total_goals += line.goals;
            totals.total_assists += line.assists;
            days.insert(day.matchday_id);
        }
    }

    order
        .into_iter()
        .filter_map(|id| by_user.remove(&id))
        .map(|(mut totals, days)| {
            totals.matchday_count = days.len();
            totals
        })
        .collect()
}

/// Players with at least one goal: goals desc, assists desc, name asc.
pub fn top_scorers(totals: &[PlayerTotals], limit: usize) -> Vec<PlayerTotals> {
    let mut leaders: Vec<_> = totals.iter().filter(|p| p.total_goals > 0).cloned().collect();
    leaders.sort_by(|a, b| {
        b.total_goals
            .cmp(&a.total_goals)
            .then(b.total_assists.cmp(&a.total_assists))
            .then_with(|| compare_names(&a.user_name, &b.user_name))
    });
    leaders.truncate(limit);
    leaders
}

/// Players with at least one assist: assists desc, goals desc, name asc.
pub fn top_assists(totals: &[PlayerTotals], limit: usize) -> Vec<PlayerTotals> {
    let mut leaders: Vec<_> = totals.iter().filter(|p| p.total_assists > 0).cloned().collect();
    leaders.sort_by(|a, b| {
        b.total_assists
            .cmp(&a.total_assists)
            .then(b.total_goals.cmp(&a.total_goals))
            .then_with(|| compare_names(&a.user_name, &b.user_name))
    });
    leaders.truncate(limit);
    leaders
}

/// Case-insensitive name order, falling back to the raw names.
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
