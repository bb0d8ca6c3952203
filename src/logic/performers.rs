//! Best players over finished matches: results first, then goals and assists.

use crate::logic::leaders::compare_names;
use crate::models::{GoalRecord, MatchRecord, Participation, UserId};
use serde::Serialize;
use std::collections::HashMap;

/// A finished match with everything needed to credit its players.
#[derive(Clone, Debug, Default)]
pub struct MatchSheet {
    pub record: MatchRecord,
    pub participations: Vec<Participation>,
    pub goals: Vec<GoalRecord>,
}

/// Result of a match for one team.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

/// A player's record across the evaluated matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPerformance {
    pub user_id: UserId,
    pub user_name: String,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals: u32,
    pub assists: u32,
    pub matches: u32,
}

impl PlayerPerformance {
    fn new(user_id: UserId, user_name: &str) -> Self {
        Self {
            user_id,
            user_name: user_name.to_string(),
            wins: 0,
            draws: 0,
            losses: 0,
            goals: 0,
            assists: 0,
            matches: 0,
        }
    }

    fn record(&mut self, outcome: MatchOutcome) {
        self.matches += 1;
        match outcome {
            MatchOutcome::Win => self.wins += 1,
            MatchOutcome::Draw => self.draws += 1,
            MatchOutcome::Loss => self.losses += 1,
        }
    }
}

/// Outcome per team number of a match. Missing scores count as 0.
pub fn match_outcomes(record: &MatchRecord) -> HashMap<i64, MatchOutcome> {
    let score_1 = record.score_team1.unwrap_or(0);
    let score_2 = record.score_team2.unwrap_or(0);
    let outcome = |ours: u32, theirs: u32| match ours.cmp(&theirs) {
        std::cmp::Ordering::Greater => MatchOutcome::Win,
        std::cmp::Ordering::Less => MatchOutcome::Loss,
        std::cmp::Ordering::Equal => MatchOutcome::Draw,
    };
    let mut outcomes = HashMap::new();
    if let Some(team) = record.team1 {
        outcomes.insert(team, outcome(score_1, score_2));
    }
    if let Some(team) = record.team2 {
        outcomes.insert(team, outcome(score_2, score_1));
    }
    outcomes
}

/// Credit results, goals and assists to the players of each sheet.
///
/// Sheets without participations are skipped. A participant whose team has no
/// known outcome is credited a draw. Own goals credit no scorer, but their
/// assist still counts. Output keeps first-appearance order.
pub fn aggregate_performances(sheets: &[MatchSheet]) -> Vec<PlayerPerformance> {
    let mut order: Vec<UserId> = Vec::new();
    let mut by_user: HashMap<UserId, PlayerPerformance> = HashMap::new();

    for sheet in sheets {
        if sheet.participations.is_empty() {
            continue;
        }
        let outcomes = match_outcomes(&sheet.record);

        // participation id -> (user, team)
        let mut by_participation: HashMap<i64, (UserId, Option<i64>)> = HashMap::new();
        for participation in &sheet.participations {
            let (Some(user_id), Some(participation_id)) =
                (participation.resolved_user_id(), participation.id)
            else {
                continue;
            };
            by_participation.insert(participation_id, (user_id, participation.team_number()));
            by_user.entry(user_id).or_insert_with(|| {
                order.push(user_id);
                PlayerPerformance::new(user_id, participation.resolved_name())
            });
        }

        for (user_id, team) in by_participation.values() {
            let outcome = team
                .and_then(|t| outcomes.get(&t).copied())
                .unwrap_or(MatchOutcome::Draw);
            if let Some(perf) = by_user.get_mut(user_id) {
                perf.record(outcome);
            }
        }

        for goal in &sheet.goals {
            let scorer = goal
                .scorer_participation_id
                .and_then(|id| by_participation.get(&id));
            if let (Some((user_id, _)), false) = (scorer, goal.is_own_goal) {
                if let Some(perf) = by_user.get_mut(user_id) {
                    perf.goals += 1;
                }
            }
            let assister = goal
                .assist_participation_id
                .and_then(|id| by_participation.get(&id));
            if let Some((user_id, _)) = assister {
                if let Some(perf) = by_user.get_mut(user_id) {
                    perf.assists += 1;
                }
            }
        }
    }

    order
        .into_iter()
        .filter_map(|id| by_user.remove(&id))
        .collect()
}

/// Players with at least one match: wins desc, draws desc, losses asc, goals desc, assists desc, name asc.
pub fn top_performers(performances: &[PlayerPerformance], limit: usize) -> Vec<PlayerPerformance> {
    let mut ranked: Vec<_> = performances.iter().filter(|p| p.matches > 0).cloned().collect();
    ranked.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(b.draws.cmp(&a.draws))
            .then(a.losses.cmp(&b.losses))
            .then(b.goals.cmp(&a.goals))
            .then(b.assists.cmp(&a.assists))
            .then_with(|| compare_names(&a.user_name, &b.user_name))
    });
    ranked.truncate(limit);
    ranked
}
