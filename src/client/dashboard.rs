//! Dashboard cards: next matchday, month filter, top scorers/assists, top performers.
//!
//! Per-matchday and per-match fetch failures are logged and skipped, so one bad
//! matchday does not blank the whole card.

use crate::client::{endpoints, ApiClient, ApiError};
use crate::logic::{
    aggregate_performances, aggregate_player_totals, available_months, default_month,
    filter_matchdays, top_assists, top_performers, top_scorers, MatchSheet, MatchdayStats,
    MonthOption, PeriodFilter, PlayerPerformance, PlayerTotals, TOP_N,
};
use crate::models::{
    GoalRecord, GroupId, MatchId, MatchRecord, Matchday, MatchdayId, Participation, PlayerStatLine,
};
use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;
use tokio::task::JoinSet;

/// Home screen header: next game and what the user can do with it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeCard {
    pub next_matchday: Option<Matchday>,
    pub has_teams: bool,
    pub is_group_admin: bool,
}

/// Months offered by the period filter, with the preselected one.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthsCard {
    pub months: Vec<MonthOption>,
    pub selected: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadersCard {
    pub matchdays_evaluated: usize,
    pub top_scorers: Vec<PlayerTotals>,
    pub top_assists: Vec<PlayerTotals>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformersCard {
    /// Finished matches whose sheets could be loaded.
    pub matches_evaluated: usize,
    pub top_performers: Vec<PlayerPerformance>,
}

impl ApiClient {
    pub async fn matchday_stats(
        &self,
        token: &str,
        matchday_id: MatchdayId,
    ) -> Result<Vec<PlayerStatLine>, ApiError> {
        let lines: Option<Vec<PlayerStatLine>> = self
            .get_json(Some(token), &endpoints::matchday_player_stats(matchday_id))
            .await?;
        Ok(lines.unwrap_or_default())
    }

    pub async fn matchday_matches(
        &self,
        token: &str,
        matchday_id: MatchdayId,
    ) -> Result<Vec<MatchRecord>, ApiError> {
        let matches: Option<Vec<MatchRecord>> = self
            .get_json(Some(token), &endpoints::matchday_matches(matchday_id))
            .await?;
        Ok(matches.unwrap_or_default())
    }

    pub async fn match_participations(
        &self,
        token: &str,
        match_id: MatchId,
    ) -> Result<Vec<Participation>, ApiError> {
        let rows: Option<Vec<Participation>> = self
            .get_json(Some(token), &endpoints::match_participations(match_id))
            .await?;
        Ok(rows.unwrap_or_default())
    }

    pub async fn match_goals(&self, token: &str, match_id: MatchId) -> Result<Vec<GoalRecord>, ApiError> {
        let rows: Option<Vec<GoalRecord>> = self
            .get_json(Some(token), &endpoints::match_goals(match_id))
            .await?;
        Ok(rows.unwrap_or_default())
    }

    /// Next matchday, whether it has teams, and whether the user administers the group.
    /// Secondary lookups that fail count as "no".
    pub async fn home(&self, token: &str, group_id: GroupId) -> Result<HomeCard, ApiError> {
        let next_matchday = self.next_matchday(token, group_id).await?;
        let has_teams = match &next_matchday {
            Some(m) => self.has_teams(token, m.id).await.unwrap_or_else(|e| {
                warn!("teams lookup for matchday {} failed: {}", m.id, e);
                false
            }),
            None => false,
        };
        let is_group_admin = match self.admin_groups(token).await {
            Ok(groups) => groups.iter().any(|g| g.id == group_id),
            Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized),
            Err(e) => {
                warn!("admin lookup for group {} failed: {}", group_id, e);
                false
            }
        };
        Ok(HomeCard {
            next_matchday,
            has_teams,
            is_group_admin,
        })
    }

    pub async fn dashboard_months(
        &self,
        token: &str,
        group_id: GroupId,
        now: DateTime<Utc>,
    ) -> Result<MonthsCard, ApiError> {
        let matchdays = self.list_matchdays(token, group_id).await?;
        let months = available_months(&matchdays);
        let selected = default_month(&months, now).map(|k| k.to_string());
        Ok(MonthsCard { months, selected })
    }

    /// Top scorers and assists over the matchdays selected by `filter`.
    /// Stat lines of the selected matchdays are fetched concurrently.
    pub async fn leaders(
        &self,
        token: &str,
        group_id: GroupId,
        filter: PeriodFilter,
        now: DateTime<Utc>,
    ) -> Result<LeadersCard, ApiError> {
        let matchdays = self.list_matchdays(token, group_id).await?;
        let selected = filter_matchdays(&matchdays, filter, now);

        let mut tasks = JoinSet::new();
        for (idx, matchday) in selected.iter().enumerate() {
            let client = self.clone();
            let token = token.to_string();
            let matchday_id = matchday.id;
            tasks.spawn(async move {
                let lines = client
                    .matchday_stats(&token, matchday_id)
                    .await
                    .unwrap_or_else(|e| {
                        warn!("stats for matchday {} failed: {}", matchday_id, e);
                        Vec::new()
                    });
                (idx, MatchdayStats { matchday_id, lines })
            });
        }

        let mut fetched = Vec::with_capacity(selected.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(entry) => fetched.push(entry),
                Err(e) => warn!("stats task failed: {}", e),
            }
        }
        fetched.sort_by_key(|(idx, _)| *idx);
        let stats: Vec<MatchdayStats> = fetched.into_iter().map(|(_, s)| s).collect();

        let totals = aggregate_player_totals(&stats);
        Ok(LeadersCard {
            matchdays_evaluated: selected.len(),
            top_scorers: top_scorers(&totals, TOP_N),
            top_assists: top_assists(&totals, TOP_N),
        })
    }

    /// Top performers over the finished matches of the matchdays selected by `filter`,
    /// walking matchdays newest first.
    pub async fn performers(
        &self,
        token: &str,
        group_id: GroupId,
        filter: PeriodFilter,
        now: DateTime<Utc>,
    ) -> Result<PerformersCard, ApiError> {
        let matchdays = self.list_matchdays(token, group_id).await?;
        let mut selected = filter_matchdays(&matchdays, filter, now);
        selected.sort_by(|a, b| b.starts_at().cmp(&a.starts_at()));

        let mut finished = Vec::new();
        for matchday in selected {
            match self.matchday_matches(token, matchday.id).await {
                Ok(matches) => finished.extend(matches.into_iter().filter(MatchRecord::is_finished)),
                Err(e) => warn!("matches for matchday {} failed: {}", matchday.id, e),
            }
        }

        let mut sheets = Vec::with_capacity(finished.len());
        for record in finished {
            let Some(match_id) = record.id else {
                continue;
            };
            match tokio::try_join!(
                self.match_participations(token, match_id),
                self.match_goals(token, match_id),
            ) {
                Ok((participations, goals)) => sheets.push(MatchSheet {
                    record,
                    participations,
                    goals,
                }),
                Err(e) => warn!("sheet for match {} failed: {}", match_id, e),
            }
        }

        let performances = aggregate_performances(&sheets);
        Ok(PerformersCard {
            matches_evaluated: sheets.len(),
            top_performers: top_performers(&performances, TOP_N),
        })
    }
}
