//! Period selection for dashboards: a calendar month, or the trailing recent window.

use crate::models::Matchday;
use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Length of the "recent" window, in days.
pub const RECENT_WINDOW_DAYS: i64 = 35;

const MONTH_NAMES: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

/// A calendar month, written `YYYY-MM`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MonthKey {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Portuguese label, e.g. "Março de 2025".
    pub fn label(&self) -> String {
        let idx = usize::try_from(self.month.saturating_sub(1)).unwrap_or(0);
        let name = MONTH_NAMES.get(idx).copied().unwrap_or("?");
        format!("{} de {}", name, self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid month {:?} (expected YYYY-MM)", s);
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

/// Month entry offered in the dashboard filter.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MonthOption {
    pub key: String,
    pub label: String,
}

/// Which matchdays a dashboard card evaluates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PeriodFilter {
    /// Matchdays written in this month.
    Month(MonthKey),
    /// Matchdays within the last `RECENT_WINDOW_DAYS` days up to now.
    Recent,
}

/// Matchdays selected by the filter. Matchdays with unparsable dates are skipped.
pub fn filter_matchdays<'a>(
    matchdays: &'a [Matchday],
    filter: PeriodFilter,
    now: DateTime<Utc>,
) -> Vec<&'a Matchday> {
    match filter {
        PeriodFilter::Month(key) => matchdays
            .iter()
            .filter(|m| m.wall_clock().is_some_and(|d| MonthKey::of(&d) == key))
            .collect(),
        PeriodFilter::Recent => {
            let since = now - Duration::days(RECENT_WINDOW_DAYS);
            matchdays
                .iter()
                .filter(|m| m.starts_at().is_some_and(|d| d >= since && d <= now))
                .collect()
        }
    }
}

/// Distinct months that have matchdays, newest first.
pub fn available_months(matchdays: &[Matchday]) -> Vec<MonthOption> {
    let keys: BTreeSet<MonthKey> = matchdays
        .iter()
        .filter_map(|m| m.wall_clock())
        .map(|d| MonthKey::of(&d))
        .collect();
    keys.into_iter()
        .rev()
        .map(|k| MonthOption {
            key: k.to_string(),
            label: k.label(),
        })
        .collect()
}

/// Month preselected in the filter: the current month if it has matchdays, else the newest one.
pub fn default_month(months: &[MonthOption], now: DateTime<Utc>) -> Option<MonthKey> {
    let current = MonthKey::of(&now);
    if months.iter().any(|m| m.key == current.to_string()) {
        return Some(current);
    }
    months.first().and_then(|m| m.key.parse().ok())
}
