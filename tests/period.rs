//! Integration tests for dashboard period selection.

use chrono::{TimeZone, Utc};
use pelada::logic::{MonthOption, RECENT_WINDOW_DAYS};
use pelada::{available_months, default_month, filter_matchdays, Matchday, MonthKey, PeriodFilter};

fn matchday(id: i64, date: &str) -> Matchday {
    Matchday {
        id,
        organization_id: 1,
        date: date.to_string(),
        number_players: Some(14),
        players_teams: None,
        number_teams: None,
        dedicated_goal_keeper: false,
        location: None,
        list_released: None,
    }
}

fn ids(selected: &[&Matchday]) -> Vec<i64> {
    selected.iter().map(|m| m.id).collect()
}

#[test]
fn month_key_parses_and_prints() {
    let key: MonthKey = "2025-03".parse().unwrap();
    assert_eq!(key, MonthKey { year: 2025, month: 3 });
    assert_eq!(key.to_string(), "2025-03");
    assert_eq!(key.label(), "Março de 2025");
    assert!("2025-13".parse::<MonthKey>().is_err());
    assert!("march".parse::<MonthKey>().is_err());
    assert!(MonthKey::new(2025, 0).is_none());
}

#[test]
fn month_filter_uses_the_written_date() {
    let matchdays = vec![
        matchday(1, "2025-03-31T22:00:00Z"),
        matchday(2, "2025-04-01T09:00:00Z"),
        matchday(3, "2025-03-02T09:00:00"),
        matchday(4, "not a date"),
    ];
    let now = Utc.with_ymd_and_hms(2025, 4, 10, 12, 0, 0).unwrap();
    let march = MonthKey::new(2025, 3).unwrap();
    assert_eq!(
        ids(&filter_matchdays(&matchdays, PeriodFilter::Month(march), now)),
        vec![1, 3]
    );
}

#[test]
fn recent_filter_keeps_the_trailing_window_only() {
    let now = Utc.with_ymd_and_hms(2025, 4, 10, 12, 0, 0).unwrap();
    let inside = now - chrono::Duration::days(RECENT_WINDOW_DAYS - 1);
    let outside = now - chrono::Duration::days(RECENT_WINDOW_DAYS + 1);
    let future = now + chrono::Duration::days(1);
    let matchdays = vec![
        matchday(1, &inside.to_rfc3339()),
        matchday(2, &outside.to_rfc3339()),
        matchday(3, &future.to_rfc3339()),
        matchday(4, &now.to_rfc3339()),
    ];
    assert_eq!(
        ids(&filter_matchdays(&matchdays, PeriodFilter::Recent, now)),
        vec![1, 4]
    );
}

#[test]
fn available_months_are_distinct_and_newest_first() {
    let matchdays = vec![
        matchday(1, "2025-01-05T09:00:00Z"),
        matchday(2, "2025-03-02T09:00:00Z"),
        matchday(3, "2024-12-20T09:00:00Z"),
        matchday(4, "2025-03-09T09:00:00Z"),
    ];
    let keys: Vec<String> = available_months(&matchdays)
        .into_iter()
        .map(|m| m.key)
        .collect();
    assert_eq!(keys, vec!["2025-03", "2025-01", "2024-12"]);
}

#[test]
fn default_month_prefers_the_current_one() {
    let months = vec![
        MonthOption {
            key: "2025-03".to_string(),
            label: "Março de 2025".to_string(),
        },
        MonthOption {
            key: "2025-01".to_string(),
            label: "Janeiro de 2025".to_string(),
        },
    ];
    let in_january = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
    assert_eq!(default_month(&months, in_january), MonthKey::new(2025, 1));

    let in_june = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    assert_eq!(default_month(&months, in_june), MonthKey::new(2025, 3));

    assert_eq!(default_month(&[], in_june), None);
}
