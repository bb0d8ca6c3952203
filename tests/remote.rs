//! API client against a local stand-in of the remote API: conditional GETs, the
//! mutate → invalidate → refetch → rank chain, group scoping and status mapping.

mod common;

use chrono::Utc;
use common::{Remote, FOREIGN_MATCHDAY_ID, GROUP_ID, MATCHDAY_ID, STALE_TOKEN, TOKEN};
use pelada::client::{AttendanceEdit, NewAttendance, SignInCredentials};
use pelada::{ApiError, AttendanceError, AttendanceStatus, MonthKey, PeriodFilter};

fn tag(version: u32) -> Option<String> {
    Some(format!("\"v{}\"", version))
}

#[actix_web::test]
async fn unchanged_list_is_revalidated_and_reused() {
    let (remote, api) = common::start(Remote::new());

    let first = api.attendance_board(TOKEN, GROUP_ID, MATCHDAY_ID).await.unwrap();
    let second = api.attendance_board(TOKEN, GROUP_ID, MATCHDAY_ID).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second.seated_count(), 2);
    assert_eq!(second.status_of(3), Some(AttendanceStatus::Waiting));
    assert_eq!(remote.lock().unwrap().list_revalidations, vec![None, tag(0)]);
}

#[actix_web::test]
async fn cancelling_a_seat_promotes_the_first_waiting_player() {
    let (remote, api) = common::start(Remote::new());
    let before = api.attendance_board(TOKEN, GROUP_ID, MATCHDAY_ID).await.unwrap();
    assert_eq!(before.status_of(3), Some(AttendanceStatus::Waiting));

    let after = api
        .set_confirmed(TOKEN, GROUP_ID, MATCHDAY_ID, 1, false)
        .await
        .unwrap();

    assert_eq!(after.status_of(1), Some(AttendanceStatus::Canceled));
    assert_eq!(after.status_of(3), Some(AttendanceStatus::Confirmed));
    assert_eq!(after.waiting_count(), 0);
    let remote = remote.lock().unwrap();
    assert!(!remote.records[0].confirmed);
    // Lookup revalidates; the reload after the write goes out unconditional.
    assert_eq!(remote.list_revalidations, vec![None, tag(0), None]);
}

#[actix_web::test]
async fn toggle_reads_the_current_value_from_the_server() {
    let (remote, api) = common::start(Remote::new());
    remote.lock().unwrap().records[1].confirmed = false;

    let board = api
        .toggle_confirmation(TOKEN, GROUP_ID, MATCHDAY_ID, 2)
        .await
        .unwrap();

    assert_eq!(board.status_of(2), Some(AttendanceStatus::Confirmed));
    assert_eq!(board.status_of(3), Some(AttendanceStatus::Waiting));
    assert!(remote.lock().unwrap().records[1].confirmed);
}

#[actix_web::test]
async fn added_player_joins_the_waiting_list() {
    let (remote, api) = common::start(Remote::new());
    api.attendance_board(TOKEN, GROUP_ID, MATCHDAY_ID).await.unwrap();

    let board = api
        .add_attendance(
            TOKEN,
            GROUP_ID,
            MATCHDAY_ID,
            &NewAttendance {
                user_id: 200,
                goalkeeper: true,
                confirmed: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(board.entries.len(), 4);
    assert_eq!(board.status_of(4), Some(AttendanceStatus::Waiting));
    assert_eq!(board.waiting_count(), 2);
    assert_eq!(remote.lock().unwrap().mutations, 1);
}

#[actix_web::test]
async fn level_change_is_reflected_in_the_new_list() {
    let (_remote, api) = common::start(Remote::new());

    let board = api.set_level(TOKEN, GROUP_ID, MATCHDAY_ID, 2, 4).await.unwrap();

    assert_eq!(board.find(2).and_then(|e| e.record.level), Some(4));
}

#[actix_web::test]
async fn unknown_record_is_rejected_before_any_write() {
    let (remote, api) = common::start(Remote::new());
    let edit = AttendanceEdit {
        player_name: "Nobody".to_string(),
        time_confirmed: "2025-03-01T09:00:00Z".to_string(),
    };

    let results = [
        api.set_level(TOKEN, GROUP_ID, MATCHDAY_ID, 999, 3).await,
        api.edit_attendance(TOKEN, GROUP_ID, MATCHDAY_ID, 999, &edit).await,
        api.toggle_confirmation(TOKEN, GROUP_ID, MATCHDAY_ID, 999).await,
        api.remove_attendance(TOKEN, GROUP_ID, MATCHDAY_ID, 999).await,
    ];

    for result in results {
        assert!(matches!(
            result,
            Err(ApiError::Attendance(AttendanceError::AttendanceNotFound(999)))
        ));
    }
    assert_eq!(remote.lock().unwrap().mutations, 0);
}

#[actix_web::test]
async fn matchday_of_another_group_is_not_found() {
    let (remote, api) = common::start(Remote::new());

    let board = api
        .attendance_board(TOKEN, GROUP_ID, FOREIGN_MATCHDAY_ID)
        .await;
    let toggled = api
        .toggle_confirmation(TOKEN, GROUP_ID, FOREIGN_MATCHDAY_ID, 1)
        .await;
    let added = api
        .add_attendance(
            TOKEN,
            GROUP_ID,
            FOREIGN_MATCHDAY_ID,
            &NewAttendance {
                user_id: 200,
                goalkeeper: false,
                confirmed: true,
            },
        )
        .await;

    for result in [board, toggled, added] {
        assert!(matches!(
            result,
            Err(ApiError::Attendance(AttendanceError::MatchdayNotFound(FOREIGN_MATCHDAY_ID)))
        ));
    }
    assert_eq!(remote.lock().unwrap().mutations, 0);
}

#[actix_web::test]
async fn rejected_token_is_unauthorized() {
    let (_remote, api) = common::start(Remote::new());

    assert!(matches!(api.profile("bad").await, Err(ApiError::Unauthorized)));
    assert!(matches!(
        api.attendance_board("bad", GROUP_ID, MATCHDAY_ID).await,
        Err(ApiError::Unauthorized)
    ));
}

#[actix_web::test]
async fn not_modified_without_cached_body_is_an_error() {
    let (_remote, api) = common::start(Remote::new());

    let result = api.profile(STALE_TOKEN).await;

    assert!(matches!(result, Err(ApiError::Status { status: 304, .. })));
}

#[actix_web::test]
async fn validate_token_tells_rejection_from_failure() {
    let (remote, api) = common::start(Remote::new());

    assert!(api.validate_token(TOKEN).await.unwrap());
    remote.lock().unwrap().revoked = true;
    assert!(!api.validate_token(TOKEN).await.unwrap());
}

#[actix_web::test]
async fn discarded_session_leaves_nothing_cached() {
    let (_remote, api) = common::start(Remote::new());
    let session = api
        .sign_in(&SignInCredentials {
            cpf: "12345678900".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    api.attendance_board(session.token(), GROUP_ID, MATCHDAY_ID)
        .await
        .unwrap();
    assert_eq!(api.cache().len(), 2);

    api.discard_session(&session);

    assert!(api.cache().is_empty());
}

#[actix_web::test]
async fn performers_count_only_matches_with_sheets() {
    let (_remote, api) = common::start(Remote::new());
    let march = MonthKey::new(2025, 3).unwrap();

    let card = api
        .performers(TOKEN, GROUP_ID, PeriodFilter::Month(march), Utc::now())
        .await
        .unwrap();

    assert_eq!(card.matches_evaluated, 1);
    assert_eq!(card.top_performers[0].user_name, "Ana");
}
