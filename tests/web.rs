//! Web endpoints end to end: cookie sessions, admin checks and session teardown,
//! with the remote API served by the local stand-in.

mod common;

use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::{test, App};
use common::{Remote, FOREIGN_MATCHDAY_ID, GROUP_ID, MATCHDAY_ID, TOKEN};
use pelada::client::SignInCredentials;
use pelada::server::{self, SessionStore, INACTIVITY_TIMEOUT};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

fn credentials() -> Value {
    json!({ "cpf": "12345678900", "password": "secret" })
}

fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == server::COOKIE_NAME)
        .map(|c| c.into_owned())
        .expect("session cookie")
}

#[actix_web::test]
async fn members_cannot_use_admin_endpoints() {
    let (remote, api) = common::start(Remote {
        admin: false,
        ..Remote::new()
    });
    let store = Data::new(SessionStore::default());
    let app = test::init_service(
        App::new()
            .wrap(server::session_middleware(Key::generate(), false))
            .app_data(store.clone())
            .app_data(Data::new(api))
            .configure(server::configure),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(credentials())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);

    let requests = [
        test::TestRequest::post()
            .uri("/api/matchdays")
            .set_json(json!({ "date": "2025-03-15T09:00:00Z", "numberPlayers": 14 })),
        test::TestRequest::delete().uri("/api/groups/members/3"),
        test::TestRequest::put()
            .uri(&format!("/api/matchdays/{}/attendance/1/level", MATCHDAY_ID))
            .set_json(json!({ "level": 3 })),
        test::TestRequest::post().uri(&format!("/api/matchdays/{}/attendance/1/toggle", MATCHDAY_ID)),
        test::TestRequest::delete().uri(&format!("/api/matchdays/{}/attendance/1", MATCHDAY_ID)),
    ];
    for req in requests {
        let resp = test::call_service(&app, req.cookie(cookie.clone()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/matchdays/{}/attendance", MATCHDAY_ID))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(remote.lock().unwrap().mutations, 0);
}

#[actix_web::test]
async fn unknown_attendance_or_matchday_is_not_found() {
    let (remote, api) = common::start(Remote::new());
    let store = Data::new(SessionStore::default());
    let app = test::init_service(
        App::new()
            .wrap(server::session_middleware(Key::generate(), false))
            .app_data(store.clone())
            .app_data(Data::new(api))
            .configure(server::configure),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(credentials())
        .to_request();
    let cookie = session_cookie(&test::call_service(&app, req).await);

    let requests = [
        test::TestRequest::patch()
            .uri(&format!("/api/matchdays/{}/attendance/999", MATCHDAY_ID))
            .set_json(json!({ "playerName": "Nobody", "timeConfirmed": "2025-03-01T09:00:00Z" })),
        test::TestRequest::put()
            .uri(&format!("/api/matchdays/{}/attendance/999/level", MATCHDAY_ID))
            .set_json(json!({ "level": 3 })),
        test::TestRequest::delete().uri(&format!("/api/matchdays/{}/attendance/999", MATCHDAY_ID)),
        test::TestRequest::get().uri(&format!("/api/matchdays/{}/attendance", FOREIGN_MATCHDAY_ID)),
        test::TestRequest::post()
            .uri(&format!("/api/matchdays/{}/attendance/1/toggle", FOREIGN_MATCHDAY_ID)),
    ];
    for req in requests {
        let resp = test::call_service(&app, req.cookie(cookie.clone()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
    assert_eq!(remote.lock().unwrap().mutations, 0);
}

#[actix_web::test]
async fn rejected_token_ends_the_session_and_its_cache() {
    let (remote, api) = common::start(Remote::new());
    let store = Data::new(SessionStore::default());
    let app = test::init_service(
        App::new()
            .wrap(server::session_middleware(Key::generate(), false))
            .app_data(store.clone())
            .app_data(Data::new(api.clone()))
            .configure(server::configure),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(credentials())
        .to_request();
    let cookie = session_cookie(&test::call_service(&app, req).await);
    assert_eq!(store.len(), 1);
    assert!(!api.cache().is_empty());

    remote.lock().unwrap().revoked = true;
    let req = test::TestRequest::get()
        .uri("/api/matchdays")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(store.is_empty());
    assert!(api.cache().is_empty());

    let req = test::TestRequest::get().uri("/api/me").cookie(cookie).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn me_drops_a_session_whose_token_was_revoked() {
    let (remote, api) = common::start(Remote::new());
    let store = Data::new(SessionStore::default());
    let app = test::init_service(
        App::new()
            .wrap(server::session_middleware(Key::generate(), false))
            .app_data(store.clone())
            .app_data(Data::new(api.clone()))
            .configure(server::configure),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(credentials())
        .to_request();
    let cookie = session_cookie(&test::call_service(&app, req).await);

    let req = test::TestRequest::get().uri("/api/me").cookie(cookie.clone()).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["activeGroup"]["id"], json!(GROUP_ID));

    remote.lock().unwrap().revoked = true;
    let req = test::TestRequest::get().uri("/api/me").cookie(cookie).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    assert!(store.is_empty());
    assert!(api.cache().is_empty());
}

#[actix_web::test]
async fn clearing_the_group_returns_to_the_picker() {
    let (_remote, api) = common::start(Remote::new());
    let store = Data::new(SessionStore::default());
    let app = test::init_service(
        App::new()
            .wrap(server::session_middleware(Key::generate(), false))
            .app_data(store.clone())
            .app_data(Data::new(api))
            .configure(server::configure),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(credentials())
        .to_request();
    let cookie = session_cookie(&test::call_service(&app, req).await);

    let req = test::TestRequest::delete()
        .uri("/api/groups/select")
        .cookie(cookie.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["activeGroup"].is_null());

    let req = test::TestRequest::get().uri("/api/matchdays").cookie(cookie).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn signed_out_session_is_not_brought_back() {
    let (_remote, api) = common::start(Remote::new());
    let store = Data::new(SessionStore::default());
    let app = test::init_service(
        App::new()
            .wrap(server::session_middleware(Key::generate(), false))
            .app_data(store.clone())
            .app_data(Data::new(api))
            .configure(server::configure),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(credentials())
        .to_request();
    let cookie = session_cookie(&test::call_service(&app, req).await);

    let req = test::TestRequest::post()
        .uri("/api/auth/signout")
        .cookie(cookie.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // The old cookie still carries the session id.
    let req = test::TestRequest::post()
        .uri("/api/groups/select")
        .cookie(cookie)
        .set_json(json!({ "group_id": GROUP_ID }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    assert!(store.is_empty());
}

#[actix_web::test]
async fn idle_sessions_are_evicted_with_their_cache() {
    let (_remote, api) = common::start(Remote::new());
    let store = SessionStore::default();
    let session = api
        .sign_in(&SignInCredentials {
            cpf: "12345678900".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    store.open(session);
    assert!(!api.cache().is_empty());

    assert_eq!(
        server::evict_idle_sessions(&store, &api, INACTIVITY_TIMEOUT, Instant::now()),
        0
    );
    assert_eq!(store.len(), 1);

    let later = Instant::now() + INACTIVITY_TIMEOUT + Duration::from_secs(60);
    assert_eq!(server::evict_idle_sessions(&store, &api, INACTIVITY_TIMEOUT, later), 1);
    assert!(store.is_empty());
    assert!(api.cache().is_empty());
}

#[actix_web::test]
async fn ended_session_ignores_late_changes() {
    let (_remote, api) = common::start(Remote::new());
    let store = SessionStore::default();
    let session = api
        .sign_in(&SignInCredentials {
            cpf: "12345678900".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    let id = store.open(session);

    let groups = api.list_groups(TOKEN).await.unwrap();
    store.remove(&id);

    assert!(store.modify(&id, |s| s.set_groups(groups)).is_none());
    assert!(store.touch(&id).is_none());
    assert!(store.is_empty());
}
