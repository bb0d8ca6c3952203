//! JSON web server over the pelada API: cookie sessions, admin checks and the app's endpoints.
//!
//! Mount with `App::new().wrap(session_middleware(..)).app_data(..).configure(configure)`;
//! handlers expect `Data<SessionStore>` and `Data<ApiClient>`.

mod handlers;
mod sessions;

pub use sessions::{SessionId, SessionStore};

use crate::client::ApiClient;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::web::ServiceConfig;
use std::time::{Duration, Instant};

/// Name of the signed session cookie.
pub const COOKIE_NAME: &str = "pelada";

/// Inactivity threshold: sessions not used for this long are dropped.
pub const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// Register every endpoint.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(handlers::api_health)
        .service(handlers::api_sign_in)
        .service(handlers::api_send_code)
        .service(handlers::api_verify_code)
        .service(handlers::api_google_url)
        .service(handlers::api_sign_out)
        .service(handlers::api_me)
        .service(handlers::api_profile)
        .service(handlers::api_update_profile)
        .service(handlers::api_groups)
        .service(handlers::api_create_group)
        .service(handlers::api_select_group)
        .service(handlers::api_clear_group)
        .service(handlers::api_members)
        .service(handlers::api_add_member)
        .service(handlers::api_remove_member)
        .service(handlers::api_set_admin)
        .service(handlers::api_remove_admin)
        .service(handlers::api_rename_group)
        .service(handlers::api_delete_group)
        .service(handlers::api_matchdays)
        .service(handlers::api_next_matchday)
        .service(handlers::api_create_matchday)
        .service(handlers::api_update_matchday)
        .service(handlers::api_delete_matchday)
        .service(handlers::api_attendance)
        .service(handlers::api_add_attendance)
        .service(handlers::api_edit_attendance)
        .service(handlers::api_toggle_attendance)
        .service(handlers::api_set_level)
        .service(handlers::api_remove_attendance)
        .service(handlers::api_dashboard_months)
        .service(handlers::api_dashboard_leaders)
        .service(handlers::api_dashboard_performers);
}

/// Signed cookie carrying the session id. `secure` restricts it to HTTPS.
pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(COOKIE_NAME.to_string())
        .cookie_secure(secure)
        .build()
}

/// Drop sessions idle for `timeout` together with their cached API responses.
/// Returns how many were dropped.
pub fn evict_idle_sessions(
    store: &SessionStore,
    api: &ApiClient,
    timeout: Duration,
    now: Instant,
) -> usize {
    let evicted = store.evict_idle(timeout, now);
    for session in &evicted {
        api.discard_session(session);
    }
    evicted.len()
}
