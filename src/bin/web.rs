//! Single binary web server: JSON endpoints for the pelada screens, backed by the remote pelada API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST, PORT, API_URL, API_TIMEOUT_MS, SESSION_SECRET, COOKIE_SECURE.

use actix_web::{cookie::Key, web::Data, App, HttpServer};
use pelada::server::{self, SessionStore, INACTIVITY_TIMEOUT};
use pelada::{ApiClient, Config};
use std::time::{Duration, Instant};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let api = ApiClient::new(&config)
        .map(Data::new)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let key = match config.session_secret.as_deref() {
        Some(secret) => Key::from(secret.as_bytes()),
        None => {
            log::warn!("SESSION_SECRET not set: sessions will not survive a restart");
            Key::generate()
        }
    };

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("Remote API at {}", config.api_url);
    if !config.cookie_secure {
        log::info!("Session cookie is not restricted to HTTPS (COOKIE_SECURE=false)");
    }

    let store = Data::new(SessionStore::default());

    // Background task: every 30 minutes, remove sessions inactive for 12+ hours
    let store_cleanup = store.clone();
    let api_cleanup = api.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let removed = server::evict_idle_sessions(
                &store_cleanup,
                &api_cleanup,
                INACTIVITY_TIMEOUT,
                Instant::now(),
            );
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s) (no activity for 12h)", removed);
            }
        }
    });

    let cookie_secure = config.cookie_secure;
    HttpServer::new(move || {
        App::new()
            .wrap(server::session_middleware(key.clone(), cookie_secure))
            .app_data(store.clone())
            .app_data(api.clone())
            .configure(server::configure)
    })
    .bind(bind)?
    .run()
    .await
}
