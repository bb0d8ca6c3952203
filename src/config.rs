//! Runtime configuration from environment variables.
//!
//! HOST (default 0.0.0.0), PORT (8080), API_URL (http://localhost:3004),
//! API_TIMEOUT_MS (10000), SESSION_SECRET (random key per process when unset),
//! COOKIE_SECURE (false; set to true behind HTTPS).

use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:3004";
const DEFAULT_API_TIMEOUT_MS: u64 = 10_000;

/// Cookie signing keys need at least this many bytes.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the remote pelada API.
    pub api_url: String,
    pub api_timeout: Duration,
    pub session_secret: Option<String>,
    /// Only send the session cookie over HTTPS.
    pub cookie_secure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout: Duration::from_millis(DEFAULT_API_TIMEOUT_MS),
            session_secret: None,
            cookie_secure: false,
        }
    }
}

impl Config {
    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read from any key lookup. Unset, blank or unparsable values fall back to defaults;
    /// a session secret shorter than `MIN_SESSION_SECRET_LEN` is ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            api_url: get("API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            api_timeout: get("API_TIMEOUT_MS")
                .and_then(|t| t.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.api_timeout),
            session_secret: get("SESSION_SECRET").filter(|s| s.len() >= MIN_SESSION_SECRET_LEN),
            cookie_secure: get("COOKIE_SECURE")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.cookie_secure),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
