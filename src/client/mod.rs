//! Async client for the remote pelada REST API.
//!
//! Each domain (auth, users, groups, matchdays, attendance, dashboard) adds its
//! calls as an `impl ApiClient` block in its own module. GET responses go through
//! an ETag cache; attendance mutations invalidate and refetch the list.

mod attendance;
mod auth;
mod cache;
mod dashboard;
pub mod endpoints;
mod groups;
mod matchdays;
mod users;

pub use attendance::{AttendanceEdit, NewAttendance};
pub use auth::SignInCredentials;
pub use cache::{CachedResponse, ResponseCache};
pub use dashboard::{HomeCard, LeadersCard, MonthsCard, PerformersCard};
pub use users::{ProfileUpdate, UserProfile};

use crate::config::Config;
use crate::models::AttendanceError;
use crate::session::SessionError;
use log::debug;
use reqwest::header::{ETAG, IF_NONE_MATCH};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Errors from calls to the remote API.
#[derive(Debug)]
pub enum ApiError {
    /// Connection, timeout or protocol failure.
    Transport(String),
    /// Non-2xx response other than 401.
    Status { status: u16, message: String },
    /// Body was not the expected JSON.
    Decode(String),
    /// Token missing, expired or rejected (401).
    Unauthorized,
    /// Refused locally: the group would be left without an admin.
    LastAdmin,
    /// Refused locally: a required field is blank.
    InvalidInput(&'static str),
    Attendance(AttendanceError),
    Session(SessionError),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "Request failed: {}", msg),
            ApiError::Status { status, message } => write!(f, "HTTP {}: {}", status, message),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            ApiError::Unauthorized => write!(f, "Session expired, sign in again"),
            ApiError::LastAdmin => write!(f, "A group must keep at least one admin"),
            ApiError::InvalidInput(field) => write!(f, "{} is required", field),
            ApiError::Attendance(e) => write!(f, "{}", e),
            ApiError::Session(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl From<AttendanceError> for ApiError {
    fn from(e: AttendanceError) -> Self {
        ApiError::Attendance(e)
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        ApiError::Session(e)
    }
}

/// Error body the API sends with non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Handle to the remote API. Cheap to clone; clones share the response cache.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    cache: Arc<ResponseCache>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.api_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: Arc::from(config.api_url.trim_end_matches('/')),
            cache: Arc::new(ResponseCache::default()),
        })
    }

    /// Absolute URL for an endpoint path (leading slash optional).
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let req = self.http.request(method, self.url(path));
        match token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// GET a body, revalidating a cached copy with `If-None-Match`.
    async fn get_text(&self, token: Option<&str>, path: &str) -> Result<String, ApiError> {
        let url = self.url(path);
        let cache_token = token.unwrap_or_default();
        let cached = self.cache.lookup(&url, cache_token);

        let mut req = self.request(Method::GET, path, token);
        if let Some(etag) = cached.as_ref().and_then(|c| c.etag.as_deref()) {
            req = req.header(IF_NONE_MATCH, etag);
        }
        let resp = req.send().await?;
        if resp.status() == StatusCode::NOT_MODIFIED {
            if let Some(entry) = cached {
                debug!("GET {} not modified, using cached body", url);
                return Ok(entry.body);
            }
            return Err(ApiError::Status {
                status: StatusCode::NOT_MODIFIED.as_u16(),
                message: "received 304 without a cached body".to_string(),
            });
        }

        let resp = check_status(resp).await?;
        let etag = resp
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let body = resp.text().await?;
        debug!("GET {} -> {} bytes", url, body.len());
        if etag.is_some() {
            self.cache.store(&url, cache_token, body.clone(), etag);
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
    ) -> Result<T, ApiError> {
        let body = self.get_text(token, path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET that may legitimately return nothing (`null`, empty body or empty list).
    async fn get_optional_json<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
    ) -> Result<Option<T>, ApiError> {
        let body = self.get_text(token, path).await?;
        decode_optional(&body)
    }

    /// Send a JSON body and decode the JSON reply.
    async fn send_json<B, T>(
        &self,
        method: Method,
        token: Option<&str>,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("{} {}", method, self.url(path));
        let resp = self.request(method, path, token).json(body).send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// Send a request whose reply body is ignored (DELETE may have none).
    async fn send_empty<B>(
        &self,
        method: Method,
        token: Option<&str>,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        debug!("{} {}", method, self.url(path));
        let mut req = self.request(method, path, token);
        if let Some(body) = body {
            req = req.json(body);
        }
        check_status(req.send().await?).await?;
        Ok(())
    }
}

/// Map 401 to `Unauthorized` and other failures to `Status` with the API's message.
async fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or(text);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Decode a body that may be empty, `null`, a single object, or a list whose first item is wanted.
pub fn decode_optional<T: DeserializeOwned>(body: &str) -> Result<Option<T>, ApiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value: serde_json::Value = serde_json::from_str(body)?;
    let value = match value {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Array(items) => match items.into_iter().next() {
            Some(first) => first,
            None => return Ok(None),
        },
        other => other,
    };
    Ok(Some(serde_json::from_value(value)?))
}
