//! In-memory ETag cache for GET responses, keyed by URL and token.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A cached body with the validator the server sent for it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CachedResponse {
    pub body: String,
    pub etag: Option<String>,
}

/// url -> token -> response. Bodies differ per user, so the token is part of the key.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, HashMap<String, CachedResponse>>>,
}

impl ResponseCache {
    fn entries(&self) -> MutexGuard<'_, HashMap<String, HashMap<String, CachedResponse>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn lookup(&self, url: &str, token: &str) -> Option<CachedResponse> {
        self.entries()
            .get(url)
            .and_then(|by_token| by_token.get(token))
            .cloned()
    }

    pub fn store(&self, url: &str, token: &str, body: String, etag: Option<String>) {
        self.entries()
            .entry(url.to_string())
            .or_default()
            .insert(token.to_string(), CachedResponse { body, etag });
    }

    /// Drop every cached copy of a URL (all tokens).
    pub fn invalidate(&self, url: &str) {
        self.entries().remove(url);
    }

    /// Drop everything cached for one token (on sign-out).
    pub fn forget_token(&self, token: &str) {
        let mut entries = self.entries();
        for by_token in entries.values_mut() {
            by_token.remove(token);
        }
        entries.retain(|_, by_token| !by_token.is_empty());
    }

    pub fn len(&self) -> usize {
        self.entries().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
