//! Signed-in sessions keyed by an opaque cookie token.

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use moka::future::Cache;
use std::time::Duration;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "dashboard_session";

#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Sessions expire after `ttl` without a request, which is the only sign-out
/// besides the explicit one.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let sessions = Cache::builder().time_to_idle(ttl).build();
        Self { sessions, ttl }
    }

    /// Start a session and return its token.
    pub async fn create(&self, username: &str) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions
            .insert(
                token.clone(),
                Session {
                    username: username.to_string(),
                    signed_in_at: Utc::now(),
                },
            )
            .await;
        tracing::debug!(username = %username, "session_created");
        token
    }

    pub async fn get(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).await
    }

    pub async fn destroy(&self, token: &str) {
        self.sessions.invalidate(token).await;
        tracing::debug!("session_destroyed");
    }

    /// `Set-Cookie` value carrying `token`.
    #[must_use]
    pub fn cookie(&self, token: &str) -> String {
        format!(
            "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.ttl.as_secs()
        )
    }
}

/// `Set-Cookie` value that removes the session cookie.
#[must_use]
pub fn expired_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// The session token from the request's `Cookie` headers, if any.
#[must_use]
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
