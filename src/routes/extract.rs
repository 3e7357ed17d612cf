use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
    response::Redirect,
};
use std::convert::Infallible;

use crate::common::AppState;
use crate::services::session::token_from_headers;

pub const SIGN_IN_PATH: &str = "/sign/in";

/// The signed-in user. Extracting it from a request without a live session
/// redirects to the sign-in form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = token_from_headers(&parts.headers) else {
            return Err(Redirect::to(SIGN_IN_PATH));
        };

        match state.sessions.get(&token).await {
            Some(session) => Ok(Self {
                username: session.username,
            }),
            None => {
                tracing::debug!(path = %parts.uri.path(), "session_unknown_or_expired");
                Err(Redirect::to(SIGN_IN_PATH))
            }
        }
    }
}

/// Whether the caller wants a whole page or only the refreshed snippets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Full,
    /// `X-Requested-With: XMLHttpRequest`
    Partial,
}

impl RenderMode {
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let ajax = headers
            .get("x-requested-with")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));

        if ajax { Self::Partial } else { Self::Full }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RenderMode {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
