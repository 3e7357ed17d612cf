use axum::{
    extract::{Form, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::common::AppState;
use crate::routes::extract::SIGN_IN_PATH;
use crate::services::session::{expired_cookie, token_from_headers};
use crate::views;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Why a sign-in attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInError {
    MissingUsername,
    MissingPassword,
    InvalidCredentials,
}

impl SignInError {
    /// Form error shown to the user, also the translation key.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingUsername => "Please enter your username.",
            Self::MissingPassword => "Please enter your password.",
            Self::InvalidCredentials => "Invalid username or password.",
        }
    }
}

/// Check the form against the authenticator and open a session.
///
/// Returns the session token, or every reason the form was refused. The
/// derived password hash never leaves this function.
pub async fn attempt_sign_in(state: &AppState, form: &SignInForm) -> Result<String, Vec<SignInError>> {
    let username = form.username.trim();

    let mut missing = Vec::new();
    if username.is_empty() {
        missing.push(SignInError::MissingUsername);
    }
    if form.password.is_empty() {
        missing.push(SignInError::MissingPassword);
    }
    if !missing.is_empty() {
        return Err(missing);
    }

    let password_hash = state.hasher.hash(&form.password);
    if !state.authenticator.authenticate(username, &password_hash) {
        tracing::warn!(username = %username, "sign_in_failed");
        return Err(vec![SignInError::InvalidCredentials]);
    }

    tracing::info!(username = %username, "sign_in_succeeded");
    Ok(state.sessions.create(username).await)
}

/// Sign-in form; callers with a live session go straight to the dashboard.
pub async fn form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = token_from_headers(&headers) {
        if state.sessions.get(&token).await.is_some() {
            return Redirect::to("/").into_response();
        }
    }
    Html(views::sign::page(&state.translator, &[], "").into_string()).into_response()
}

pub async fn submit(State(state): State<AppState>, Form(form): Form<SignInForm>) -> Response {
    match attempt_sign_in(&state, &form).await {
        Ok(token) => (
            [(header::SET_COOKIE, state.sessions.cookie(&token))],
            Redirect::to("/"),
        )
            .into_response(),
        Err(errors) => {
            let messages: Vec<&str> = errors.iter().map(|e| e.message()).collect();
            Html(views::sign::page(&state.translator, &messages, form.username.trim()).into_string())
                .into_response()
        }
    }
}

pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = token_from_headers(&headers) {
        state.sessions.destroy(&token).await;
    }
    ([(header::SET_COOKIE, expired_cookie())], Redirect::to(SIGN_IN_PATH)).into_response()
}
