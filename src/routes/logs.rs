use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use serde::Deserialize;

use crate::common::time::parse_local;
use crate::common::{AppState, TimeWindow};
use crate::error::{AppError, AppResult};
use crate::routes::extract::{CurrentUser, RenderMode};
use crate::routes::SnippetPayload;
use crate::store::logs::{self, LogFilter, LogLevel, MAIN_PAGE_SIZE};
use crate::views::{self, SNIPPET_LOG_BROWSER};

/// Log browser filter as submitted. Absent or empty fields take the
/// defaults: warnings and above over the last 24 hours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LogParams {
    pub level: Option<String>,
    pub log_from: Option<String>,
    pub log_to: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl LogParams {
    /// Fields absent here are taken from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        let pick = |own: Option<String>, other: Option<String>| {
            if present(&own).is_some() { own } else { other }
        };
        Self {
            level: pick(self.level, fallback.level),
            log_from: pick(self.log_from, fallback.log_from),
            log_to: pick(self.log_to, fallback.log_to),
        }
    }

    /// Build the filter, reading dates in `tz`. A missing bound is derived
    /// from the other one (or from `now`) with a 24 hour span.
    pub fn resolve<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz, limit: u64) -> AppResult<LogFilter> {
        let min_level = match present(&self.level) {
            None => LogLevel::DEFAULT,
            Some(raw) => raw
                .parse::<i32>()
                .ok()
                .and_then(LogLevel::from_i32)
                .ok_or_else(|| AppError::InvalidLevel(raw.to_string()))?,
        };

        let parse = |field: &'static str, raw: &str| {
            parse_local(raw, tz).ok_or_else(|| AppError::InvalidDate {
                field,
                input: raw.to_string(),
            })
        };
        let from = present(&self.log_from).map(|raw| parse("log_from", raw)).transpose()?;
        let to = present(&self.log_to).map(|raw| parse("log_to", raw)).transpose()?;

        let day = Duration::hours(24);
        let window = match (from, to) {
            (Some(from), Some(to)) => TimeWindow::new(from, to),
            (Some(from), None) => TimeWindow::new(from, now),
            (None, Some(to)) => TimeWindow::ending_at(to, day),
            (None, None) => TimeWindow::ending_at(now, day),
        };
        if window.from >= window.to {
            return Err(AppError::EmptyWindow {
                from_field: "log_from",
                to_field: "log_to",
            });
        }

        Ok(LogFilter {
            min_level,
            window,
            limit,
        })
    }

    #[must_use]
    pub fn to_query_string(&self) -> String {
        [
            ("level", &self.level),
            ("log_from", &self.log_from),
            ("log_to", &self.log_to),
        ]
        .into_iter()
        .filter_map(|(name, value)| present(value).map(|v| format!("{name}={}", urlencoding::encode(v))))
        .collect::<Vec<_>>()
        .join("&")
    }
}

/// Log browser page; an AJAX request gets the `LogBrowser` snippet.
pub async fn browse(
    user: CurrentUser,
    State(state): State<AppState>,
    mode: RenderMode,
    Query(params): Query<LogParams>,
) -> AppResult<Response> {
    render(&state, &user, mode, &params).await
}

/// Filter form submission. Non-AJAX callers are redirected to the browser
/// with the filter in the query string.
pub async fn filter(
    user: CurrentUser,
    State(state): State<AppState>,
    mode: RenderMode,
    Query(query): Query<LogParams>,
    Form(form): Form<LogParams>,
) -> AppResult<Response> {
    let params = form.or(query);
    match mode {
        RenderMode::Partial => render(&state, &user, mode, &params).await,
        RenderMode::Full => {
            // Validate before redirecting so a bad date fails here.
            params.resolve(Utc::now(), &Local, MAIN_PAGE_SIZE)?;
            let query = params.to_query_string();
            let target = if query.is_empty() { "/logs".to_string() } else { format!("/logs?{query}") };
            Ok(Redirect::to(&target).into_response())
        }
    }
}

async fn render(state: &AppState, user: &CurrentUser, mode: RenderMode, params: &LogParams) -> AppResult<Response> {
    let filter = params.resolve(Utc::now(), &Local, MAIN_PAGE_SIZE)?;
    let entries = logs::query(&state.log_db, &filter).await?;
    let t = &state.translator;

    Ok(match mode {
        RenderMode::Partial => Json(SnippetPayload::single(
            SNIPPET_LOG_BROWSER,
            views::logs::entries(t, &entries),
        ))
        .into_response(),
        RenderMode::Full => Html(views::logs::page(t, &user.username, &filter, &entries).into_string()).into_response(),
    })
}
