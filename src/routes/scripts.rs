use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::common::AppState;
use crate::error::AppResult;
use crate::routes::extract::{CurrentUser, RenderMode};
use crate::routes::SnippetPayload;
use crate::store::logs::{self, LogFilter, SCRIPT_PAGE_SIZE};
use crate::store::scripts;
use crate::views::{self, SNIPPET_EXE};

const SCRIPTS_PATH: &str = "/scripts";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub script: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteScriptForm {
    #[serde(default)]
    pub name: String,
}

/// Script management page with the newest log messages.
pub async fn list(user: CurrentUser, State(state): State<AppState>, mode: RenderMode) -> AppResult<Response> {
    if mode == RenderMode::Partial {
        return exe_snippet(&state).await;
    }

    let script_list = scripts::list(&state.script_db).await?;
    let log_entries = logs::query(&state.log_db, &LogFilter::recent(Utc::now(), SCRIPT_PAGE_SIZE)).await?;
    let page = views::scripts::page(&state.translator, &user.username, &script_list, &log_entries);
    Ok(Html(page.into_string()).into_response())
}

/// Create a script or replace the one with the same name.
pub async fn save(
    user: CurrentUser,
    State(state): State<AppState>,
    mode: RenderMode,
    Form(form): Form<ScriptForm>,
) -> AppResult<Response> {
    scripts::upsert(&state.script_db, &form.name, &form.script).await?;
    tracing::debug!(user = %user.username, name = %form.name.trim(), "script_form_saved");
    refreshed(&state, mode).await
}

pub async fn delete(
    user: CurrentUser,
    State(state): State<AppState>,
    mode: RenderMode,
    Form(form): Form<DeleteScriptForm>,
) -> AppResult<Response> {
    scripts::delete(&state.script_db, &form.name).await?;
    tracing::debug!(user = %user.username, name = %form.name, "script_form_deleted");
    refreshed(&state, mode).await
}

async fn refreshed(state: &AppState, mode: RenderMode) -> AppResult<Response> {
    match mode {
        RenderMode::Partial => exe_snippet(state).await,
        RenderMode::Full => Ok(Redirect::to(SCRIPTS_PATH).into_response()),
    }
}

async fn exe_snippet(state: &AppState) -> AppResult<Response> {
    let script_list = scripts::list(&state.script_db).await?;
    let list = views::scripts::list(&state.translator, &script_list);
    Ok(Json(SnippetPayload::single(SNIPPET_EXE, list)).into_response())
}
