use axum::{
    extract::{Form, Query, State},
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chrono::{Duration, Local, Utc};
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;

use crate::common::time::{format_local, FORM_FORMAT};
use crate::common::{AppState, TimeWindow};
use crate::error::{AppError, AppResult};
use crate::routes::extract::{CurrentUser, RenderMode};
use crate::routes::SnippetPayload;
use crate::services::series;
use crate::store::sensors;
use crate::views::{self, graph::GraphForm, SNIPPET_GRAPH};

use super::types::{GraphParams, GraphPayload, GraphRequest, GraphView};

/// Fetch and aggregate everything the graph section needs for `request`.
///
/// Unknown sensor ids are dropped; an unknown value name yields an empty graph.
pub async fn build_graph(db: &DatabaseConnection, request: &GraphRequest) -> AppResult<GraphView> {
    let sensors = sensors::sensors_by_ids(db, &request.sensor_ids).await?;
    let sensor_ids: Vec<i32> = sensors.iter().map(|s| s.id).collect();

    let (unit, readings) = match sensors::value_name(db, &request.value_name).await? {
        Some(value_name) => (
            sensors::unit_name(db, &value_name).await?,
            sensors::readings(db, &sensor_ids, value_name.id, &request.window).await?,
        ),
        None => {
            tracing::debug!(value = %request.value_name, "graph_unknown_value_name");
            (None, vec![])
        }
    };

    let series = series::align(&sensor_ids, &readings);
    let grouped = series::by_sensor(&readings);
    let stats = sensor_ids
        .iter()
        .map(|id| grouped.get(id).and_then(|r| series::stats(r, &request.window)))
        .collect();

    Ok(GraphView {
        value_type: request.value_name.clone(),
        unit,
        window: request.window,
        sensors,
        series,
        stats,
    })
}

/// Form values with the default window filled in where the request has none.
async fn graph_form(db: &DatabaseConnection, params: &GraphParams) -> AppResult<GraphForm> {
    let value = params.value.clone().unwrap_or_default();
    let options = if value.is_empty() {
        vec![]
    } else {
        sensors::sensor_options(db, &value).await?
    };

    let default_window = TimeWindow::ending_at(Utc::now(), Duration::hours(24));
    Ok(GraphForm {
        value,
        selected: params.sensor_ids(),
        date_from: params
            .date_from
            .clone()
            .unwrap_or_else(|| format_local(default_window.from, &Local, FORM_FORMAT)),
        date_to: params
            .date_to
            .clone()
            .unwrap_or_else(|| format_local(default_window.to, &Local, FORM_FORMAT)),
        options,
    })
}

/// Graph page
///
/// Draws the graph when all inputs are present, otherwise shows only the
/// form. An AJAX request gets the `Graph` snippet.
pub async fn default_view(
    user: CurrentUser,
    State(state): State<AppState>,
    mode: RenderMode,
    Query(query): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    let params = GraphParams::from_pairs(&query);
    let view = match params.resolve(&Local)? {
        Some(request) => Some(build_graph(&state.sensor_db, &request).await?),
        None => None,
    };

    let t = &state.translator;
    if mode == RenderMode::Partial {
        let section = views::graph::chart(t, view.as_ref());
        return Ok(Json(SnippetPayload::single(SNIPPET_GRAPH, section)).into_response());
    }

    let form = graph_form(&state.sensor_db, &params).await?;
    let page = views::graph::page(t, &user.username, &form, view.as_ref());
    Ok(Html(page.into_string()).into_response())
}

/// Update graph
///
/// AJAX callers receive the series payload with the refreshed `Graph`
/// snippet; other callers are redirected to the graph page. `format=csv`
/// downloads the aligned series instead.
#[utoipa::path(
    get,
    path = "/graph/update",
    params(
        ("sensors" = Vec<i32>, Query, description = "Sensor ids, repeated or comma separated"),
        ("value" = String, Query, description = "Value name, e.g. temperature"),
        ("date_from" = String, Query, description = "Window start, local time d.m.Y H:i"),
        ("date_to" = String, Query, description = "Window end (exclusive), local time d.m.Y H:i"),
        ("format" = Option<String>, Query, description = "csv for a CSV download"),
        ("X-Requested-With" = Option<String>, Header, description = "XMLHttpRequest for the JSON payload"),
    ),
    responses(
        (status = 200, description = "Graph payload", body = GraphPayload),
        (status = 303, description = "Redirect to the graph page (non-AJAX or missing inputs)"),
        (status = 400, description = "Invalid date or window"),
    ),
    tag = "graph"
)]
pub async fn update(
    _user: CurrentUser,
    State(state): State<AppState>,
    mode: RenderMode,
    Query(query): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    respond_update(&state, mode, GraphParams::from_pairs(&query)).await
}

/// Form submission of the graph form; form fields win over the query string.
pub async fn update_form(
    _user: CurrentUser,
    State(state): State<AppState>,
    mode: RenderMode,
    Query(query): Query<Vec<(String, String)>>,
    Form(form): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let params = GraphParams::from_pairs(&form).or(GraphParams::from_pairs(&query));
    respond_update(&state, mode, params).await
}

async fn respond_update(state: &AppState, mode: RenderMode, params: GraphParams) -> AppResult<Response> {
    let Some(request) = params.resolve(&Local)? else {
        tracing::debug!("graph_update_incomplete");
        return Ok(match mode {
            RenderMode::Partial => Json(SnippetPayload::default()).into_response(),
            RenderMode::Full => Redirect::to("/").into_response(),
        });
    };

    let view = build_graph(&state.sensor_db, &request).await?;
    tracing::info!(
        value = %request.value_name,
        sensors = view.sensors.len(),
        rows = view.series.len(),
        "graph_built"
    );

    if params.wants_csv() {
        return csv_response(&view);
    }

    match mode {
        RenderMode::Partial => {
            let section = views::graph::chart(&state.translator, Some(&view));
            let snippets = BTreeMap::from([(views::snippet_id(SNIPPET_GRAPH), section.into_string())]);
            Ok(Json(view.payload(snippets)).into_response())
        }
        RenderMode::Full => {
            Ok(Redirect::to(&format!("/graph?{}", params.to_query_string())).into_response())
        }
    }
}

fn csv_response(view: &GraphView) -> AppResult<Response> {
    let body = view.to_csv()?;
    let disposition = format!("attachment; filename=\"{}.csv\"", view.value_type.replace('"', ""));

    Response::builder()
        .header(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"))
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(axum::body::Body::from(body))
        .map_err(|e| AppError::Internal(e.to_string()))
}
