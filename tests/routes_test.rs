//! Router tests driving the full axum stack with `oneshot`.
//!
//! Run with: cargo test --test routes_test

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
};
use serde_json::Value;
use tower::ServiceExt;

use common::{at, insert_log, insert_reading, seed_sensors, utc_at, TEMPERATURE};
use sensor_dashboard::common::AppState;
use sensor_dashboard::routes::build_router;
use sensor_dashboard::store::scripts;

const AJAX: (&str, &str) = ("x-requested-with", "XMLHttpRequest");
const FORM: &str = "application/x-www-form-urlencoded";

async fn send(state: &AppState, request: Request<Body>) -> Response {
    build_router(state.clone())
        .oneshot(request)
        .await
        .expect("router is infallible")
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).expect("json body")
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn ajax_get(uri: &str, cookie: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::COOKIE, cookie)
        .header(AJAX.0, AJAX.1)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, cookie: &str, body: &str, ajax: bool) -> Request<Body> {
    let mut builder = Request::post(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, FORM);
    if ajax {
        builder = builder.header(AJAX.0, AJAX.1);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn seeded_state() -> AppState {
    let state = common::test_state().await;
    seed_sensors(&state.sensor_db).await;
    insert_reading(&state.sensor_db, 1, TEMPERATURE, at(10, 0, 0), 10.0).await;
    insert_reading(&state.sensor_db, 2, TEMPERATURE, at(10, 0, 0), 2.0).await;
    insert_reading(&state.sensor_db, 1, TEMPERATURE, at(10, 0, 10), 20.0).await;
    insert_reading(&state.sensor_db, 1, TEMPERATURE, at(10, 0, 20), 10.0).await;
    state
}

#[tokio::test]
async fn health_needs_no_session() {
    let state = common::test_state().await;

    let response = send(&state, Request::get("/healthz").body(Body::empty()).unwrap()).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn dashboard_redirects_without_session() {
    let state = common::test_state().await;

    for uri in ["/", "/logs", "/graph", "/scripts"] {
        let response = send(&state, get(uri, "dashboard_session=forged")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/sign/in", "{uri}");
    }
}

#[tokio::test]
async fn sign_in_with_valid_credentials_opens_session() {
    let state = seeded_state().await;

    let response = send(&state, post_form("/sign/in", "", "username=admin&password=admin", false)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("session cookie")
        .to_string();
    assert!(set_cookie.contains("HttpOnly"));
    let cookie = set_cookie.split(';').next().unwrap().to_string();
    assert!(cookie.starts_with("dashboard_session="));

    let home = send(&state, get("/", &cookie)).await;
    assert_eq!(home.status(), StatusCode::OK);
    let html = body_text(home).await;
    assert!(html.contains("Current values"));
    assert!(html.contains("living room"));
    assert!(html.contains("/graph?sensors=1&amp;value=temperature"));
}

#[tokio::test]
async fn sign_in_failure_shows_form_error_without_hash() {
    let state = common::test_state().await;

    let response = send(&state, post_form("/sign/in", "", "username=admin&password=wrong", false)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let html = body_text(response).await;
    assert!(html.contains("Invalid username or password."));
    let wrong_hash = state.hasher.hash("wrong");
    assert!(!html.contains(&wrong_hash));
}

#[tokio::test]
async fn sign_in_requires_both_fields() {
    let state = common::test_state().await;

    let response = send(&state, post_form("/sign/in", "", "username=&password=", false)).await;

    let html = body_text(response).await;
    assert!(html.contains("Please enter your username."));
    assert!(html.contains("Please enter your password."));
}

#[tokio::test]
async fn sign_out_drops_session() {
    let state = common::test_state().await;
    let cookie = common::session_cookie(&state).await;

    let response = send(&state, get("/sign/out", &cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/sign/in");

    let after = send(&state, get("/", &cookie)).await;
    assert_eq!(after.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn graph_update_returns_payload_for_ajax() {
    let state = seeded_state().await;
    let cookie = common::session_cookie(&state).await;
    let uri = format!(
        "/graph/update?sensors=1,2&sensors=1&value=temperature&date_from={}&date_to={}",
        utc_at(9, 0, 0).timestamp(),
        utc_at(11, 0, 0).timestamp()
    );

    let response = send(&state, ajax_get(&uri, &cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = body_json(response).await;
    assert_eq!(payload["unit"], "°C");
    assert_eq!(payload["value_type"], "temperature");
    assert_eq!(payload["firstrow"], serde_json::json!(["living room", "bedroom"]));
    assert_eq!(payload["values"].as_array().map(Vec::len), Some(3));
    assert_eq!(payload["values"][0][2], 2.0);
    assert_eq!(payload["values"][1][2], Value::Null);
    assert!((payload["stats"][0]["average"].as_f64().unwrap() - 15.0).abs() < 1e-9);
    assert_eq!(payload["stats"][1]["average"], Value::Null);
    let snippet = payload["snippets"]["snippet--Graph"].as_str().expect("graph snippet");
    assert!(snippet.contains("graph-data"));
}

#[tokio::test]
async fn graph_update_form_fields_override_query() {
    let state = seeded_state().await;
    let cookie = common::session_cookie(&state).await;
    let body = format!(
        "sensors=2&value=temperature&date_from={}&date_to={}",
        utc_at(9, 0, 0).timestamp(),
        utc_at(11, 0, 0).timestamp()
    );

    let response = send(&state, post_form("/graph/update?sensors=1", &cookie, &body, true)).await;

    let payload = body_json(response).await;
    assert_eq!(payload["firstrow"], serde_json::json!(["bedroom"]));
}

#[tokio::test]
async fn graph_update_without_ajax_redirects_to_graph_page() {
    let state = seeded_state().await;
    let cookie = common::session_cookie(&state).await;
    let uri = format!(
        "/graph/update?sensors=1&value=temperature&date_from={}&date_to={}",
        utc_at(9, 0, 0).timestamp(),
        utc_at(11, 0, 0).timestamp()
    );

    let response = send(&state, get(&uri, &cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/graph?sensors=1&value=temperature"));

    let page = send(&state, get(location(&response), &cookie)).await;
    assert_eq!(page.status(), StatusCode::OK);
    let html = body_text(page).await;
    assert!(html.contains("snippet--Graph"));
    assert!(html.contains("living room"));
}

#[tokio::test]
async fn graph_update_with_missing_input_is_noop() {
    let state = seeded_state().await;
    let cookie = common::session_cookie(&state).await;

    let response = send(&state, get("/graph/update?sensors=1&value=temperature", &cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let ajax = send(&state, ajax_get("/graph/update?value=temperature", &cookie)).await;
    assert_eq!(ajax.status(), StatusCode::OK);
    assert_eq!(body_json(ajax).await, serde_json::json!({ "snippets": {} }));
}

#[tokio::test]
async fn graph_update_rejects_inverted_window() {
    let state = seeded_state().await;
    let cookie = common::session_cookie(&state).await;
    let uri = format!(
        "/graph/update?sensors=1&value=temperature&date_from={}&date_to={}",
        utc_at(11, 0, 0).timestamp(),
        utc_at(9, 0, 0).timestamp()
    );

    let response = send(&state, ajax_get(&uri, &cookie)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "empty_window");
    assert_eq!(body["error"], "date_from must be before date_to");
}

#[tokio::test]
async fn graph_update_names_unreadable_date() {
    let state = seeded_state().await;
    let cookie = common::session_cookie(&state).await;

    let response = send(
        &state,
        ajax_get("/graph/update?sensors=1&value=temperature&date_from=soon&date_to=0", &cookie),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "invalid_date");
    assert_eq!(body["error"], "invalid date_from 'soon'");
}

#[tokio::test]
async fn graph_update_exports_csv() {
    let state = seeded_state().await;
    let cookie = common::session_cookie(&state).await;
    let uri = format!(
        "/graph/update?sensors=1,2&value=temperature&date_from={}&date_to={}&format=csv",
        utc_at(9, 0, 0).timestamp(),
        utc_at(11, 0, 0).timestamp()
    );

    let response = send(&state, get(&uri, &cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    let csv = body_text(response).await;
    assert!(csv.starts_with("timestamp,living room,bedroom\n"));
}

#[tokio::test]
async fn script_forms_refresh_exe_snippet() {
    let state = common::test_state().await;
    let cookie = common::session_cookie(&state).await;

    let saved = send(&state, post_form("/scripts", &cookie, "name=lights&script=on%28%29", true)).await;
    assert_eq!(saved.status(), StatusCode::OK);
    let payload = body_json(saved).await;
    let snippet = payload["snippets"]["snippet--Exe"].as_str().expect("exe snippet");
    assert!(snippet.contains("lights"));
    assert!(snippet.contains("on()"));

    let deleted = send(&state, post_form("/scripts/delete", &cookie, "name=lights", false)).await;
    assert_eq!(deleted.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&deleted), "/scripts");
    assert!(scripts::list(&state.script_db).await.unwrap().is_empty());
}

#[tokio::test]
async fn script_form_rejects_empty_content() {
    let state = common::test_state().await;
    let cookie = common::session_cookie(&state).await;

    let response = send(&state, post_form("/scripts", &cookie, "name=lights&script=", true)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "missing_field");
}

#[tokio::test]
async fn log_filter_refreshes_log_browser() {
    let state = common::test_state().await;
    let cookie = common::session_cookie(&state).await;
    insert_log(&state.log_db, utc_at(10, 0, 0), 2, "routine").await;
    insert_log(&state.log_db, utc_at(10, 1, 0), 5, "meltdown").await;
    let body = format!(
        "level=3&log_from={}&log_to={}",
        utc_at(9, 0, 0).timestamp(),
        utc_at(11, 0, 0).timestamp()
    );

    let response = send(&state, post_form("/logs", &cookie, &body, true)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = body_json(response).await;
    let snippet = payload["snippets"]["snippet--LogBrowser"].as_str().expect("log snippet");
    assert!(snippet.contains("meltdown"));
    assert!(!snippet.contains("routine"));

    let redirect = send(&state, post_form("/logs", &cookie, &body, false)).await;
    assert_eq!(redirect.status(), StatusCode::SEE_OTHER);
    assert!(location(&redirect).starts_with("/logs?level=3&log_from="));
}

#[tokio::test]
async fn static_script_is_served() {
    let state = common::test_state().await;

    let response = send(&state, Request::get("/static/dashboard.js").body(Body::empty()).unwrap()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("XMLHttpRequest"));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let state = common::test_state().await;

    let response = send(&state, get("/nowhere", "")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "not_found");
}
