pub mod assets;
pub mod extract;
pub mod graph;
pub mod health;
pub mod home;
pub mod logs;
pub mod scripts;
pub mod sign;

use axum::{
    routing::{get, post},
    Router,
};
use maud::Markup;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{compression::CompressionLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::error::AppError;
use crate::services::rate_limit::ClientIpKeyExtractor;
use crate::views::{self, assets::DASHBOARD_JS_PATH};

/// Body of an AJAX response that only refreshes page sections: snippet
/// container id mapped to its new inner HTML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct SnippetPayload {
    pub snippets: BTreeMap<String, String>,
}

impl SnippetPayload {
    #[must_use]
    pub fn single(name: &str, content: Markup) -> Self {
        Self {
            snippets: BTreeMap::from([(views::snippet_id(name), content.into_string())]),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health::healthz, graph::update),
    components(schemas(graph::GraphPayload, graph::SensorStat, SnippetPayload)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "graph", description = "Graph data for the dashboard"),
    ),
    info(
        title = "Sensor Dashboard",
        description = "Current values, graphs, logs and scripts of the sensor system",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    let sign_in_submit = post(sign::submit);
    let sign_in_submit = if config.disable_rate_limiting {
        tracing::warn!("Rate limiting DISABLED");
        sign_in_submit
    } else {
        tracing::info!(
            sign_in_rate = %format!("{}/s burst {}", config.rate_limit_signin_per_second, config.rate_limit_signin_burst),
            "Rate limiting configured"
        );

        let sign_in_limiter = GovernorConfigBuilder::default()
            .key_extractor(ClientIpKeyExtractor)
            .per_second(config.rate_limit_signin_per_second)
            .burst_size(config.rate_limit_signin_burst)
            .finish()
            .expect("Failed to create sign-in rate limiter");

        sign_in_submit.layer(GovernorLayer {
            config: Arc::new(sign_in_limiter),
        })
    };

    let dashboard_routes = Router::new()
        .route("/", get(home::current_values))
        .route("/logs", get(logs::browse).post(logs::filter))
        .route("/graph", get(graph::default_view))
        .route("/graph/update", get(graph::update).post(graph::update_form))
        .route("/scripts", get(scripts::list).post(scripts::save))
        .route("/scripts/delete", post(scripts::delete))
        .route("/sign/in", get(sign::form).merge(sign_in_submit))
        .route("/sign/out", get(sign::sign_out))
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    // Health check and static routes (no session required)
    let public_routes = Router::new()
        .route("/healthz", get(health::healthz))
        .route(DASHBOARD_JS_PATH, get(assets::dashboard_js));

    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .merge(dashboard_routes)
        .merge(public_routes)
        .merge(docs_routes)
        .fallback(not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("page not found".into())
}
