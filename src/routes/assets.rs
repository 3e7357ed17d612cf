use axum::{http::header, response::IntoResponse};

use crate::views::assets::DASHBOARD_JS;

pub async fn dashboard_js() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=300"),
        ],
        DASHBOARD_JS,
    )
}
