use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures of a dashboard request.
///
/// Input problems answer 400 with a message naming the offending form field;
/// store and export failures answer 500 and are only detailed in the log.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A date field that none of the accepted formats could read.
    #[error("invalid {field} '{input}'")]
    InvalidDate { field: &'static str, input: String },

    /// `from` is not strictly before `to`.
    #[error("{from_field} must be before {to_field}")]
    EmptyWindow {
        from_field: &'static str,
        to_field: &'static str,
    },

    #[error("invalid level '{0}'")]
    InvalidLevel(String),

    /// A script form field left blank.
    #[error("script {0} is required")]
    MissingScriptField(&'static str),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Stable identifier sent next to the message, for the dashboard script.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "database",
            Self::InvalidDate { .. } => "invalid_date",
            Self::EmptyWindow { .. } => "empty_window",
            Self::InvalidLevel(_) => "invalid_level",
            Self::MissingScriptField(_) => "missing_field",
            Self::Csv(_) | Self::Internal(_) => "internal",
            Self::NotFound(_) => "not_found",
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidDate { .. }
            | Self::EmptyWindow { .. }
            | Self::InvalidLevel(_)
            | Self::MissingScriptField(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Csv(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Database(e) => {
                tracing::error!("Database error: {e:?}");
                "Database error".to_string()
            }
            Self::Csv(e) => {
                tracing::error!("CSV export error: {e}");
                "Internal server error".to_string()
            }
            Self::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                "Internal server error".to_string()
            }
            other => {
                tracing::debug!(code = other.code(), "request_rejected: {other}");
                other.to_string()
            }
        };

        let body = Json(json!({
            "error": message,
            "code": self.code(),
        }));

        (self.status(), body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
