use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use maud::html;
use serde_json::json;

/// Errors surfaced at the HTTP boundary. The cause is logged where the error is created;
/// callers only ever see the short message.
#[derive(Debug)]
pub enum AppError {
    /// Rendered as an HTML fragment with status 500.
    Internal(&'static str),
    /// Rendered as an HTML fragment with status 400.
    Input(&'static str),
    NotFound,
    /// Rendered as `{"error": ...}` with status 500.
    Api(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::Api(message) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response();
            }
            AppError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
            AppError::Input(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        };

        let body = html! {
            article.error role="alert" {
                strong { (message) }
            }
        };

        (code, body).into_response()
    }
}

pub trait ResultExt<T> {
    fn reject(self, message: &'static str) -> Result<T, AppError>;
    fn reject_input(self, message: &'static str) -> Result<T, AppError>;
    fn reject_api(self, message: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{message}: {e:#}");
            AppError::Internal(message)
        })
    }

    fn reject_input(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::warn!("{message}: {e:#}");
            AppError::Input(message)
        })
    }

    fn reject_api(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{message}: {e:#}");
            AppError::Api(message)
        })
    }
}
