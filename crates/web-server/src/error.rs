use api_client::error::ApiError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Upstream error: {0}")]
    Upstream(#[from] ApiError),
    #[error("No league data available: {0}")]
    Unavailable(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Upstream(api_err) => {
                tracing::error!(error = ?api_err, "League data fetch failed.");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": "Failed to fetch league data", "details": api_err.to_string() }),
                )
            }
            AppError::Unavailable(message) => {
                tracing::error!(%message, "No league data available.");
                (StatusCode::BAD_GATEWAY, json!({ "error": message }))
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
        };

        (status, Json(body)).into_response()
    }
}
