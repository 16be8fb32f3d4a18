use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use point_ledger_application::error::AppError;

pub struct HttpError(pub AppError);

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        match app_error {
            AppError::Domain(_)
            | AppError::InvalidArgument { .. }
            | AppError::InsufficientBalance { .. }
            | AppError::LockTimeout { .. } => {
                debug!("Client error response generated: {}", app_error);
            }
            _ => {
                error!("Server error response generated: {}", app_error);
            }
        }

        let (status_code, message) = match app_error {
            AppError::Domain(_) | AppError::InvalidArgument { .. } => {
                (StatusCode::BAD_REQUEST, app_error.to_string())
            }

            AppError::InsufficientBalance { .. } => (StatusCode::CONFLICT, app_error.to_string()),

            AppError::LockTimeout { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Balance is busy, retry later".to_string(),
            ),

            AppError::LockMisuse { .. } | AppError::TaskError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),

            AppError::StoreError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Store error".to_string())
            }

            AppError::ConfigError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
            ),
        };

        let error_response = json!({
            "ok": false,
            "error": message,
            "status": status_code.as_u16()
        });

        (status_code, Json(error_response)).into_response()
    }
}

impl From<AppError> for HttpError {
    fn from(app_error: AppError) -> Self {
        HttpError(app_error)
    }
}
