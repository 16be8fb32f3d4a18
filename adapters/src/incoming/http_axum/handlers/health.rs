use axum::{Json, extract::State};

use crate::incoming::http_axum::dto::responses::ApiResponse;
use crate::shared::app_state::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success_with_data(Some(serde_json::json!({
        "tracked_user_locks": state.key_lock.tracked_keys(),
        "lock_timeout_ms": state.config.locking.acquire_timeout_ms,
    }))))
}
