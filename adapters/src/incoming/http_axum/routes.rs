use axum::{
    Router,
    routing::{get, patch},
};

use crate::incoming::http_axum::{
    handlers::{
        health::health_check,
        points::{charge_point, get_point, get_point_histories, use_point},
    },
    router_ext::RouterExt,
};
use crate::shared::app_state::AppState;

pub fn build_application_router() -> Router<AppState> {
    let point_routes = Router::new()
        .route("/point/{id}", get(get_point))
        .route("/point/{id}/histories", get(get_point_histories))
        .route("/point/{id}/charge", patch(charge_point))
        .route("/point/{id}/use", patch(use_point));

    Router::new()
        .route("/health", get(health_check))
        .merge(point_routes)
        .with_request_id()
}
