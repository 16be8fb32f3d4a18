use axum::{Json, extract::State};
use std::future::Future;
use std::sync::Arc;
use tracing::Instrument;

use domain::points::Balance;
use point_ledger_application::error::{AppError, AppResult};

use crate::incoming::http_axum::{
    core::extractors::{AmountBody, UserPath, extract_amount, extract_user_id},
    dto::responses::{PointHistoryResponse, UserPointResponse},
    error_mapper::HttpError,
};
use crate::shared::app_state::AppState;

// A dropped request must not cancel a mutation between its balance write
// and its history append, so mutations run on their own task.
async fn run_detached<F>(mutation: F) -> Result<Balance, HttpError>
where
    F: Future<Output = AppResult<Balance>> + Send + 'static,
{
    tokio::spawn(mutation.in_current_span())
        .await
        .map_err(|e| {
            HttpError(AppError::TaskError {
                message: format!("Point mutation task failed: {e}"),
            })
        })?
        .map_err(HttpError)
}

pub async fn get_point(
    path: UserPath,
    State(state): State<AppState>,
) -> Result<Json<UserPointResponse>, HttpError> {
    let user_id = extract_user_id(path)?;

    let balance = state
        .point_query_service
        .balance(user_id)
        .await
        .map_err(HttpError)?;

    Ok(Json(UserPointResponse::from(balance)))
}

pub async fn get_point_histories(
    path: UserPath,
    State(state): State<AppState>,
) -> Result<Json<Vec<PointHistoryResponse>>, HttpError> {
    let user_id = extract_user_id(path)?;

    let entries = state
        .point_query_service
        .history(user_id)
        .await
        .map_err(HttpError)?;

    Ok(Json(
        entries
            .into_iter()
            .map(PointHistoryResponse::from)
            .collect(),
    ))
}

pub async fn charge_point(
    path: UserPath,
    State(state): State<AppState>,
    body: AmountBody,
) -> Result<Json<UserPointResponse>, HttpError> {
    let user_id = extract_user_id(path)?;
    let amount = extract_amount(body)?;
    let service = Arc::clone(&state.point_command_service);

    let balance = run_detached(async move { service.credit(user_id, amount).await }).await?;

    Ok(Json(UserPointResponse::from(balance)))
}

pub async fn use_point(
    path: UserPath,
    State(state): State<AppState>,
    body: AmountBody,
) -> Result<Json<UserPointResponse>, HttpError> {
    let user_id = extract_user_id(path)?;
    let amount = extract_amount(body)?;
    let service = Arc::clone(&state.point_command_service);

    let balance = run_detached(async move { service.debit(user_id, amount).await }).await?;

    Ok(Json(UserPointResponse::from(balance)))
}
