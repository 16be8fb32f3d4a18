use axum::Json;
use axum::extract::{
    Path,
    rejection::{JsonRejection, PathRejection},
};
use point_ledger_application::error::AppError;

use crate::incoming::http_axum::{dto::requests::PointAmountRequest, error_mapper::HttpError};
use domain::user::UserId;

/// Rejections are kept so they render through `HttpError` like every other
/// client error.
pub type UserPath = Result<Path<i64>, PathRejection>;
pub type AmountBody = Result<Json<PointAmountRequest>, JsonRejection>;

fn invalid_argument(message: String) -> HttpError {
    HttpError(AppError::InvalidArgument { message })
}

pub fn extract_user_id(path: UserPath) -> Result<UserId, HttpError> {
    let Path(id) =
        path.map_err(|rejection| invalid_argument(format!("user id: {}", rejection.body_text())))?;

    UserId::new(id).map_err(|e| HttpError(AppError::from(e)))
}

pub fn extract_amount(body: AmountBody) -> Result<i64, HttpError> {
    let Json(request) = body
        .map_err(|rejection| invalid_argument(format!("amount: {}", rejection.body_text())))?;

    Ok(request.amount)
}
