use axum::{http::StatusCode, response::Json};
use service::ServiceError;
use tracing::error;

use crate::schemas::ErrorResponse;

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::AlreadyPurchased { .. }
        | ServiceError::NotForSale { .. }
        | ServiceError::UsernameTaken(_) => StatusCode::CONFLICT,
        ServiceError::Database(_) | ServiceError::PasswordHash(_) | ServiceError::Token(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Map a service failure onto the API error body. Internal details stay in the log.
pub fn service_error(err: ServiceError) -> ApiError {
    let status = status_for(&err);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Request failed: {}", err);
        return error_response(status, err.code(), "Internal server error");
    }
    error_response(status, err.code(), err.to_string())
}
