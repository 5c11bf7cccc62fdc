use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use board_db::StoreError;
use board_types::api::ErrorResponse;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("author and body are required fields")]
    Validation,

    /// Refused by the script-pattern filter in front of the escaped board.
    #[error("Invalid input. Please avoid using HTML tags or special characters.")]
    Rejected,

    #[error("Comment not found")]
    NotFound,

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation | ApiError::Rejected => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => ApiError::NotFound,
            // Only reachable when the fallback store itself failed.
            StoreError::Unavailable(reason) => {
                error!("Store error escaped fallback: {}", reason);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
