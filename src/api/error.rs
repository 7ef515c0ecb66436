use crate::auth::AuthorizationError;
use crate::orchestrator::DeletionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Every way a deletion request can end without success.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Unauthorized(#[from] AuthorizationError),

    #[error(transparent)]
    Deletion(#[from] DeletionError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::FORBIDDEN,
            ApiError::Deletion(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
