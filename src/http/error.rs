use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::intake_service::IntakeError;

pub const VALIDATION_FAILED: &str = "All fields are required";
pub const PROCESSING_FAILED: &str = "Failed to process submission";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    User { message: String },
    #[error("{message}")]
    Internal { message: String },
}

pub fn user_err(message: impl Into<String>) -> ApiError {
    ApiError::User {
        message: message.into(),
    }
}

pub fn internal_err(message: impl Into<String>) -> ApiError {
    ApiError::Internal {
        message: message.into(),
    }
}

impl From<IntakeError> for ApiError {
    fn from(error: IntakeError) -> Self {
        match error {
            IntakeError::Validation { .. } => user_err(VALIDATION_FAILED),
            IntakeError::Internal(err) => internal_err(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::User { message } => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error: &message })).into_response()
            }

            // Details stay in the log, the client only learns that something broke.
            ApiError::Internal { message } => {
                error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: PROCESSING_FAILED,
                    }),
                )
                    .into_response()
            }
        }
    }
}
