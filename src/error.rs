// error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Device not found")]
    DeviceNotFound,
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::DeviceNotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Error handling request");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(
            AppError::DeviceNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation("Missing required fields".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_matches_wire_contract() {
        assert_eq!(AppError::DeviceNotFound.to_string(), "Device not found");
    }

    #[test]
    fn internal_message_carries_fault_description() {
        let err = AppError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.to_string(), "Internal server error: disk on fire");
    }
}
