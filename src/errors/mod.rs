//! Error handling module for the TechFunding backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.
//! Validation failures carry typed codes instead of free-form alert text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
#[allow(dead_code)]
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const MISSING_FIELD: &str = "MISSING_FIELD";
    pub const BELOW_MIN_LENGTH: &str = "BELOW_MIN_LENGTH";
    pub const TOO_MANY_IMAGES: &str = "TOO_MANY_IMAGES";
    pub const IMAGE_TOO_LARGE: &str = "IMAGE_TOO_LARGE";
    pub const INVALID_PRICE_RELATION: &str = "INVALID_PRICE_RELATION";
    pub const INVALID_STATE: &str = "INVALID_STATE";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Generic validation error
    Validation(String),
    /// A required field was empty
    MissingField(&'static str),
    /// Text content shorter than the form minimum
    BelowMinLength { field: &'static str, min: usize },
    /// More images attached than the form allows
    TooManyImages { max: usize },
    /// A single image exceeds the upload size cap
    ImageTooLarge { max_bytes: usize },
    /// `original_price` must be strictly greater than `price`
    InvalidPriceRelation,
    /// Illegal confirmation-flow transition
    InvalidState(String),
    /// Database error
    Database(String),
    /// Internal server error
    Internal(String),
    /// Bad request
    BadRequest(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_)
            | AppError::MissingField(_)
            | AppError::BelowMinLength { .. }
            | AppError::TooManyImages { .. }
            | AppError::ImageTooLarge { .. }
            | AppError::InvalidPriceRelation => StatusCode::BAD_REQUEST,
            AppError::InvalidState(_) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::MissingField(_) => codes::MISSING_FIELD,
            AppError::BelowMinLength { .. } => codes::BELOW_MIN_LENGTH,
            AppError::TooManyImages { .. } => codes::TOO_MANY_IMAGES,
            AppError::ImageTooLarge { .. } => codes::IMAGE_TOO_LARGE,
            AppError::InvalidPriceRelation => codes::INVALID_PRICE_RELATION,
            AppError::InvalidState(_) => codes::INVALID_STATE,
            AppError::Database(_) => codes::DATABASE_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::MissingField(field) => format!("Required field '{}' is missing", field),
            AppError::BelowMinLength { field, min } => {
                format!("Field '{}' must be at least {} characters", field, min)
            }
            AppError::TooManyImages { max } => {
                format!("At most {} images may be attached", max)
            }
            AppError::ImageTooLarge { max_bytes } => {
                format!("Each image is limited to {} bytes", max_bytes)
            }
            AppError::InvalidPriceRelation => {
                "originalPrice must be greater than price".to_string()
            }
            AppError::InvalidState(msg) => msg.clone(),
            AppError::Database(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::BadRequest(format!("JSON error: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        let details = match error {
            AppError::BelowMinLength { min, .. } => {
                Some(serde_json::json!({ "minLength": min }))
            }
            AppError::TooManyImages { max } => Some(serde_json::json!({ "maxImages": max })),
            AppError::ImageTooLarge { max_bytes } => {
                Some(serde_json::json!({ "maxBytes": max_bytes }))
            }
            _ => None,
        };

        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                details,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_family_maps_to_400() {
        for err in [
            AppError::MissingField("title"),
            AppError::BelowMinLength {
                field: "content",
                min: 10,
            },
            AppError::TooManyImages { max: 3 },
            AppError::ImageTooLarge { max_bytes: 1024 },
            AppError::InvalidPriceRelation,
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn flow_conflicts_map_to_409() {
        let err = AppError::InvalidState("already confirmed".to_string());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), codes::INVALID_STATE);
    }

    #[test]
    fn envelope_carries_typed_details() {
        let body = ErrorResponse::new(&AppError::TooManyImages { max: 3 });
        assert!(!body.success);
        assert_eq!(body.error.code, codes::TOO_MANY_IMAGES);
        assert_eq!(body.error.details.unwrap()["maxImages"], 3);
    }
}
