//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid request: amount must be non-zero",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges below).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                  |
/// |-----------|-------------------|------------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request              |
/// | 2000–2999 | State/Not Found   | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server/Permission | 500 / 403                    |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Unsupported or invalid point transaction type string.
    #[error("invalid transaction type: {0}")]
    InvalidTransactionType(String),

    /// No leaderboard snapshot has been computed for the given key.
    #[error("leaderboard not found: campaign {campaign_id} key {board_key}")]
    LeaderboardNotFound {
        /// Campaign the leaderboard belongs to.
        campaign_id: uuid::Uuid,
        /// Document key (`type` or `type_movieId`).
        board_key: String,
    },

    /// Campaign entry with the given ID was not found.
    #[error("entry not found: {0}")]
    EntryNotFound(uuid::Uuid),

    /// Payment status transition is not allowed.
    #[error("illegal payment transition: {from} -> {to}")]
    InvalidPaymentTransition {
        /// Current payment status of the entry.
        from: String,
        /// Requested payment status.
        to: String,
    },

    /// The document store rejected a write for lack of permission.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidTransactionType(_) => 1002,
            Self::LeaderboardNotFound { .. } => 2001,
            Self::EntryNotFound(_) => 2002,
            Self::InvalidPaymentTransition { .. } => 2101,
            Self::PermissionDenied(_) => 3002,
            Self::PersistenceError(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidTransactionType(_) => StatusCode::BAD_REQUEST,
            Self::LeaderboardNotFound { .. } | Self::EntryNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidPaymentTransition { .. } => StatusCode::CONFLICT,
            Self::PermissionDenied(_) => StatusCode::FORBIDDEN,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        let err = GatewayError::InvalidRequest("bad".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1001);
    }

    #[test]
    fn missing_leaderboard_maps_to_404() {
        let err = GatewayError::LeaderboardNotFound {
            campaign_id: uuid::Uuid::new_v4(),
            board_key: "overall".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), 2001);
    }

    #[test]
    fn illegal_transition_maps_to_409() {
        let err = GatewayError::InvalidPaymentTransition {
            from: "paid".to_string(),
            to: "refunded".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        let msg = err.to_string();
        assert!(msg.contains("paid"));
        assert!(msg.contains("refunded"));
    }

    #[test]
    fn permission_denied_maps_to_403() {
        let err = GatewayError::PermissionDenied("write blocked".to_string());
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.error_code(), 3002);
    }
}
