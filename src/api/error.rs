//! HTTP error mapping for the booking API.
//!
//! Error bodies keep the exact wording and key names the booking
//! endpoints have always served: validation, duplicate, and storage
//! errors arrive under an `error` key; the not-found lookup answer
//! arrives under `status`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::error::{BookingError, LookupError};
use crate::store::StoreError;

// === Wire messages ===

/// Booking rejected: a required field is absent.
pub const MSG_ALL_FIELDS_REQUIRED: &str = "All fields are required";
/// Booking rejected: mobile number or OTP did not coerce.
pub const MSG_FIELDS_MUST_BE_INTEGERS: &str = "Mobile number and OTP must be integers";
/// Booking rejected: the mobile number already holds an appointment.
pub const MSG_APPOINTMENT_EXISTS: &str = "Appointment already exists for this mobile number";
/// Lookup rejected: no mobile number parameter.
pub const MSG_MOBILE_REQUIRED: &str = "Mobile number is required";
/// Lookup rejected: the mobile number did not coerce.
pub const MSG_MOBILE_MUST_BE_INTEGER: &str = "Mobile number must be an integer";
/// Lookup found nothing.
pub const MSG_NO_APPOINTMENT: &str = "No appointment found for this mobile number";

/// API-level error carrying its HTTP status and wire body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed input. 400 with an `error` body.
    #[error("{0}")]
    Validation(&'static str),

    /// An appointment already exists for the submitted number. 400 with
    /// an `error` body.
    #[error("{0}")]
    Conflict(&'static str),

    /// No matching appointment. 404 with a `status` body.
    #[error("{0}")]
    NotFound(&'static str),

    /// Storage failure. 500 with the reason passed through as text.
    #[error("Database error: {0}")]
    Storage(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) | ApiError::Conflict(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "status": message }))).into_response()
            }
            ApiError::Storage(reason) => {
                tracing::error!(%reason, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": format!("Database error: {reason}") })),
                )
                    .into_response()
            }
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::MissingFields => ApiError::Validation(MSG_ALL_FIELDS_REQUIRED),
            BookingError::NonNumericFields => ApiError::Validation(MSG_FIELDS_MUST_BE_INTEGERS),
            BookingError::DuplicateMobileNumber(_) => ApiError::Conflict(MSG_APPOINTMENT_EXISTS),
            BookingError::Store(e) => e.into(),
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::MissingMobileNumber => ApiError::Validation(MSG_MOBILE_REQUIRED),
            LookupError::NonNumericMobileNumber => {
                ApiError::Validation(MSG_MOBILE_MUST_BE_INTEGER)
            }
            LookupError::NotFound(_) => ApiError::NotFound(MSG_NO_APPOINTMENT),
            LookupError::Store(e) => e.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // A duplicate surfacing from the UNIQUE constraint reads the
            // same as one caught by the pre-check.
            StoreError::DuplicateMobileNumber(_) => ApiError::Conflict(MSG_APPOINTMENT_EXISTS),
            StoreError::Sqlite(e) => ApiError::Storage(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_renders_400_with_error_key() {
        let (status, body) = render(ApiError::Validation(MSG_ALL_FIELDS_REQUIRED)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "All fields are required");
    }

    #[tokio::test]
    async fn conflict_renders_400_with_error_key() {
        let (status, body) = render(ApiError::Conflict(MSG_APPOINTMENT_EXISTS)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Appointment already exists for this mobile number");
    }

    #[tokio::test]
    async fn not_found_renders_404_with_status_key() {
        let (status, body) = render(ApiError::NotFound(MSG_NO_APPOINTMENT)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "No appointment found for this mobile number");
        assert_eq!(body.get("error"), None);
    }

    #[tokio::test]
    async fn storage_renders_500_with_reason() {
        let (status, body) = render(ApiError::Storage("disk I/O error".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Database error: disk I/O error");
    }

    #[test]
    fn booking_errors_map_to_wire_messages() {
        assert!(matches!(
            ApiError::from(BookingError::MissingFields),
            ApiError::Validation(MSG_ALL_FIELDS_REQUIRED)
        ));
        assert!(matches!(
            ApiError::from(BookingError::NonNumericFields),
            ApiError::Validation(MSG_FIELDS_MUST_BE_INTEGERS)
        ));
        assert!(matches!(
            ApiError::from(BookingError::DuplicateMobileNumber(1)),
            ApiError::Conflict(MSG_APPOINTMENT_EXISTS)
        ));
    }

    #[test]
    fn lookup_errors_map_to_wire_messages() {
        assert!(matches!(
            ApiError::from(LookupError::MissingMobileNumber),
            ApiError::Validation(MSG_MOBILE_REQUIRED)
        ));
        assert!(matches!(
            ApiError::from(LookupError::NotFound(1)),
            ApiError::NotFound(MSG_NO_APPOINTMENT)
        ));
    }

    #[test]
    fn racing_duplicate_maps_to_conflict() {
        assert!(matches!(
            ApiError::from(StoreError::DuplicateMobileNumber(1)),
            ApiError::Conflict(MSG_APPOINTMENT_EXISTS)
        ));
    }
}
