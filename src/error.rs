//! Unified error types for the booking service and client.

use thiserror::Error;

use crate::store::StoreError;

/// Unified error type for the booking binary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Booking-rule error.
    #[error("booking error: {0}")]
    Booking(#[from] BookingError),

    /// Status-lookup error.
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Booking API client error.
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// HTTP request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Booking validation and persistence errors.
#[derive(Error, Debug)]
pub enum BookingError {
    /// One or more required fields is absent or blank.
    #[error("all fields are required")]
    MissingFields,

    /// Mobile number or OTP did not coerce to an integer.
    #[error("mobile number and OTP must be integers")]
    NonNumericFields,

    /// An appointment is already booked under this mobile number.
    #[error("appointment already exists for mobile number {0}")]
    DuplicateMobileNumber(i64),

    /// Storage failure during booking.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Status-lookup errors.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The mobile number parameter is absent or blank.
    #[error("mobile number is required")]
    MissingMobileNumber,

    /// The mobile number parameter did not coerce to an integer.
    #[error("mobile number must be an integer")]
    NonNumericMobileNumber,

    /// No appointment is booked under this mobile number.
    #[error("no appointment found for mobile number {0}")]
    NotFound(i64),

    /// Storage failure during lookup.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Console client errors. `Connection` and `Rejected` render the text
/// shown to the user, so their messages are user-facing.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server could not be reached.
    #[error("Failed to connect to the server: {0}")]
    Connection(#[from] reqwest::Error),

    /// The server answered with an error body; the message is the
    /// server's own wording.
    #[error("{message}")]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },

    /// The server answered success with a body that does not match the
    /// expected shape.
    #[error("unexpected response from {endpoint}: {reason}")]
    UnexpectedPayload {
        /// Endpoint path that produced the response.
        endpoint: &'static str,
        /// What went wrong while reading the body.
        reason: String,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
