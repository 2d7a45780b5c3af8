//! HTTP API handlers.

use std::path::PathBuf;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use super::error::ApiError;
use crate::booking::{self, BookingFields, BookingRequest};
use crate::error::{BookingError, LookupError};
use crate::metrics;
use crate::store;

// === Wire statuses ===

/// Status line for a successful booking.
pub const STATUS_BOOKED: &str = "Appointment booked successfully";
/// Status line for a successful lookup.
pub const STATUS_FOUND: &str = "Appointment found";

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// SQLite database path. Handlers open a fresh connection per
    /// operation instead of sharing one.
    database_path: PathBuf,
}

impl AppState {
    /// Create new app state over the given database path.
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
        }
    }

    /// Open a connection for one operation.
    fn open(&self) -> Result<rusqlite::Connection, ApiError> {
        store::open_database(&self.database_path).map_err(ApiError::from)
    }
}

/// Booking request body. `mobile_number` and `otp` arrive as either JSON
/// numbers or strings, so every field is taken as a raw JSON value and
/// coerced during validation. Unknown members (the form also submits
/// `city`) are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookAppointmentBody {
    pub name: Option<Value>,
    pub mobile_number: Option<Value>,
    pub otp: Option<Value>,
    pub address: Option<Value>,
    pub aadhar_center: Option<Value>,
}

impl BookAppointmentBody {
    fn into_fields(self) -> BookingFields {
        BookingFields {
            name: text_field(self.name),
            mobile_number: text_field(self.mobile_number),
            otp: text_field(self.otp),
            address: text_field(self.address),
            aadhar_center: text_field(self.aadhar_center),
        }
    }
}

/// Render a JSON field to the raw text the validator coerces. Strings
/// pass through, other values render as their JSON text, and null counts
/// as missing.
fn text_field(value: Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    }
}

/// Query parameters for the status lookup.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusParams {
    pub mobile_number: Option<String>,
}

/// Success body for `POST /book_appointment`.
#[derive(Debug, Serialize)]
pub struct BookingConfirmed {
    /// Status line: [`STATUS_BOOKED`].
    pub status: &'static str,
    /// Scheduled date, `YYYY-MM-DD`.
    pub appointment_date: String,
}

/// Success body for `GET /appointment_status`.
#[derive(Debug, Serialize)]
pub struct StatusFound {
    /// Status line: [`STATUS_FOUND`].
    pub status: &'static str,
    /// Name the appointment was booked under.
    pub name: String,
    /// Scheduled date, `YYYY-MM-DD`.
    pub appointment_date: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Booking handler: validate, schedule, persist.
#[instrument(skip_all)]
pub async fn book_appointment(
    State(state): State<AppState>,
    Json(body): Json<BookAppointmentBody>,
) -> Result<Json<BookingConfirmed>, ApiError> {
    let _timer = metrics::timer_booking();

    let request = match BookingRequest::validate(body.into_fields()) {
        Ok(request) => request,
        Err(err) => {
            metrics::inc_bookings_rejected();
            return Err(err.into());
        }
    };

    let conn = state.open()?;
    match booking::book_appointment(&conn, &request) {
        Ok(date) => {
            metrics::inc_appointments_booked();
            Ok(Json(BookingConfirmed {
                status: STATUS_BOOKED,
                appointment_date: date.format("%Y-%m-%d").to_string(),
            }))
        }
        Err(err) => {
            if matches!(err, BookingError::DuplicateMobileNumber(_)) {
                metrics::inc_bookings_rejected();
            }
            Err(err.into())
        }
    }
}

/// Status handler: look up the appointment for a mobile number.
#[instrument(skip_all)]
pub async fn appointment_status(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> Result<Json<StatusFound>, ApiError> {
    let _timer = metrics::timer_status_lookup();

    let mobile_number = booking::parse_lookup_number(params.mobile_number.as_deref())?;
    metrics::inc_status_lookups();

    let conn = state.open()?;
    match booking::appointment_status(&conn, mobile_number) {
        Ok(status) => Ok(Json(StatusFound {
            status: STATUS_FOUND,
            name: status.name,
            appointment_date: status.appointment_date.format("%Y-%m-%d").to_string(),
        })),
        Err(err) => {
            if matches!(err, LookupError::NotFound(_)) {
                metrics::inc_status_not_found();
            }
            Err(err.into())
        }
    }
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}
