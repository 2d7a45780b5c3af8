//! HTTP client for the booking API and the Aadhar-center directory.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::ClientError;

/// Client for the booking API. The center directory may live on a
/// different host, so its base URL is configured separately.
#[derive(Debug, Clone)]
pub struct BookingClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL of the booking API.
    api_base: String,
    /// Base URL of the center directory.
    centers_base: String,
}

/// Booking payload for `POST /book_appointment`. The fields are sent as
/// strings exactly as collected from the form; the service coerces the
/// numeric ones.
#[derive(Debug, Clone, Serialize)]
pub struct BookingPayload {
    pub name: String,
    pub mobile_number: String,
    pub otp: String,
    pub address: String,
    pub aadhar_center: String,
}

/// Success body of `POST /book_appointment`.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfirmation {
    /// Status line from the service.
    pub status: String,
    /// Scheduled date, `YYYY-MM-DD`.
    pub appointment_date: String,
}

/// Success body of `GET /appointment_status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusReport {
    /// Status line from the service.
    pub status: String,
    /// Name the appointment was booked under.
    pub name: String,
    /// Scheduled date, `YYYY-MM-DD`.
    pub appointment_date: String,
}

/// Body of `GET /get_aadhar_centers`.
#[derive(Debug, Clone, Deserialize)]
struct CentersResponse {
    #[serde(default)]
    aadhar_centers: Vec<String>,
}

/// Error body shape. Booking and storage errors key the message as
/// `error`; the not-found lookup answer keys it as `status`.
#[derive(Debug, Clone, Default, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl BookingClient {
    /// Create a new client from config.
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.http_timeout_ms))
            .connect_timeout(Duration::from_millis(500))
            .tcp_nodelay(true)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            api_base: config.api_base_url.clone(),
            centers_base: config.centers_base_url.clone(),
        }
    }

    /// Book an appointment and return the service's confirmation.
    #[instrument(skip_all, fields(mobile_number = %payload.mobile_number))]
    pub async fn book_appointment(
        &self,
        payload: &BookingPayload,
    ) -> Result<BookingConfirmation, ClientError> {
        let url = format!("{}/book_appointment", self.api_base);

        let response = self.http.post(&url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(rejection(status, response).await);
        }

        let confirmation: BookingConfirmation =
            response
                .json()
                .await
                .map_err(|e| ClientError::UnexpectedPayload {
                    endpoint: "/book_appointment",
                    reason: e.to_string(),
                })?;
        debug!(date = %confirmation.appointment_date, "Appointment booked");
        Ok(confirmation)
    }

    /// Fetch the appointment status for a mobile number.
    #[instrument(skip(self))]
    pub async fn appointment_status(
        &self,
        mobile_number: &str,
    ) -> Result<StatusReport, ClientError> {
        let url = format!("{}/appointment_status", self.api_base);

        let response = self
            .http
            .get(&url)
            .query(&[("mobile_number", mobile_number)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(rejection(status, response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::UnexpectedPayload {
                endpoint: "/appointment_status",
                reason: e.to_string(),
            })
    }

    /// Fetch the Aadhar centers available in a city.
    #[instrument(skip(self))]
    pub async fn aadhar_centers(&self, city: &str) -> Result<Vec<String>, ClientError> {
        let url = format!("{}/get_aadhar_centers", self.centers_base);

        let response = self.http.get(&url).query(&[("city", city)]).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(rejection(status, response).await);
        }

        let body: CentersResponse =
            response
                .json()
                .await
                .map_err(|e| ClientError::UnexpectedPayload {
                    endpoint: "/get_aadhar_centers",
                    reason: e.to_string(),
                })?;
        debug!(count = body.aadhar_centers.len(), "Fetched centers");
        Ok(body.aadhar_centers)
    }
}

/// Turn a non-success response into a [`ClientError::Rejected`], pulling
/// the message out of the body's `error` or `status` key.
async fn rejection(status: reqwest::StatusCode, response: reqwest::Response) -> ClientError {
    let message = response
        .json::<ApiMessage>()
        .await
        .ok()
        .and_then(|m| m.error.or(m.status))
        .unwrap_or_else(|| format!("HTTP {status}"));

    ClientError::Rejected {
        status: status.as_u16(),
        message,
    }
}
