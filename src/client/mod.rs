//! Console client for the booking API.
//!
//! Split into three pieces: the HTTP client wrapper, the per-session
//! form state, and the interactive console flow that ties them together.

pub mod api;
pub mod session;
pub mod ui;

pub use api::{BookingClient, BookingConfirmation, BookingPayload, StatusReport};
pub use session::{BookingForm, City, Mode, SessionState, DEFAULT_OTP};
