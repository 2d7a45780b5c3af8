//! Per-session state for the console client.
//!
//! All form state lives in one value owned by the console loop and
//! changes only through named transitions, which keeps the reset rules
//! (mode switches, city changes, booking confirmation) testable without
//! driving the full flow.

use strum::{Display, EnumIter, EnumString};

/// Placeholder one-time passcode submitted with every booking. The
/// service stores it without verifying it.
pub const DEFAULT_OTP: &str = "123456";

/// The two mutually exclusive client flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Mode {
    /// Book a new appointment.
    #[default]
    Book,
    /// Check the status of an existing appointment.
    Status,
}

/// Cities served by the center directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum City {
    Mumbai,
    Delhi,
    Bangalore,
    Kolkata,
    Chennai,
}

/// Booking form fields collected before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub name: String,
    pub mobile_number: String,
    pub address: String,
    pub city: Option<City>,
    pub aadhar_center: Option<String>,
}

impl BookingForm {
    /// True when every field required for submission is filled.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.mobile_number.trim().is_empty()
            && !self.address.trim().is_empty()
            && self.city.is_some()
            && self.aadhar_center.is_some()
    }
}

/// Per-session client state.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    mode: Mode,
    /// Booking form under construction.
    pub form: BookingForm,
    /// Center options fetched for the currently selected city.
    pub centers: Vec<String>,
    /// Mobile number entered in status mode.
    pub status_number: String,
    /// Confirmation shown after a successful booking. Survives a trip
    /// through status mode; cleared when booking mode is re-entered.
    confirmation: Option<String>,
}

impl SessionState {
    /// Create a fresh session in booking mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch to booking mode. Clears any stored confirmation so the
    /// form renders again.
    pub fn enter_book_mode(&mut self) {
        self.mode = Mode::Book;
        self.confirmation = None;
    }

    /// Switch to status mode. Clears the previously entered number.
    pub fn enter_status_mode(&mut self) {
        self.mode = Mode::Status;
        self.status_number.clear();
    }

    /// Select a city. Choosing a different city invalidates the fetched
    /// center list and any selected center.
    pub fn select_city(&mut self, city: City) {
        if self.form.city != Some(city) {
            self.centers.clear();
            self.form.aadhar_center = None;
        }
        self.form.city = Some(city);
    }

    /// Record the center options fetched for the selected city.
    pub fn set_centers(&mut self, centers: Vec<String>) {
        self.centers = centers;
    }

    /// Select a center from the fetched options.
    pub fn select_center(&mut self, center: &str) {
        self.form.aadhar_center = Some(center.to_owned());
    }

    /// Store the post-booking confirmation and reset the form for the
    /// next booking.
    pub fn confirm_booking(&mut self, message: String) {
        self.confirmation = Some(message);
        self.form = BookingForm::default();
        self.centers.clear();
    }

    /// Confirmation from the last successful booking, if one is held.
    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }
}
