//! Booking rules: field validation, appointment-date scheduling, and the
//! book/lookup operations shared by the HTTP handlers.

use chrono::{Duration, Local, NaiveDate};
use rand::Rng;
use rusqlite::Connection;
use tracing::{info, instrument};

use crate::error::{BookingError, LookupError};
use crate::store::{self, NewAppointment, StoreError};

/// Earliest offered slot, in days from the booking call.
pub const MIN_OFFSET_DAYS: i64 = 3;

/// Latest offered slot, in days from the booking call.
pub const MAX_OFFSET_DAYS: i64 = 7;

/// Raw booking fields as they arrive off the wire, before validation.
/// `mobile_number` and `otp` stay textual here so JSON numbers and
/// numeric strings coerce identically.
#[derive(Debug, Clone, Default)]
pub struct BookingFields {
    pub name: Option<String>,
    pub mobile_number: Option<String>,
    pub otp: Option<String>,
    pub address: Option<String>,
    pub aadhar_center: Option<String>,
}

/// A fully validated booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub name: String,
    pub mobile_number: i64,
    pub otp: i64,
    pub address: String,
    pub aadhar_center: String,
}

impl BookingRequest {
    /// Validate raw fields: presence of all five first, then integer
    /// coercion of `mobile_number` and `otp`. Blank and whitespace-only
    /// values count as absent.
    pub fn validate(fields: BookingFields) -> Result<Self, BookingError> {
        let name = required(fields.name)?;
        let mobile_raw = required(fields.mobile_number)?;
        let otp_raw = required(fields.otp)?;
        let address = required(fields.address)?;
        let aadhar_center = required(fields.aadhar_center)?;

        let mobile_number = parse_integer(&mobile_raw).ok_or(BookingError::NonNumericFields)?;
        let otp = parse_integer(&otp_raw).ok_or(BookingError::NonNumericFields)?;

        Ok(Self {
            name,
            mobile_number,
            otp,
            address,
            aadhar_center,
        })
    }
}

fn required(field: Option<String>) -> Result<String, BookingError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(BookingError::MissingFields),
    }
}

fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Draw an appointment date: `today` plus a uniform random offset in
/// `[MIN_OFFSET_DAYS, MAX_OFFSET_DAYS]`.
pub fn schedule_date<R: Rng>(today: NaiveDate, rng: &mut R) -> NaiveDate {
    let offset = rng.gen_range(MIN_OFFSET_DAYS..=MAX_OFFSET_DAYS);
    today + Duration::days(offset)
}

/// Book an appointment: reject a mobile number that already holds one,
/// schedule a date, persist the row, and return the scheduled date.
///
/// The duplicate pre-check and the insert run on the same connection but
/// not in one transaction; a booking that slips in between the two is
/// caught by the UNIQUE constraint and reported exactly like the
/// pre-check would have reported it.
#[instrument(skip_all, fields(mobile_number = request.mobile_number))]
pub fn book_appointment(
    conn: &Connection,
    request: &BookingRequest,
) -> Result<NaiveDate, BookingError> {
    if store::mobile_number_exists(conn, request.mobile_number)? {
        return Err(BookingError::DuplicateMobileNumber(request.mobile_number));
    }

    let appointment_date = schedule_date(Local::now().date_naive(), &mut rand::thread_rng());

    let row = NewAppointment {
        name: request.name.clone(),
        mobile_number: request.mobile_number,
        otp: request.otp,
        address: request.address.clone(),
        aadhar_center: request.aadhar_center.clone(),
        appointment_date,
    };

    match store::insert_appointment(conn, &row) {
        Ok(id) => {
            info!(id, date = %appointment_date, "Appointment booked");
            Ok(appointment_date)
        }
        Err(StoreError::DuplicateMobileNumber(n)) => Err(BookingError::DuplicateMobileNumber(n)),
        Err(e) => Err(e.into()),
    }
}

/// Status view returned by [`appointment_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentStatus {
    pub name: String,
    pub appointment_date: NaiveDate,
}

/// Validate the raw `mobile_number` query parameter for a status lookup.
pub fn parse_lookup_number(raw: Option<&str>) -> Result<i64, LookupError> {
    let raw = match raw {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Err(LookupError::MissingMobileNumber),
    };
    raw.trim()
        .parse()
        .map_err(|_| LookupError::NonNumericMobileNumber)
}

/// Look up the appointment booked under a mobile number.
#[instrument(skip(conn))]
pub fn appointment_status(
    conn: &Connection,
    mobile_number: i64,
) -> Result<AppointmentStatus, LookupError> {
    match store::find_by_mobile_number(conn, mobile_number)? {
        Some(appt) => Ok(AppointmentStatus {
            name: appt.name,
            appointment_date: appt.appointment_date,
        }),
        None => Err(LookupError::NotFound(mobile_number)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::open_memory_database;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fields() -> BookingFields {
        BookingFields {
            name: Some("Asha Verma".to_string()),
            mobile_number: Some("9999999999".to_string()),
            otp: Some("123456".to_string()),
            address: Some("12 MG Road".to_string()),
            aadhar_center: Some("Andheri".to_string()),
        }
    }

    #[test]
    fn validate_accepts_complete_fields() {
        let request = BookingRequest::validate(fields()).unwrap();
        assert_eq!(request.name, "Asha Verma");
        assert_eq!(request.mobile_number, 9_999_999_999);
        assert_eq!(request.otp, 123456);
    }

    #[test]
    fn validate_rejects_absent_field() {
        let mut f = fields();
        f.address = None;
        let err = BookingRequest::validate(f).unwrap_err();
        assert!(matches!(err, BookingError::MissingFields));
    }

    #[test]
    fn validate_treats_blank_as_absent() {
        let mut f = fields();
        f.name = Some("   ".to_string());
        let err = BookingRequest::validate(f).unwrap_err();
        assert!(matches!(err, BookingError::MissingFields));
    }

    #[test]
    fn validate_rejects_non_numeric_mobile() {
        let mut f = fields();
        f.mobile_number = Some("98-76".to_string());
        let err = BookingRequest::validate(f).unwrap_err();
        assert!(matches!(err, BookingError::NonNumericFields));
    }

    #[test]
    fn validate_rejects_non_numeric_otp() {
        let mut f = fields();
        f.otp = Some("one-two-three".to_string());
        let err = BookingRequest::validate(f).unwrap_err();
        assert!(matches!(err, BookingError::NonNumericFields));
    }

    #[test]
    fn validate_rejects_fractional_numbers() {
        let mut f = fields();
        f.otp = Some("123.456".to_string());
        let err = BookingRequest::validate(f).unwrap_err();
        assert!(matches!(err, BookingError::NonNumericFields));
    }

    #[test]
    fn validate_trims_numeric_fields() {
        let mut f = fields();
        f.mobile_number = Some(" 12345 ".to_string());
        let request = BookingRequest::validate(f).unwrap();
        assert_eq!(request.mobile_number, 12345);
    }

    #[test]
    fn missing_fields_reported_before_coercion() {
        let mut f = fields();
        f.otp = Some("abc".to_string());
        f.address = None;
        let err = BookingRequest::validate(f).unwrap_err();
        assert!(matches!(err, BookingError::MissingFields));
    }

    #[test]
    fn scheduled_date_stays_in_window() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let date = schedule_date(today, &mut rng);
            let offset = (date - today).num_days();
            assert!((MIN_OFFSET_DAYS..=MAX_OFFSET_DAYS).contains(&offset));
        }
    }

    #[test]
    fn scheduled_date_is_deterministic_for_a_seed() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let a = schedule_date(today, &mut StdRng::seed_from_u64(7));
        let b = schedule_date(today, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn scheduled_date_crosses_month_boundary() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let mut rng = rand::thread_rng();
        let date = schedule_date(today, &mut rng);
        assert!(date >= NaiveDate::from_ymd_opt(2026, 9, 2).unwrap());
    }

    #[test]
    fn booking_persists_and_reports_date() {
        let conn = open_memory_database().unwrap();
        let request = BookingRequest::validate(fields()).unwrap();

        // Bracket the call so a midnight rollover cannot skew the window.
        let before = Local::now().date_naive();
        let date = book_appointment(&conn, &request).unwrap();
        let after = Local::now().date_naive();
        assert!(date >= before + Duration::days(MIN_OFFSET_DAYS));
        assert!(date <= after + Duration::days(MAX_OFFSET_DAYS));

        let status = appointment_status(&conn, request.mobile_number).unwrap();
        assert_eq!(status.name, "Asha Verma");
        assert_eq!(status.appointment_date, date);
    }

    #[test]
    fn booking_twice_is_a_duplicate() {
        let conn = open_memory_database().unwrap();
        let request = BookingRequest::validate(fields()).unwrap();

        book_appointment(&conn, &request).unwrap();
        let err = book_appointment(&conn, &request).unwrap_err();
        assert!(matches!(
            err,
            BookingError::DuplicateMobileNumber(9_999_999_999)
        ));
    }

    #[test]
    fn lookup_of_unbooked_number_is_not_found() {
        let conn = open_memory_database().unwrap();
        let err = appointment_status(&conn, 42).unwrap_err();
        assert!(matches!(err, LookupError::NotFound(42)));
    }

    #[test]
    fn lookup_number_parsing() {
        assert_eq!(parse_lookup_number(Some("9999999999")).unwrap(), 9_999_999_999);
        assert_eq!(parse_lookup_number(Some(" 42 ")).unwrap(), 42);
        assert!(matches!(
            parse_lookup_number(None),
            Err(LookupError::MissingMobileNumber)
        ));
        assert!(matches!(
            parse_lookup_number(Some("")),
            Err(LookupError::MissingMobileNumber)
        ));
        assert!(matches!(
            parse_lookup_number(Some("abc")),
            Err(LookupError::NonNumericMobileNumber)
        ));
        assert!(matches!(
            parse_lookup_number(Some("12.5")),
            Err(LookupError::NonNumericMobileNumber)
        ));
    }
}
