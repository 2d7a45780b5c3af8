//! Repository functions for the appointment table.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::StoreError;

/// A persisted appointment row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: i64,
    pub name: String,
    pub mobile_number: i64,
    pub otp: i64,
    pub address: String,
    pub aadhar_center: String,
    pub appointment_date: NaiveDate,
}

/// Fields of an appointment about to be inserted; the id is assigned by
/// the database.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub name: String,
    pub mobile_number: i64,
    pub otp: i64,
    pub address: String,
    pub aadhar_center: String,
    pub appointment_date: NaiveDate,
}

/// Insert a new appointment and return its row id. A UNIQUE violation on
/// `mobile_number` is reported as [`StoreError::DuplicateMobileNumber`]
/// so callers can distinguish it from other database failures.
pub fn insert_appointment(conn: &Connection, appt: &NewAppointment) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO users_appointment
         (name, mobile_number, otp, address, aadhar_center, appointment_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            appt.name,
            appt.mobile_number,
            appt.otp,
            appt.address,
            appt.aadhar_center,
            appt.appointment_date,
        ],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            StoreError::DuplicateMobileNumber(appt.mobile_number)
        } else {
            StoreError::Sqlite(e)
        }
    })?;
    Ok(conn.last_insert_rowid())
}

/// True when an appointment exists for the mobile number.
pub fn mobile_number_exists(conn: &Connection, mobile_number: i64) -> Result<bool, StoreError> {
    let row = conn
        .query_row(
            "SELECT 1 FROM users_appointment WHERE mobile_number = ?1 LIMIT 1",
            params![mobile_number],
            |_| Ok(()),
        )
        .optional()?;
    Ok(row.is_some())
}

/// Fetch the appointment booked under a mobile number. The UNIQUE
/// constraint keeps this to at most one row; the ordering pins the
/// answer to the newest row should the constraint ever be relaxed.
pub fn find_by_mobile_number(
    conn: &Connection,
    mobile_number: i64,
) -> Result<Option<Appointment>, StoreError> {
    let appt = conn
        .query_row(
            "SELECT id, name, mobile_number, otp, address, aadhar_center, appointment_date
             FROM users_appointment
             WHERE mobile_number = ?1
             ORDER BY id DESC LIMIT 1",
            params![mobile_number],
            appointment_from_row,
        )
        .optional()?;
    Ok(appt)
}

/// Count all booked appointments.
pub fn count_appointments(conn: &Connection) -> Result<i64, StoreError> {
    let count = conn.query_row("SELECT COUNT(*) FROM users_appointment", [], |row| row.get(0))?;
    Ok(count)
}

fn appointment_from_row(row: &Row<'_>) -> Result<Appointment, rusqlite::Error> {
    Ok(Appointment {
        id: row.get(0)?,
        name: row.get(1)?,
        mobile_number: row.get(2)?,
        otp: row.get(3)?,
        address: row.get(4)?,
        aadhar_center: row.get(5)?,
        appointment_date: row.get(6)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::sqlite::open_memory_database;
    use pretty_assertions::assert_eq;

    fn sample(mobile_number: i64) -> NewAppointment {
        NewAppointment {
            name: "Asha Verma".to_string(),
            mobile_number,
            otp: 123456,
            address: "12 MG Road, Mumbai".to_string(),
            aadhar_center: "Andheri".to_string(),
            appointment_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        }
    }

    #[test]
    fn insert_then_find_roundtrips() {
        let conn = open_memory_database().unwrap();
        let id = insert_appointment(&conn, &sample(9_999_999_999)).unwrap();

        let found = find_by_mobile_number(&conn, 9_999_999_999).unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.name, "Asha Verma");
        assert_eq!(found.mobile_number, 9_999_999_999);
        assert_eq!(found.otp, 123456);
        assert_eq!(found.address, "12 MG Road, Mumbai");
        assert_eq!(found.aadhar_center, "Andheri");
        assert_eq!(
            found.appointment_date,
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
        );
    }

    #[test]
    fn find_returns_none_for_unbooked_number() {
        let conn = open_memory_database().unwrap();
        assert_eq!(find_by_mobile_number(&conn, 12345).unwrap(), None);
    }

    #[test]
    fn exists_tracks_inserts() {
        let conn = open_memory_database().unwrap();
        assert!(!mobile_number_exists(&conn, 777).unwrap());
        insert_appointment(&conn, &sample(777)).unwrap();
        assert!(mobile_number_exists(&conn, 777).unwrap());
        assert!(!mobile_number_exists(&conn, 778).unwrap());
    }

    #[test]
    fn duplicate_mobile_number_is_reported() {
        let conn = open_memory_database().unwrap();
        insert_appointment(&conn, &sample(555)).unwrap();

        let err = insert_appointment(&conn, &sample(555)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateMobileNumber(555)));
        assert_eq!(count_appointments(&conn).unwrap(), 1);
    }

    #[test]
    fn distinct_mobile_numbers_coexist() {
        let conn = open_memory_database().unwrap();
        insert_appointment(&conn, &sample(111)).unwrap();
        insert_appointment(&conn, &sample(222)).unwrap();
        assert_eq!(count_appointments(&conn).unwrap(), 2);
    }

    #[test]
    fn appointment_date_is_stored_as_iso_text() {
        let conn = open_memory_database().unwrap();
        insert_appointment(&conn, &sample(333)).unwrap();

        let raw: String = conn
            .query_row(
                "SELECT appointment_date FROM users_appointment WHERE mobile_number = 333",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(raw, "2026-09-01");
    }
}
