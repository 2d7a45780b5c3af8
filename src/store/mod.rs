//! SQLite persistence for appointment records.
//!
//! The store is deliberately connection-per-operation: callers open a
//! fresh [`rusqlite::Connection`] for each unit of work and drop it when
//! done. Consistency rests on the table's UNIQUE constraint rather than
//! on shared in-process state.

pub mod appointments;
pub mod sqlite;

pub use appointments::{
    count_appointments, find_by_mobile_number, insert_appointment, mobile_number_exists,
    Appointment, NewAppointment,
};
pub use sqlite::{open_database, open_memory_database};

use thiserror::Error;

/// Storage-layer errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying SQLite failure.
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The UNIQUE constraint on `mobile_number` rejected an insert.
    #[error("appointment already exists for mobile number {0}")]
    DuplicateMobileNumber(i64),
}
