//! SQLite connection handling.
//!
//! Every operation opens its own short-lived connection; nothing is
//! pooled or shared across requests. The schema is applied on open and
//! is idempotent, so concurrent opens are safe.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;
use tracing::debug;

use super::StoreError;

/// Schema for the appointment table. `mobile_number` carries the UNIQUE
/// constraint that backs duplicate detection.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS users_appointment (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    mobile_number INTEGER NOT NULL UNIQUE,
    otp INTEGER NOT NULL,
    address TEXT NOT NULL,
    aadhar_center TEXT NOT NULL,
    appointment_date TEXT NOT NULL
)";

/// Grace window for writers that hit a locked database. Bookings open
/// separate connections, so without this a concurrent write fails
/// immediately with `SQLITE_BUSY`.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open (creating if needed) the database at `path` and apply the schema.
pub fn open_database(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(path)?;
    configure_connection(&conn)?;
    init_schema(&conn)?;
    debug!(path = %path.display(), "Opened database");
    Ok(conn)
}

/// Open an in-memory database with the schema applied. In-memory
/// databases are private to their connection, so this is only useful
/// for tests.
pub fn open_memory_database() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    configure_connection(&conn)?;
    init_schema(&conn)?;
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> Result<(), StoreError> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}

/// Apply the schema. Safe to call on every open.
pub fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
