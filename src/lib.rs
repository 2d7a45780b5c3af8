//! Aadhar appointment booking service and console client.
//!
//! Two components composed over HTTP: the API service owns a single
//! SQLite appointment table and exposes booking and status-lookup
//! endpoints; the console client collects the form input, calls those
//! endpoints, and renders the results.
//!
//! # Booking flow
//!
//! ```text
//! client form ──POST /book_appointment──▶ validate ─▶ duplicate check
//!                                                        │
//!                       today + 3..=7 days ◀─ schedule ◀─┘
//!                                              │
//!              "Appointment booked" ◀─ INSERT ─┘
//! ```
//!
//! A mobile number holds at most one appointment; the table's UNIQUE
//! constraint backs the duplicate check.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: SQLite persistence for appointment rows
//! - [`booking`]: Validation, date scheduling, and the booking rules
//! - [`api`]: HTTP API for booking, status, and health
//! - [`client`]: Console client and its session state
//! - [`metrics`]: Prometheus counters and latency timers
//! - [`utils`]: Utility functions

pub mod api;
pub mod booking;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
