//! Prometheus metrics for the booking service.
//!
//! Counters cover the outcome of every booking and lookup; histograms
//! track handler latency. Scraped via the `/metrics` endpoint.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// Successful bookings counter metric name.
pub const METRIC_APPOINTMENTS_BOOKED: &str = "appointments_booked_total";
/// Rejected bookings (validation failure or duplicate) counter metric name.
pub const METRIC_BOOKINGS_REJECTED: &str = "bookings_rejected_total";
/// Status lookups counter metric name.
pub const METRIC_STATUS_LOOKUPS: &str = "status_lookups_total";
/// Status lookups that matched nothing counter metric name.
pub const METRIC_STATUS_NOT_FOUND: &str = "status_not_found_total";
/// Booking handler latency metric name.
pub const METRIC_BOOKING_LATENCY: &str = "booking_latency_ms";
/// Status handler latency metric name.
pub const METRIC_STATUS_LATENCY: &str = "status_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_APPOINTMENTS_BOOKED,
        "Total number of appointments booked"
    );
    describe_counter!(
        METRIC_BOOKINGS_REJECTED,
        "Total number of booking requests rejected"
    );
    describe_counter!(
        METRIC_STATUS_LOOKUPS,
        "Total number of status lookups served"
    );
    describe_counter!(
        METRIC_STATUS_NOT_FOUND,
        "Total number of status lookups that matched no appointment"
    );

    describe_histogram!(
        METRIC_BOOKING_LATENCY,
        "Booking handler latency in milliseconds"
    );
    describe_histogram!(
        METRIC_STATUS_LATENCY,
        "Status handler latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Increment the appointments booked counter.
pub fn inc_appointments_booked() {
    counter!(METRIC_APPOINTMENTS_BOOKED).increment(1);
}

/// Increment the rejected bookings counter.
pub fn inc_bookings_rejected() {
    counter!(METRIC_BOOKINGS_REJECTED).increment(1);
}

/// Increment the status lookups counter.
pub fn inc_status_lookups() {
    counter!(METRIC_STATUS_LOOKUPS).increment(1);
}

/// Increment the not-found lookups counter.
pub fn inc_status_not_found() {
    counter!(METRIC_STATUS_NOT_FOUND).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        histogram!(self.metric_name).record(latency_ms);
    }
}

/// Create a latency timer for the booking handler.
pub fn timer_booking() -> LatencyTimer {
    LatencyTimer::new(METRIC_BOOKING_LATENCY)
}

/// Create a latency timer for the status handler.
pub fn timer_status_lookup() -> LatencyTimer {
    LatencyTimer::new(METRIC_STATUS_LATENCY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn latency_timer_measures_time() {
        let timer = LatencyTimer::new("test_metric");
        sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed_ms();
        assert!(elapsed >= 9.0); // Allow some tolerance
        // Timer will record on drop
    }
}
