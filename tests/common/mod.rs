//! Shared utilities for integration tests.

pub mod harness;

use chrono::{DateTime, Utc};

/// Parses an RFC 3339 timestamp.
///
/// # Panics
///
/// Panics if the string is not valid RFC 3339.
#[allow(dead_code)]
pub fn datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap_or_else(|e| panic!("invalid timestamp {}: {}", s, e))
        .with_timezone(&Utc)
}
