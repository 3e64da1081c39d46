//! Timeout configuration for backend requests.

use std::time::Duration;

/// Timeouts applied to every request a [`FetchClient`](crate::FetchClient) sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total operation timeout.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create a new timeout configuration.
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Create from millisecond values, as read from config files.
    pub fn from_millis(connect_ms: u64, total_ms: u64) -> Self {
        Self::new(Duration::from_millis(connect_ms), Duration::from_millis(total_ms))
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(2),
            total: Duration::from_secs(10),
        }
    }
}
