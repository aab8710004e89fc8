// src/utils/time.rs

use chrono::{DateTime, Utc};

/// Source of the wall-clock time stamped into reports.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Service for handling time-related operations.
#[derive(Debug, Clone, Default)]
pub struct TimeService;

impl TimeService {
    /// Creates a new instance of `TimeService`.
    pub fn new() -> Self {
        TimeService
    }
}

impl Clock for TimeService {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant, for deterministic reports.
#[derive(Debug, Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Formats an instant the way it appears in reports.
pub fn format_report_time(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
