use chrono::{DateTime, Utc};

/// Wall clock. Injected so session expiry and profile timestamps are
/// deterministic in tests.
pub trait ClockPort: Send + Sync {
    fn now_ms(&self) -> i64;

    /// `now_ms` as a UTC timestamp; out-of-range values clamp to the epoch.
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.now_ms()).unwrap_or_default()
    }
}
