// src/utils/time.rs - Time helpers for anchoring generated date windows

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Time helpers for the generator and entity factories
pub struct Time;

impl Time {
    /// Current time truncated to whole seconds, so generated instants
    /// round-trip through RFC 3339 without sub-second noise
    pub fn now_secs() -> DateTime<Utc> {
        Self::from_secs(Utc::now().timestamp())
    }

    /// Create a DateTime from seconds since epoch, clamping to the epoch on overflow
    pub fn from_secs(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Create a duration from hours
    pub fn duration_hours(hours: i64) -> Duration {
        Duration::hours(hours)
    }

    /// Create a duration from days
    pub fn duration_days(days: i64) -> Duration {
        Duration::days(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_secs() {
        let t = Time::from_secs(1_700_000_000);
        assert_eq!(t.timestamp(), 1_700_000_000);
        assert_eq!(t.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_now_secs_has_no_fraction() {
        assert_eq!(Time::now_secs().timestamp_subsec_nanos(), 0);
    }
}
