//! Timestamp helpers for quillboard.
//!
//! All timestamps are stored as RFC 3339 TEXT columns and handled as
//! strings at the model boundary; these helpers centralize parsing.

use chrono::{DateTime, Utc};

/// Current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Parse a stored timestamp, falling back to the Unix epoch on malformed
/// input so that callers never have to handle a parse failure inline.
pub fn parse_rfc3339(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| DateTime::<Utc>::UNIX_EPOCH)
}

/// Age of a stored timestamp in whole days, relative to `now`.
///
/// Future timestamps yield 0.
pub fn age_in_days(created_at: &str, now: DateTime<Utc>) -> i64 {
    let created = parse_rfc3339(created_at);
    (now - created).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_now_parses_back() {
        let now = now_rfc3339();
        let parsed = parse_rfc3339(&now);
        assert!(parsed > DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_parse_malformed_falls_back_to_epoch() {
        assert_eq!(parse_rfc3339("not a date"), DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(parse_rfc3339(""), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_age_in_days() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let created = Utc.with_ymd_and_hms(2024, 6, 5, 12, 0, 0).unwrap();
        assert_eq!(age_in_days(&created.to_rfc3339(), now), 10);
    }

    #[test]
    fn test_age_in_days_future_is_zero() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let future = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(age_in_days(&future.to_rfc3339(), now), 0);
    }
}
