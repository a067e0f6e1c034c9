//! ISO-8601 timestamp parsing and hour truncation.
//!
//! Timestamps stay naive throughout: an offset-carrying input keeps its
//! literal wall-clock component and the offset is dropped, so hour
//! bucketing truncates the time exactly as it appears in the file.

use chrono::{DateTime, NaiveDateTime, Timelike};

/// Parse an ISO-8601 date-time string into a naive timestamp.
///
/// Accepts second and sub-second precision, `T` or space separators,
/// and offset-suffixed forms (`Z`, `+hh:mm`) whose offset is discarded
/// after parse. Returns `None` for anything unrecognised.
pub fn parse(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];

    for fmt in FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(naive);
        }
    }

    // Replace trailing 'Z' with '+00:00' for RFC 3339 compatibility.
    let normalised = match trimmed.strip_suffix('Z') {
        Some(stripped) => format!("{}+00:00", stripped),
        None => trimmed.to_string(),
    };

    DateTime::parse_from_rfc3339(&normalised)
        .ok()
        .map(|dt| dt.naive_local())
}

/// Zero out minutes, seconds and sub-second components, keeping
/// date + hour.
pub fn truncate_to_hour(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    // ── parse ────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_basic_iso() {
        assert_eq!(parse("2024-06-01T10:30:15"), Some(dt(2024, 6, 1, 10, 30, 15)));
    }

    #[test]
    fn test_parse_space_separator() {
        assert_eq!(parse("2024-06-01 10:30:15"), Some(dt(2024, 6, 1, 10, 30, 15)));
    }

    #[test]
    fn test_parse_subsecond_precision() {
        let parsed = parse("2024-06-01T10:30:15.250").unwrap();
        assert_eq!(truncate_to_hour(parsed), dt(2024, 6, 1, 10, 0, 0));
        assert_eq!(parsed.second(), 15);
    }

    #[test]
    fn test_parse_surrounding_whitespace() {
        assert_eq!(parse("  2024-06-01T10:30:15 "), Some(dt(2024, 6, 1, 10, 30, 15)));
    }

    #[test]
    fn test_parse_offset_keeps_wall_clock() {
        // The +02:00 offset is dropped, not converted to UTC.
        assert_eq!(
            parse("2024-06-01T10:30:15+02:00"),
            Some(dt(2024, 6, 1, 10, 30, 15))
        );
    }

    #[test]
    fn test_parse_z_suffix_keeps_wall_clock() {
        assert_eq!(parse("2024-06-01T10:30:15Z"), Some(dt(2024, 6, 1, 10, 30, 15)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("not a timestamp").is_none());
        assert!(parse("").is_none());
        assert!(parse("2024-13-45T99:00:00").is_none());
    }

    // ── truncate_to_hour ─────────────────────────────────────────────────────

    #[test]
    fn test_truncate_zeroes_minutes_and_seconds() {
        assert_eq!(
            truncate_to_hour(dt(2024, 6, 1, 10, 45, 59)),
            dt(2024, 6, 1, 10, 0, 0)
        );
    }

    #[test]
    fn test_truncate_keeps_date_and_hour() {
        assert_eq!(
            truncate_to_hour(dt(2024, 6, 1, 23, 59, 59)),
            dt(2024, 6, 1, 23, 0, 0)
        );
    }

    #[test]
    fn test_truncate_is_idempotent() {
        let hour = dt(2024, 6, 1, 10, 0, 0);
        assert_eq!(truncate_to_hour(hour), hour);
    }
}
