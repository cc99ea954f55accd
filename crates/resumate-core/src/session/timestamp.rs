//! Timestamp decoding for session creation times.
//!
//! Persisted creation times are epoch milliseconds. The server may send an
//! integer, an RFC 3339 string, a zone-less ISO-8601 date-time (read as UTC),
//! or a `[year, month, day, hour, minute, second, nanos]` array.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Decodes a wire timestamp into epoch milliseconds.
pub fn parse_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => parse_millis_str(s),
        Value::Array(parts) => parse_millis_parts(parts),
        _ => None,
    }
}

/// Decodes a textual timestamp into epoch milliseconds.
pub fn parse_millis_str(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.parse().ok();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.timestamp_millis());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive).timestamp_millis())
}

/// Missing trailing fields read as zero; out-of-range fields reject the value.
fn parse_millis_parts(parts: &[Value]) -> Option<i64> {
    let field = |idx: usize| -> Option<u32> {
        match parts.get(idx) {
            None => Some(0),
            Some(value) => u32::try_from(value.as_u64()?).ok(),
        }
    };
    let year = i32::try_from(parts.first()?.as_i64()?).ok()?;
    let date = NaiveDate::from_ymd_opt(year, field(1)?, field(2)?)?;
    let naive = date.and_hms_nano_opt(field(3)?, field(4)?, field(5)?, field(6)?)?;
    Some(Utc.from_utc_datetime(&naive).timestamp_millis())
}

/// Formats epoch milliseconds as a local display string.
pub fn display_local(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(local) => local.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => millis.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_out_of_range_array_fields_are_rejected() {
        assert_eq!(
            parse_millis(&json!([2023, 11, 14, 22, 13, 20])),
            Some(1_700_000_000_000)
        );
        assert_eq!(parse_millis(&json!([2023, 11, 14, 4_294_967_296u64, 13, 20])), None);
        assert_eq!(parse_millis(&json!([4_294_967_296i64, 1, 1])), None);
        assert_eq!(parse_millis(&json!([2023, 11, -1])), None);
    }

    #[test]
    fn test_integer_millis() {
        assert_eq!(parse_millis(&json!(1_700_000_000_000i64)), Some(1_700_000_000_000));
        assert_eq!(parse_millis_str("1700000000000"), Some(1_700_000_000_000));
    }

    #[test]
    fn test_rfc3339_and_naive_agree_for_utc() {
        let rfc = parse_millis_str("2024-01-15T10:30:00Z").unwrap();
        let naive = parse_millis_str("2024-01-15T10:30:00").unwrap();
        let spaced = parse_millis_str("2024-01-15 10:30:00").unwrap();
        assert_eq!(rfc, naive);
        assert_eq!(naive, spaced);
    }

    #[test]
    fn test_fractional_seconds() {
        let base = parse_millis_str("2024-01-15T10:30:00").unwrap();
        assert_eq!(parse_millis_str("2024-01-15T10:30:00.250"), Some(base + 250));
    }

    #[test]
    fn test_array_form() {
        let from_array = parse_millis(&json!([2024, 1, 15, 10, 30, 0])).unwrap();
        assert_eq!(Some(from_array), parse_millis_str("2024-01-15T10:30:00"));
    }

    #[test]
    fn test_malformed_values() {
        assert_eq!(parse_millis_str("yesterday"), None);
        assert_eq!(parse_millis_str(""), None);
        assert_eq!(parse_millis(&json!(null)), None);
        assert_eq!(parse_millis(&json!([2024, 13, 40])), None);
    }
}
