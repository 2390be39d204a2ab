//! Raw record validation.
//!
//! Turns an untrusted JSON value into a [`HeartbeatEvent`] or a
//! [`RecordError`] explaining why it was rejected. Nothing in here panics on
//! bad input.

use beatwatch_types::HeartbeatEvent;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::RecordError;

/// ISO 8601 layouts with an offset. `%#z` takes `Z`, `+hh`, `+hhmm` and `+hh:mm`.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Offset-less layouts, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Validate one raw record.
pub fn validate_record(record: &Value) -> Result<HeartbeatEvent, RecordError> {
    let object = record
        .as_object()
        .ok_or_else(|| RecordError::NotAnObject(type_name(record)))?;

    let service = match object.get("service") {
        None | Some(Value::Null) => return Err(RecordError::MissingService),
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(_) => return Err(RecordError::InvalidService),
    };

    let timestamp = match object.get("timestamp") {
        None | Some(Value::Null) => return Err(RecordError::MissingTimestamp),
        Some(Value::String(s)) if s.is_empty() => return Err(RecordError::MissingTimestamp),
        Some(Value::String(s)) => {
            parse_timestamp(s).ok_or_else(|| RecordError::InvalidTimestamp(s.clone()))?
        }
        Some(other) => return Err(RecordError::InvalidTimestamp(other.to_string())),
    };

    Ok(HeartbeatEvent::new(service.as_str(), timestamp))
}

/// Parse a calendar instant.
///
/// RFC 3339, then looser ISO 8601 layouts with an offset, then RFC 2822.
/// After that, offset-less ISO 8601 layouts taken as UTC and finally a bare
/// date at midnight UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    let with_offset = DateTime::parse_from_rfc3339(s)
        .ok()
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        })
        .or_else(|| DateTime::parse_from_rfc2822(s).ok());
    if let Some(dt) = with_offset {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 4, h, m, s).unwrap()
    }

    #[test]
    fn accepts_well_formed_record() {
        let event =
            validate_record(&json!({"service": "email", "timestamp": "2025-08-04T10:00:00Z"}))
                .unwrap();
        assert_eq!(event.service, "email");
        assert_eq!(event.timestamp, at(10, 0, 0));
    }

    #[test]
    fn ignores_extra_fields() {
        let event = validate_record(&json!({
            "service": "api",
            "timestamp": "2025-08-04T10:00:00Z",
            "region": "eu-west-1"
        }))
        .unwrap();
        assert_eq!(event.service, "api");
    }

    #[test]
    fn rejects_non_objects() {
        assert_eq!(
            validate_record(&Value::Null),
            Err(RecordError::NotAnObject("null"))
        );
        assert_eq!(
            validate_record(&json!("invalid")),
            Err(RecordError::NotAnObject("string"))
        );
        assert_eq!(validate_record(&json!(42)), Err(RecordError::NotAnObject("number")));
        assert_eq!(
            validate_record(&json!([{"service": "a", "timestamp": "2025-08-04T10:00:00Z"}])),
            Err(RecordError::NotAnObject("array"))
        );
    }

    #[test]
    fn rejects_bad_service() {
        assert_eq!(
            validate_record(&json!({"timestamp": "2025-08-04T10:01:00Z"})),
            Err(RecordError::MissingService)
        );
        assert_eq!(
            validate_record(&json!({"service": "", "timestamp": "2025-08-04T10:01:00Z"})),
            Err(RecordError::InvalidService)
        );
        assert_eq!(
            validate_record(&json!({"service": 7, "timestamp": "2025-08-04T10:01:00Z"})),
            Err(RecordError::InvalidService)
        );
        assert_eq!(validate_record(&json!({})), Err(RecordError::MissingService));
    }

    #[test]
    fn rejects_bad_timestamp() {
        assert_eq!(
            validate_record(&json!({"service": "cache"})),
            Err(RecordError::MissingTimestamp)
        );
        assert_eq!(
            validate_record(&json!({"service": "cache", "timestamp": ""})),
            Err(RecordError::MissingTimestamp)
        );
        assert_eq!(
            validate_record(&json!({"service": "cache", "timestamp": "invalid-date"})),
            Err(RecordError::InvalidTimestamp("invalid-date".to_string()))
        );
        assert!(matches!(
            validate_record(&json!({"service": "cache", "timestamp": 1754301600})),
            Err(RecordError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn parses_offsets_into_utc() {
        assert_eq!(
            parse_timestamp("2025-08-04T12:00:00+02:00"),
            Some(at(10, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2025-08-04T10:00:00.500Z").map(|t| t.timestamp_subsec_millis()),
            Some(500)
        );
    }

    #[test]
    fn parses_offsetless_layouts_as_utc() {
        assert_eq!(parse_timestamp("2025-08-04T10:00:00"), Some(at(10, 0, 0)));
        assert_eq!(parse_timestamp("2025-08-04 10:00:30"), Some(at(10, 0, 30)));
        assert_eq!(parse_timestamp("2025-08-04T10:05"), Some(at(10, 5, 0)));
        assert_eq!(parse_timestamp("2025-08-04"), Some(at(0, 0, 0)));
    }

    #[test]
    fn parses_loose_offsets() {
        assert_eq!(parse_timestamp("2025-08-04T10:00Z"), Some(at(10, 0, 0)));
        assert_eq!(parse_timestamp("2025-08-04T12:30+02:00"), Some(at(10, 30, 0)));
        assert_eq!(parse_timestamp("2025-08-04T10:00:00+0000"), Some(at(10, 0, 0)));
        assert_eq!(parse_timestamp("2025-08-04T07:00:00-0300"), Some(at(10, 0, 0)));
        assert_eq!(parse_timestamp("2025-08-04T12:00:00+02"), Some(at(10, 0, 0)));
        assert_eq!(parse_timestamp("2025-08-04 10:00:15Z"), Some(at(10, 0, 15)));
        assert_eq!(
            parse_timestamp("2025-08-04T10:00:00.250+0000").map(|t| t.timestamp_subsec_millis()),
            Some(250)
        );
    }

    #[test]
    fn parses_rfc2822() {
        assert_eq!(
            parse_timestamp("Mon, 04 Aug 2025 10:00:00 GMT"),
            Some(at(10, 0, 0))
        );
        assert_eq!(
            parse_timestamp("Mon, 4 Aug 2025 12:00:00 +0200"),
            Some(at(10, 0, 0))
        );
        // Weekday must agree with the date.
        assert_eq!(parse_timestamp("Tue, 04 Aug 2025 10:00:00 GMT"), None);
    }

    #[test]
    fn loose_forms_count_as_valid_records() {
        let event =
            validate_record(&json!({"service": "email", "timestamp": "2025-08-04T10:01Z"}))
                .unwrap();
        assert_eq!(event.timestamp, at(10, 1, 0));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(parse_timestamp("2025-02-30T10:00:00Z"), None);
        assert_eq!(parse_timestamp("10:00"), None);
    }
}
