//! JSON codec for downstream bodies
//!
//! Timestamp handling is explicit configuration handed to each adapter at
//! construction instead of process-wide mapper state.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How timezone-aware timestamps in backend bodies are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampMode {
    /// Keep the offset the backend sent (`+03:00` stays `+03:00`).
    #[default]
    Preserve,
    /// Rewrite every RFC 3339 timestamp to UTC before decoding.
    Utc,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    timestamps: TimestampMode,
}

impl JsonCodec {
    pub fn new(timestamps: TimestampMode) -> Self {
        Self { timestamps }
    }

    pub fn timestamps(&self) -> TimestampMode {
        self.timestamps
    }

    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, serde_json::Error> {
        match self.timestamps {
            TimestampMode::Preserve => serde_json::from_slice(body),
            TimestampMode::Utc => {
                let mut value: Value = serde_json::from_slice(body)?;
                normalize_to_utc(&mut value);
                serde_json::from_value(value)
            }
        }
    }

    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(value)
    }
}

/// Only strings that parse as full RFC 3339 date-times are touched, with or
/// without a trailing `[Zone/Id]`. Timestamps without an offset stay as sent.
fn normalize_to_utc(value: &mut Value) {
    match value {
        Value::String(text) => {
            if let Ok(ts) = DateTime::parse_from_rfc3339(strip_zone_id(text)) {
                *text = ts
                    .with_timezone(&Utc)
                    .to_rfc3339_opts(SecondsFormat::AutoSi, true);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_to_utc),
        Value::Object(fields) => fields.values_mut().for_each(normalize_to_utc),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

fn strip_zone_id(text: &str) -> &str {
    match text.strip_suffix(']').and_then(|rest| rest.rsplit_once('[')) {
        Some((stamp, _zone)) => stamp,
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    const BODY: &[u8] = br#"{
        "externalId": "5f0c2a4e-7c1b-4b8a-9e0f-2d4b6a8c1e3f",
        "firstName": "Anna",
        "creationDate": "2026-10-16T10:00:00+03:00",
        "history": [{"at": "2026-10-15T23:30:00.250-02:00"}]
    }"#;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Stamped {
        creation_date: DateTime<FixedOffset>,
    }

    #[test]
    fn test_preserve_keeps_offset() {
        let codec = JsonCodec::default();
        assert_eq!(codec.timestamps(), TimestampMode::Preserve);
        let decoded: Stamped = codec.decode(BODY).unwrap();
        assert_eq!(decoded.creation_date.offset().local_minus_utc(), 3 * 3600);
        assert_eq!(
            decoded.creation_date.to_rfc3339(),
            "2026-10-16T10:00:00+03:00"
        );
    }

    #[test]
    fn test_utc_rewrites_nested_timestamps() {
        let codec = JsonCodec::new(TimestampMode::Utc);
        let decoded: Value = codec.decode(BODY).unwrap();
        assert_eq!(decoded["creationDate"], "2026-10-16T07:00:00Z");
        assert_eq!(decoded["history"][0]["at"], "2026-10-16T01:30:00.250Z");
        // Non-timestamp strings are untouched
        assert_eq!(
            decoded["externalId"],
            "5f0c2a4e-7c1b-4b8a-9e0f-2d4b6a8c1e3f"
        );
        assert_eq!(decoded["firstName"], "Anna");
    }

    #[test]
    fn test_utc_mode_same_instant() {
        let preserve: Stamped = JsonCodec::default().decode(BODY).unwrap();
        let utc: Stamped = JsonCodec::new(TimestampMode::Utc).decode(BODY).unwrap();
        assert_eq!(preserve.creation_date, utc.creation_date);
        assert_eq!(utc.creation_date.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_preserve_leaves_values_as_sent() {
        let body = br#"{"a":"2026-10-16T10:00:00Z","b":"2026-10-16T10:00:00","c":"2026-10-16T10:00:00+03:00[Europe/Moscow]"}"#;
        let decoded: Value = JsonCodec::default().decode(body).unwrap();
        assert_eq!(decoded["a"], "2026-10-16T10:00:00Z");
        assert_eq!(decoded["b"], "2026-10-16T10:00:00");
        assert_eq!(decoded["c"], "2026-10-16T10:00:00+03:00[Europe/Moscow]");
    }

    #[test]
    fn test_utc_handles_zone_ids_and_skips_local_times() {
        let body = br#"{"zoned":"2026-10-16T10:00:00+03:00[Europe/Moscow]","local":"2026-10-16T10:00:00","tag":"[x]"}"#;
        let decoded: Value = JsonCodec::new(TimestampMode::Utc).decode(body).unwrap();
        assert_eq!(decoded["zoned"], "2026-10-16T07:00:00Z");
        assert_eq!(decoded["local"], "2026-10-16T10:00:00");
        assert_eq!(decoded["tag"], "[x]");
    }

    #[test]
    fn test_decode_error() {
        let codec = JsonCodec::default();
        assert!(codec.decode::<Value>(b"not json").is_err());
    }

    #[test]
    fn test_mode_deserializes_lowercase() {
        let mode: TimestampMode = serde_yaml::from_str("utc").unwrap();
        assert_eq!(mode, TimestampMode::Utc);
    }
}
