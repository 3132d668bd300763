use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_timestamp(raw: &str, field: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

#[cfg(test)]
mod tests {
    use beacon_core::enums::Engine;
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parses_engine_case_insensitively() {
        let engine: Engine = parse_enum("ChatGPT", "engine").expect("engine should parse");
        assert_eq!(engine, Engine::Chatgpt);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<Engine>("altavista", "engine").expect_err("should fail");
        assert!(err.to_string().contains("invalid engine 'altavista'"));
    }

    #[test]
    fn timestamps_convert_to_utc() {
        let parsed = parse_timestamp("2026-10-01T14:00:00+02:00", "at").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap());
        assert!(parse_timestamp("yesterday", "at").is_err());
    }
}
