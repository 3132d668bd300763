//! Serde roundtrip and schema generation tests for stored and derived types.

use std::collections::BTreeSet;

use beacon_core::entities::*;
use beacon_core::enums::*;
use beacon_core::reports::*;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use schemars::schema_for;

macro_rules! roundtrip {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(recovered, val, "serde roundtrip failed for {}", stringify!($ty));

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            assert!(
                schema.get("properties").is_some(),
                "schema for {} should describe an object",
                stringify!($ty)
            );
        }
    };
}

roundtrip!(
    citation_roundtrip,
    Citation,
    Citation {
        id: "cit-a3f8b2c1".into(),
        engine: Engine::Gemini,
        brand_name: "Acme".into(),
        query: "best crm for startups".into(),
        citation_url: Some("https://acme.example/crm".into()),
        is_competitor: true,
        created_at: Utc.with_ymd_and_hms(2026, 10, 1, 9, 30, 0).unwrap(),
    }
);

roundtrip!(
    alert_roundtrip,
    Alert,
    Alert {
        id: "alr-a3f8b2c1".into(),
        created_at: Utc.with_ymd_and_hms(2026, 10, 2, 9, 30, 0).unwrap(),
        alert_type: "competitor_gain".into(),
        query: Some("best crm".into()),
        competitor_name: Some("Acme".into()),
        message: None,
        severity: Severity::High,
        is_read: true,
    }
);

roundtrip!(
    settings_roundtrip,
    UserSettings,
    UserSettings {
        user_id: "user-1".into(),
        brand_name: "Beacon".into(),
        slack_webhook_url: None,
        email_notifications: true,
        updated_at: Utc.with_ymd_and_hms(2026, 10, 3, 0, 0, 0).unwrap(),
    }
);

roundtrip!(
    competitor_roundtrip,
    Competitor,
    Competitor {
        id: "cmp-a3f8b2c1".into(),
        competitor_name: "Acme".into(),
        competitor_domain: Some("acme.example".into()),
        created_at: Utc.with_ymd_and_hms(2026, 10, 3, 0, 0, 0).unwrap(),
    }
);

roundtrip!(
    gap_candidate_roundtrip,
    GapCandidate,
    GapCandidate {
        query: "best tool".into(),
        competitor_count: 2,
        competitor_names: BTreeSet::from(["A".to_string(), "B".to_string()]),
        competitor_urls: BTreeSet::new(),
        engines: BTreeSet::from([Engine::Chatgpt, Engine::Gemini]),
        opportunity_score: 40,
    }
);

roundtrip!(
    engine_share_roundtrip,
    EngineShare,
    EngineShare {
        engine: Engine::Claude,
        share_percent: 62.5,
        citation_count: 5,
        total_count: 8,
        trend: Trend::Up,
        change_magnitude: 12.5,
    }
);

#[test]
fn gap_candidate_exports_sets_as_sorted_arrays() {
    let gap = GapCandidate {
        query: "q".into(),
        competitor_count: 3,
        competitor_names: BTreeSet::from(["Zed".to_string(), "Acme".to_string()]),
        competitor_urls: BTreeSet::new(),
        engines: BTreeSet::from([Engine::Claude, Engine::Perplexity]),
        opportunity_score: 60,
    };
    let json = serde_json::to_value(&gap).unwrap();
    assert_eq!(json["competitor_names"], serde_json::json!(["Acme", "Zed"]));
    assert_eq!(json["engines"], serde_json::json!(["perplexity", "claude"]));
}
