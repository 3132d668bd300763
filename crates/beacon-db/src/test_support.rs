//! Shared test utilities for beacon-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use beacon_core::entities::{NewAlert, NewCitation};
    use beacon_core::enums::{Engine, Severity};
    use beacon_core::identity::AuthIdentity;

    use crate::service::{BeaconStore, DEFAULT_ALERT_CHANNEL_CAPACITY};

    /// Create an in-memory store.
    pub async fn test_store() -> BeaconStore {
        BeaconStore::new_local(":memory:", DEFAULT_ALERT_CHANNEL_CAPACITY)
            .await
            .unwrap()
    }

    pub fn user(id: &str) -> AuthIdentity {
        AuthIdentity::new(id)
    }

    pub fn new_citation(engine: Engine, brand: &str, query: &str, is_competitor: bool) -> NewCitation {
        NewCitation {
            engine,
            brand_name: brand.to_string(),
            query: query.to_string(),
            citation_url: None,
            is_competitor,
            created_at: None,
        }
    }

    pub fn new_alert(alert_type: &str, severity: Severity) -> NewAlert {
        NewAlert {
            alert_type: alert_type.to_string(),
            severity,
            ..NewAlert::default()
        }
    }
}
