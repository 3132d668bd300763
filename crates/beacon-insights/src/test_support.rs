//! In-memory `CitationGateway` for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::broadcast;

use beacon_core::entities::{Alert, Citation, NewAlert, UserSettings};
use beacon_core::enums::{Engine, Severity};
use beacon_core::errors::GatewayError;
use beacon_core::gateway::{AlertUpdate, CitationFilter, CitationGateway};
use beacon_core::identity::AuthIdentity;
use beacon_core::subscription::{
    AlertInsert, AlertSubscription, CitationInsert, CitationSubscription,
};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id(prefix: &str) -> String {
    format!("{prefix}-{:08x}", NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

pub fn citation(
    engine: Engine,
    brand: &str,
    query: &str,
    is_competitor: bool,
    created_at: DateTime<Utc>,
) -> Citation {
    Citation {
        id: next_id("cit"),
        engine,
        brand_name: brand.to_string(),
        query: query.to_string(),
        citation_url: None,
        is_competitor,
        created_at,
    }
}

pub fn alert(id: &str, minutes_ago: i64) -> Alert {
    Alert {
        id: id.to_string(),
        created_at: Utc::now() - Duration::minutes(minutes_ago),
        alert_type: "competitor_gain".to_string(),
        query: Some("best tool".to_string()),
        competitor_name: Some("Acme".to_string()),
        message: None,
        severity: Severity::Medium,
        is_read: false,
    }
}

/// Gateway over plain vectors, with switchable failure and call counters.
pub struct MemoryGateway {
    citations: Mutex<Vec<(String, Citation)>>,
    alerts: Mutex<Vec<(String, Alert)>>,
    settings: Mutex<HashMap<String, UserSettings>>,
    failure: Mutex<Option<String>>,
    count_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    alerts_tx: broadcast::Sender<AlertInsert>,
    citations_tx: broadcast::Sender<CitationInsert>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        let (alerts_tx, _) = broadcast::channel(16);
        let (citations_tx, _) = broadcast::channel(16);
        Self {
            citations: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
            settings: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
            count_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            alerts_tx,
            citations_tx,
        }
    }

    /// Store a citation without announcing it.
    pub fn add_citation(&self, user_id: &str, citation: Citation) {
        self.citations
            .lock()
            .unwrap()
            .push((user_id.to_string(), citation));
    }

    /// Store a citation and announce it, as a recording store would.
    pub fn record_citation(&self, user_id: &str, citation: Citation) {
        self.add_citation(user_id, citation.clone());
        let _ = self.citations_tx.send(CitationInsert {
            user_id: user_id.to_string(),
            record: citation,
        });
    }

    pub fn set_brand(&self, user_id: &str, brand: &str) {
        self.settings.lock().unwrap().insert(
            user_id.to_string(),
            UserSettings {
                user_id: user_id.to_string(),
                brand_name: brand.to_string(),
                slack_webhook_url: None,
                email_notifications: true,
                updated_at: Utc::now(),
            },
        );
    }

    /// Make every subsequent call fail with `GatewayError::Store(message)`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Store an alert without announcing it.
    pub fn store_alert(&self, user_id: &str, alert: Alert) {
        self.alerts
            .lock()
            .unwrap()
            .push((user_id.to_string(), alert));
    }

    /// Insert through the gateway, which also publishes.
    pub async fn insert_for(&self, user_id: &str, alert_type: &str, severity: Severity) -> Alert {
        let new = NewAlert {
            alert_type: alert_type.to_string(),
            severity,
            ..NewAlert::default()
        };
        self.insert_alert(&AuthIdentity::new(user_id), &new)
            .await
            .unwrap()
    }

    pub fn stored_alert(&self, user_id: &str, alert_id: &str) -> Option<Alert> {
        self.alerts
            .lock()
            .unwrap()
            .iter()
            .find(|(owner, a)| owner == user_id && a.id == alert_id)
            .map(|(_, a)| a.clone())
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn subscriber_count(&self) -> usize {
        self.alerts_tx.receiver_count()
    }

    pub fn citation_subscriber_count(&self) -> usize {
        self.citations_tx.receiver_count()
    }

    fn check(&self) -> Result<(), GatewayError> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(GatewayError::Store(message.clone())),
            None => Ok(()),
        }
    }

    fn matching(&self, user: &AuthIdentity, filter: &CitationFilter) -> Vec<Citation> {
        let mut found: Vec<Citation> = self
            .citations
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| *owner == user.user_id)
            .map(|(_, c)| c)
            .filter(|c| filter.engine.is_none_or(|e| c.engine == e))
            .filter(|c| filter.is_competitor.is_none_or(|v| c.is_competitor == v))
            .filter(|c| filter.query.as_ref().is_none_or(|q| &c.query == q))
            .filter(|c| filter.since.is_none_or(|since| c.created_at >= since))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }
}

impl CitationGateway for MemoryGateway {
    async fn query_citations(
        &self,
        user: &AuthIdentity,
        filter: &CitationFilter,
    ) -> Result<Vec<Citation>, GatewayError> {
        self.check()?;
        let mut found = self.matching(user, filter);
        if let Some(limit) = filter.limit {
            found.truncate(limit as usize);
        }
        Ok(found)
    }

    async fn count_citations(
        &self,
        user: &AuthIdentity,
        filter: &CitationFilter,
    ) -> Result<u64, GatewayError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.matching(user, filter).len() as u64)
    }

    async fn list_alerts(
        &self,
        user: &AuthIdentity,
        limit: u32,
    ) -> Result<Vec<Alert>, GatewayError> {
        self.check()?;
        let mut found: Vec<Alert> = self
            .alerts
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|(owner, _)| *owner == user.user_id)
            .map(|(_, a)| a.clone())
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found.truncate(limit as usize);
        Ok(found)
    }

    async fn insert_alert(
        &self,
        user: &AuthIdentity,
        alert: &NewAlert,
    ) -> Result<Alert, GatewayError> {
        self.check()?;
        let created = Alert {
            id: next_id("alr"),
            created_at: Utc::now(),
            alert_type: alert.alert_type.clone(),
            query: alert.query.clone(),
            competitor_name: alert.competitor_name.clone(),
            message: alert.message.clone(),
            severity: alert.severity,
            is_read: false,
        };
        self.store_alert(&user.user_id, created.clone());
        let _ = self.alerts_tx.send(AlertInsert {
            user_id: user.user_id.clone(),
            record: created.clone(),
        });
        Ok(created)
    }

    async fn update_alert(
        &self,
        user: &AuthIdentity,
        alert_id: &str,
        update: &AlertUpdate,
    ) -> Result<(), GatewayError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if let Some(is_read) = update.is_read {
            for (owner, alert) in self.alerts.lock().unwrap().iter_mut() {
                if *owner == user.user_id && alert.id == alert_id {
                    alert.is_read = is_read;
                }
            }
        }
        Ok(())
    }

    async fn delete_alert(&self, user: &AuthIdentity, alert_id: &str) -> Result<(), GatewayError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.alerts
            .lock()
            .unwrap()
            .retain(|(owner, a)| !(*owner == user.user_id && a.id == alert_id));
        Ok(())
    }

    fn subscribe_alerts(&self, user: &AuthIdentity) -> AlertSubscription {
        AlertSubscription::new(user.user_id.clone(), self.alerts_tx.subscribe())
    }

    fn subscribe_citations(&self, user: &AuthIdentity) -> CitationSubscription {
        CitationSubscription::new(user.user_id.clone(), self.citations_tx.subscribe())
    }

    async fn get_user_settings(
        &self,
        user: &AuthIdentity,
    ) -> Result<Option<UserSettings>, GatewayError> {
        self.check()?;
        Ok(self.settings.lock().unwrap().get(&user.user_id).cloned())
    }
}
