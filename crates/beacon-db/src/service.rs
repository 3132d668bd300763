//! The store service: database access plus the insert hubs.
//!
//! `BeaconStore` wraps `BeaconDb` and one `tokio::sync::broadcast` sender per
//! published table. All repo methods are implemented as `impl BeaconStore`
//! blocks in `repos/`. Every successful alert or citation insert is published
//! so that open [`AlertSubscription`]s and [`CitationSubscription`]s receive it.

use beacon_core::entities::{Alert, Citation};
use beacon_core::identity::AuthIdentity;
use beacon_core::subscription::{
    AlertInsert, AlertSubscription, CitationInsert, CitationSubscription,
};
use tokio::sync::broadcast;

use crate::BeaconDb;
use crate::error::DatabaseError;

/// Default number of inserts buffered per subscriber.
pub const DEFAULT_ALERT_CHANNEL_CAPACITY: usize = 64;

pub struct BeaconStore {
    db: BeaconDb,
    alerts_tx: broadcast::Sender<AlertInsert>,
    citations_tx: broadcast::Sender<CitationInsert>,
}

impl BeaconStore {
    /// Open a store backed by a local database file (or `":memory:"`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(
        db_path: &str,
        alert_channel_capacity: usize,
    ) -> Result<Self, DatabaseError> {
        let db = BeaconDb::open_local(db_path).await?;
        Ok(Self::from_db(db, alert_channel_capacity))
    }

    /// Create from an existing `BeaconDb`. Both hubs buffer
    /// `channel_capacity` inserts per subscriber.
    #[must_use]
    pub fn from_db(db: BeaconDb, channel_capacity: usize) -> Self {
        let (alerts_tx, _) = broadcast::channel(channel_capacity.max(1));
        let (citations_tx, _) = broadcast::channel(channel_capacity.max(1));
        Self {
            db,
            alerts_tx,
            citations_tx,
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &BeaconDb {
        &self.db
    }

    /// Open a standing subscription to alerts inserted for `user`.
    #[must_use]
    pub fn subscribe_alerts(&self, user: &AuthIdentity) -> AlertSubscription {
        AlertSubscription::new(user.user_id.clone(), self.alerts_tx.subscribe())
    }

    /// Open a standing subscription to citations recorded for `user`.
    #[must_use]
    pub fn subscribe_citations(&self, user: &AuthIdentity) -> CitationSubscription {
        CitationSubscription::new(user.user_id.clone(), self.citations_tx.subscribe())
    }

    /// Number of open alert subscriptions across all users.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.alerts_tx.receiver_count()
    }

    /// Number of open citation subscriptions across all users.
    #[must_use]
    pub fn citation_subscriber_count(&self) -> usize {
        self.citations_tx.receiver_count()
    }

    /// Announce an inserted alert. Having no subscribers is not an error.
    pub(crate) fn publish_alert(&self, user_id: &str, alert: &Alert) {
        let delivered = self
            .alerts_tx
            .send(AlertInsert {
                user_id: user_id.to_string(),
                record: alert.clone(),
            })
            .unwrap_or(0);
        tracing::debug!(alert_id = %alert.id, delivered, "published alert insert");
    }

    pub(crate) fn publish_citation(&self, user_id: &str, citation: &Citation) {
        let delivered = self
            .citations_tx
            .send(CitationInsert {
                user_id: user_id.to_string(),
                record: citation.clone(),
            })
            .unwrap_or(0);
        tracing::debug!(citation_id = %citation.id, delivered, "published citation insert");
    }
}
