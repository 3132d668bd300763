//! The citation store gateway contract.
//!
//! Everything the insight components need from the hosted store goes through
//! [`CitationGateway`]. Every method takes the caller's identity explicitly;
//! there is no ambient session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Alert, Citation, NewAlert, UserSettings};
use crate::enums::Engine;
use crate::errors::GatewayError;
use crate::identity::AuthIdentity;
use crate::subscription::{AlertSubscription, CitationSubscription};

/// Filter criteria for citation reads. Unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationFilter {
    pub engine: Option<Engine>,
    pub is_competitor: Option<bool>,
    /// Exact, case-sensitive match on the query text.
    pub query: Option<String>,
    /// Only citations created at or after this instant.
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
}

impl CitationFilter {
    /// Citations of competitor brands.
    #[must_use]
    pub fn competitors() -> Self {
        Self {
            is_competitor: Some(true),
            ..Self::default()
        }
    }

    /// Own-brand citations for one exact query.
    #[must_use]
    pub fn own_for_query(query: &str) -> Self {
        Self {
            is_competitor: Some(false),
            query: Some(query.to_string()),
            ..Self::default()
        }
    }

    /// All citations created at or after `since`.
    #[must_use]
    pub fn since(since: DateTime<Utc>) -> Self {
        Self {
            since: Some(since),
            ..Self::default()
        }
    }
}

/// Partial update for a stored alert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

impl AlertUpdate {
    #[must_use]
    pub const fn mark_read() -> Self {
        Self {
            is_read: Some(true),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_read.is_none()
    }
}

/// Read/write/subscribe access to a user's citation data.
///
/// Updates and deletes of missing alert IDs succeed; last write wins.
#[allow(async_fn_in_trait)]
pub trait CitationGateway {
    /// Citations matching `filter`, newest first.
    async fn query_citations(
        &self,
        user: &AuthIdentity,
        filter: &CitationFilter,
    ) -> Result<Vec<Citation>, GatewayError>;

    /// Number of citations matching `filter` (`limit` is ignored).
    async fn count_citations(
        &self,
        user: &AuthIdentity,
        filter: &CitationFilter,
    ) -> Result<u64, GatewayError>;

    /// Most recent alerts, newest first, at most `limit`.
    async fn list_alerts(&self, user: &AuthIdentity, limit: u32)
    -> Result<Vec<Alert>, GatewayError>;

    /// Store an alert and announce it to subscribers.
    async fn insert_alert(
        &self,
        user: &AuthIdentity,
        alert: &NewAlert,
    ) -> Result<Alert, GatewayError>;

    async fn update_alert(
        &self,
        user: &AuthIdentity,
        alert_id: &str,
        update: &AlertUpdate,
    ) -> Result<(), GatewayError>;

    async fn delete_alert(&self, user: &AuthIdentity, alert_id: &str) -> Result<(), GatewayError>;

    /// Open a standing subscription to alerts inserted for `user`.
    fn subscribe_alerts(&self, user: &AuthIdentity) -> AlertSubscription;

    /// Open a standing subscription to citations recorded for `user`.
    fn subscribe_citations(&self, user: &AuthIdentity) -> CitationSubscription;

    /// Brand settings, or `None` when the user has not configured any.
    async fn get_user_settings(
        &self,
        user: &AuthIdentity,
    ) -> Result<Option<UserSettings>, GatewayError>;
}
