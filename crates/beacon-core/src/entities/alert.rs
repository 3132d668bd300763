use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AlertState, Severity};

/// A server-detected change in citation patterns.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Alert {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub alert_type: String,
    pub query: Option<String>,
    pub competitor_name: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub is_read: bool,
}

impl Alert {
    /// Lifecycle state as seen by a feed holding this alert.
    #[must_use]
    pub const fn state(&self) -> AlertState {
        if self.is_read {
            AlertState::Read
        } else {
            AlertState::Unread
        }
    }

    /// Text shown when the alert is announced.
    #[must_use]
    pub fn headline(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("Citation drift detected")
    }
}

/// Payload for inserting a drift alert.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewAlert {
    pub alert_type: String,
    pub query: Option<String>,
    pub competitor_name: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub severity: Severity,
}
