use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-user brand configuration. Gap analysis requires one to exist.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserSettings {
    pub user_id: String,
    pub brand_name: String,
    pub slack_webhook_url: Option<String>,
    pub email_notifications: bool,
    pub updated_at: DateTime<Utc>,
}
