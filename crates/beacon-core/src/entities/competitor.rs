use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A competitor brand the user tracks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Competitor {
    pub id: String,
    pub competitor_name: String,
    pub competitor_domain: Option<String>,
    pub created_at: DateTime<Utc>,
}
