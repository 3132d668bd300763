use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Engine;

/// One recorded instance of an engine's answer naming a brand.
///
/// Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Citation {
    pub id: String,
    pub engine: Engine,
    pub brand_name: String,
    /// The prompt the engine answered, verbatim.
    pub query: String,
    pub citation_url: Option<String>,
    pub is_competitor: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for recording a citation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewCitation {
    pub engine: Engine,
    pub brand_name: String,
    pub query: String,
    pub citation_url: Option<String>,
    pub is_competitor: bool,
    /// Defaults to the insert time.
    pub created_at: Option<DateTime<Utc>>,
}
