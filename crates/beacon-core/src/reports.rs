//! Derived, ephemeral report types.
//!
//! Recomputed on every analysis run and never persisted. Set-valued fields use
//! `BTreeSet` so exported order is sorted and stable.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Engine, Trend};

/// Recommendation share of the tracked brand on one engine.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EngineShare {
    pub engine: Engine,
    /// Own citations as a percentage of all citations for the engine, in `[0, 100]`.
    pub share_percent: f64,
    /// Own citations for the engine.
    pub citation_count: u32,
    /// All citations (own and competitor) for the engine.
    pub total_count: u32,
    pub trend: Trend,
    /// Absolute change in percentage points between the older and recent window.
    pub change_magnitude: f64,
}

impl EngineShare {
    /// An engine with no citations in the window.
    #[must_use]
    pub const fn empty(engine: Engine) -> Self {
        Self {
            engine,
            share_percent: 0.0,
            citation_count: 0,
            total_count: 0,
            trend: Trend::Stable,
            change_magnitude: 0.0,
        }
    }
}

/// Share across every engine taken together.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ShareSummary {
    pub share_percent: f64,
    pub own_count: u32,
    pub total_count: u32,
    pub engines: Vec<EngineShare>,
}

/// A query where competitors are cited and the tracked brand is not.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GapCandidate {
    pub query: String,
    /// Number of competitor citation records for the query.
    pub competitor_count: u32,
    pub competitor_names: BTreeSet<String>,
    pub competitor_urls: BTreeSet<String>,
    pub engines: BTreeSet<Engine>,
    /// `competitor_count * engines.len() * 10`.
    pub opportunity_score: u64,
}
