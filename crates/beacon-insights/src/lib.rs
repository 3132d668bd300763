//! # beacon-insights
//!
//! Dashboard logic for Beacon, layered over a [`CitationGateway`].
//!
//! - [`share`]: per-engine recommendation share and trend over a trailing window
//! - [`gaps`]: queries where competitors are cited and the tracked brand is not
//! - [`feed`]: the locally materialized drift alert list and its live subscription
//!
//! Computation is pure once data is fetched; only the gateway calls suspend.
//!
//! [`CitationGateway`]: beacon_core::gateway::CitationGateway

pub mod error;
pub mod feed;
pub mod gaps;
pub mod share;
#[cfg(test)]
mod test_support;

pub use error::{InsightError, NotifyError};
pub use feed::{AlertFeed, Delivery, LoadOutcome, LoadTicket, filter_unread};
pub use gaps::{analyze_gaps, find_gaps, opportunity_score};
pub use share::{ShareBoard, ShareWindow, compute_shares, summarize};
