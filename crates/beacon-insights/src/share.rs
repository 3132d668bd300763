//! Per-engine recommendation share and trend.
//!
//! [`compute_shares`] is a pure function over an already windowed record set.
//! [`ShareBoard`] fetches that window from a gateway and keeps the last good
//! result when a refresh fails. With a citation subscription open it
//! refreshes once per recorded citation until [`ShareBoard::close`].

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use beacon_config::AnalysisConfig;
use beacon_core::entities::Citation;
use beacon_core::enums::{Engine, Trend};
use beacon_core::gateway::{CitationFilter, CitationGateway};
use beacon_core::identity::AuthIdentity;
use beacon_core::reports::{EngineShare, ShareSummary};
use beacon_core::subscription::CitationSubscription;

use crate::error::InsightError;

/// Trailing window and trend split used for share computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShareWindow {
    /// Length of the trailing window fetched from the store.
    pub window: Duration,
    /// Records newer than `now - recent` form the recent sub-window.
    pub recent: Duration,
    /// Change in percentage points beyond which a trend is up or down.
    pub threshold: f64,
}

impl Default for ShareWindow {
    fn default() -> Self {
        Self {
            window: Duration::days(7),
            recent: Duration::days(3),
            threshold: 5.0,
        }
    }
}

impl From<&AnalysisConfig> for ShareWindow {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            window: Duration::days(i64::from(config.window_days)),
            recent: Duration::days(i64::from(config.recent_days)),
            threshold: config.trend_threshold,
        }
    }
}

impl ShareWindow {
    /// Start of the trailing window ending at `now`.
    #[must_use]
    pub fn since(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.window
    }
}

/// Own and total counts for one engine, overall and per sub-window.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    own: u32,
    total: u32,
    recent_own: u32,
    recent_total: u32,
    older_own: u32,
    older_total: u32,
}

impl Tally {
    fn add(own: &mut u32, total: &mut u32, is_own: bool) {
        *total = total.saturating_add(1);
        if is_own {
            *own = own.saturating_add(1);
        }
    }
}

/// `own / total * 100`, or `0` when there is nothing to divide by.
fn percent(own: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(own) / f64::from(total) * 100.0
    }
}

/// Compute one [`EngineShare`] per entry in `engines`, in that order.
///
/// `records` must already be limited to the trailing window; nothing is
/// filtered out here. Records newer than `now - window.recent` count toward
/// the recent share, those between `now - window.window` and
/// `now - window.recent` (inclusive) toward the older share. Engines with no
/// records come back as zero and stable.
#[must_use]
pub fn compute_shares(
    records: &[Citation],
    engines: &[Engine],
    now: DateTime<Utc>,
    window: &ShareWindow,
) -> Vec<EngineShare> {
    let recent_start = now - window.recent;
    let older_start = now - window.window;

    let mut tallies: HashMap<Engine, Tally> = HashMap::new();
    for record in records {
        let tally = tallies.entry(record.engine).or_default();
        let is_own = !record.is_competitor;
        Tally::add(&mut tally.own, &mut tally.total, is_own);
        if record.created_at > recent_start {
            Tally::add(&mut tally.recent_own, &mut tally.recent_total, is_own);
        } else if record.created_at >= older_start {
            Tally::add(&mut tally.older_own, &mut tally.older_total, is_own);
        }
    }

    engines
        .iter()
        .map(|&engine| {
            let Some(tally) = tallies.get(&engine) else {
                return EngineShare::empty(engine);
            };
            let change = percent(tally.recent_own, tally.recent_total)
                - percent(tally.older_own, tally.older_total);
            EngineShare {
                engine,
                share_percent: percent(tally.own, tally.total),
                citation_count: tally.own,
                total_count: tally.total,
                trend: Trend::classify(change, window.threshold),
                change_magnitude: change.abs(),
            }
        })
        .collect()
}

/// Overall share across every engine in `shares`.
#[must_use]
pub fn summarize(shares: &[EngineShare]) -> ShareSummary {
    let own_count = shares
        .iter()
        .fold(0u32, |acc, s| acc.saturating_add(s.citation_count));
    let total_count = shares
        .iter()
        .fold(0u32, |acc, s| acc.saturating_add(s.total_count));
    ShareSummary {
        share_percent: percent(own_count, total_count),
        own_count,
        total_count,
        engines: shares.to_vec(),
    }
}

/// The dashboard's share panel: last computed shares plus refresh.
#[derive(Debug)]
pub struct ShareBoard {
    window: ShareWindow,
    engines: Vec<Engine>,
    shares: Vec<EngineShare>,
    refreshed_at: Option<DateTime<Utc>>,
    subscription: Option<CitationSubscription>,
    closed: bool,
}

impl ShareBoard {
    /// A board with every engine at zero until the first refresh.
    #[must_use]
    pub fn new(window: ShareWindow, engines: Vec<Engine>) -> Self {
        let shares = engines.iter().map(|&e| EngineShare::empty(e)).collect();
        Self {
            window,
            engines,
            shares,
            refreshed_at: None,
            subscription: None,
            closed: false,
        }
    }

    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(ShareWindow::from(config), config.engines.clone())
    }

    #[must_use]
    pub fn shares(&self) -> &[EngineShare] {
        &self.shares
    }

    #[must_use]
    pub const fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    #[must_use]
    pub fn summary(&self) -> ShareSummary {
        summarize(&self.shares)
    }

    /// Fetch the trailing window ending at `now` and recompute.
    ///
    /// # Errors
    ///
    /// Returns `InsightError::FetchFailed` if the gateway fails. The
    /// previously computed shares are kept.
    pub async fn refresh<G: CitationGateway>(
        &mut self,
        gateway: &G,
        user: &AuthIdentity,
        now: DateTime<Utc>,
    ) -> Result<&[EngineShare], InsightError> {
        let filter = CitationFilter::since(self.window.since(now));
        let records = match gateway.query_citations(user, &filter).await {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(user_id = %user.user_id, %error, "share refresh failed; keeping last shares");
                return Err(error.into());
            }
        };
        tracing::debug!(user_id = %user.user_id, records = records.len(), "computing engine shares");

        self.shares = compute_shares(&records, &self.engines, now, &self.window);
        self.refreshed_at = Some(now);
        Ok(&self.shares)
    }

    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Listen for citations recorded for `user`.
    ///
    /// Replaces (and closes) any previous subscription. Does nothing on a
    /// closed board.
    pub fn subscribe_citations<G: CitationGateway>(&mut self, gateway: &G, user: &AuthIdentity) {
        if self.closed {
            tracing::debug!(user_id = %user.user_id, "not subscribing a closed share board");
            return;
        }
        if let Some(mut previous) = self.subscription.take() {
            previous.close();
        }
        self.subscription = Some(gateway.subscribe_citations(user));
    }

    /// Wait for the next recorded citation.
    ///
    /// Returns `Ok(None)` once the board is closed.
    ///
    /// # Errors
    ///
    /// Returns `InsightError::SubscriptionDropped` if there is no open
    /// subscription or it ended without [`ShareBoard::close`].
    pub async fn next_citation(&mut self) -> Result<Option<Citation>, InsightError> {
        if self.closed {
            return Ok(None);
        }
        let Some(subscription) = self.subscription.as_mut() else {
            return Err(InsightError::SubscriptionDropped);
        };
        match subscription.recv().await {
            Some(citation) => Ok(Some(citation)),
            None => {
                tracing::warn!(user_id = %subscription.user_id(), "citation subscription dropped");
                self.subscription = None;
                Err(InsightError::SubscriptionDropped)
            }
        }
    }

    /// Wait for the next recorded citation, then refresh the window ending
    /// at the current time.
    ///
    /// Returns `Ok(None)` once the board is closed.
    ///
    /// # Errors
    ///
    /// Returns `InsightError::SubscriptionDropped` as
    /// [`ShareBoard::next_citation`] does, or `InsightError::FetchFailed` if
    /// the refresh fails. A failed refresh leaves the subscription open.
    pub async fn refresh_on_insert<G: CitationGateway>(
        &mut self,
        gateway: &G,
        user: &AuthIdentity,
    ) -> Result<Option<&[EngineShare]>, InsightError> {
        let Some(citation) = self.next_citation().await? else {
            return Ok(None);
        };
        tracing::debug!(citation_id = %citation.id, engine = %citation.engine, "citation recorded; refreshing shares");
        self.refresh(gateway, user, Utc::now()).await.map(Some)
    }

    /// Release the subscription. Later waits return `Ok(None)`. Idempotent.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Some(mut subscription) = self.subscription.take() {
            subscription.close();
        }
        tracing::debug!("share board closed");
    }
}
