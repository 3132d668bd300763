//! The drift alert feed.
//!
//! [`AlertFeed`] owns one user's locally materialized alert list. It is filled
//! wholesale by a load, grows at the front as subscription inserts arrive, and
//! changes locally only through mark-as-read and delete, both written to the
//! store first.
//!
//! Loads are split into [`AlertFeed::begin_load`] and [`AlertFeed::finish_load`]
//! so that inserts delivered while a fetch is in flight are reconciled by ID
//! when it lands, and a fetch that lands after [`AlertFeed::close`] is
//! discarded.

use std::collections::HashSet;
use std::fmt;

use beacon_core::entities::Alert;
use beacon_core::enums::AlertState;
use beacon_core::errors::GatewayError;
use beacon_core::gateway::{AlertUpdate, CitationGateway};
use beacon_core::identity::AuthIdentity;
use beacon_core::subscription::AlertSubscription;

use crate::error::{InsightError, NotifyError};

/// Callback invoked for each newly delivered alert.
pub type Notifier = Box<dyn FnMut(&Alert) -> Result<(), NotifyError> + Send>;

/// Identifies one in-flight load. Only the most recent ticket is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    generation: u64,
}

/// What [`AlertFeed::finish_load`] did with a fetched list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The list was replaced. `live_kept` inserts that arrived during the
    /// fetch and were missing from it stay at the front.
    Applied { fetched: usize, live_kept: usize },
    /// The feed was closed or a newer load superseded this one.
    Discarded,
}

/// Result of handing one inserted alert to the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Prepended. `notify_error` holds the callback's failure, if any.
    Delivered {
        alert_id: String,
        notify_error: Option<NotifyError>,
    },
    /// Already in the list; nothing changed and no callback ran.
    Duplicate { alert_id: String },
    /// The feed is closed.
    Ignored,
}

/// Local edits made while a load is in flight, replayed onto its result.
#[derive(Debug, Default)]
struct InFlight {
    generation: u64,
    arrived: Vec<Alert>,
    read: HashSet<String>,
    deleted: HashSet<String>,
}

pub struct AlertFeed {
    user: AuthIdentity,
    alerts: Vec<Alert>,
    generation: u64,
    in_flight: Option<InFlight>,
    subscription: Option<AlertSubscription>,
    notifier: Option<Notifier>,
    closed: bool,
}

impl fmt::Debug for AlertFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertFeed")
            .field("user", &self.user.user_id)
            .field("alerts", &self.alerts.len())
            .field("loading", &self.in_flight.is_some())
            .field("subscribed", &self.subscription.is_some())
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl AlertFeed {
    #[must_use]
    pub const fn new(user: AuthIdentity) -> Self {
        Self {
            user,
            alerts: Vec::new(),
            generation: 0,
            in_flight: None,
            subscription: None,
            notifier: None,
            closed: false,
        }
    }

    #[must_use]
    pub const fn user(&self) -> &AuthIdentity {
        &self.user
    }

    /// Current list, newest first.
    #[must_use]
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    #[must_use]
    pub fn unread(&self) -> Vec<&Alert> {
        filter_unread(&self.alerts)
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.alerts.iter().filter(|a| !a.is_read).count()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Fetch the `limit` most recent alerts and replace the list.
    ///
    /// # Errors
    ///
    /// Returns `InsightError::FetchFailed` if the gateway fails; the list is
    /// left as it was.
    pub async fn load_recent<G: CitationGateway>(
        &mut self,
        gateway: &G,
        limit: u32,
    ) -> Result<LoadOutcome, InsightError> {
        let ticket = self.begin_load();
        let result = gateway.list_alerts(&self.user, limit).await;
        self.finish_load(ticket, result)
    }

    /// Mark the start of a fetch. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.in_flight = Some(InFlight {
            generation: self.generation,
            ..InFlight::default()
        });
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Apply the result of the fetch identified by `ticket`.
    ///
    /// The fetched list replaces the local one. Alerts inserted while the
    /// fetch was in flight and absent from it are kept in front, reads and
    /// deletes made meanwhile are replayed, and every ID appears once.
    ///
    /// # Errors
    ///
    /// Returns `InsightError::FetchFailed` when `result` is an error; the
    /// list is left as it was.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Alert>, GatewayError>,
    ) -> Result<LoadOutcome, InsightError> {
        if self.closed {
            tracing::debug!(user_id = %self.user.user_id, "discarding alert load for closed feed");
            return Ok(LoadOutcome::Discarded);
        }
        let current = self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.generation == ticket.generation);
        if !current {
            tracing::debug!(
                user_id = %self.user.user_id,
                generation = ticket.generation,
                "discarding superseded alert load"
            );
            return Ok(LoadOutcome::Discarded);
        }
        let in_flight = self.in_flight.take().unwrap_or_default();

        let fetched = match result {
            Ok(fetched) => fetched,
            Err(error) => {
                tracing::warn!(user_id = %self.user.user_id, %error, "alert load failed; keeping current list");
                return Err(error.into());
            }
        };
        let fetched_count = fetched.len();

        let fetched_ids: HashSet<&str> = fetched.iter().map(|a| a.id.as_str()).collect();
        let live: Vec<Alert> = in_flight
            .arrived
            .into_iter()
            .rev()
            .filter(|a| !fetched_ids.contains(a.id.as_str()))
            .collect();
        let live_kept = live.len();

        let mut seen = HashSet::new();
        let mut merged = Vec::with_capacity(live_kept + fetched_count);
        for mut alert in live.into_iter().chain(fetched) {
            if in_flight.deleted.contains(&alert.id) || !seen.insert(alert.id.clone()) {
                continue;
            }
            if in_flight.read.contains(&alert.id) {
                alert.is_read = true;
            }
            merged.push(alert);
        }

        tracing::debug!(
            user_id = %self.user.user_id,
            fetched = fetched_count,
            live_kept,
            total = merged.len(),
            "alert list reloaded"
        );
        self.alerts = merged;
        Ok(LoadOutcome::Applied {
            fetched: fetched_count,
            live_kept,
        })
    }

    /// Open a standing subscription for this feed's user. Every insert it
    /// delivers is prepended and passed to `on_new_alert`.
    ///
    /// Replaces (and closes) any previous subscription. Does nothing on a
    /// closed feed.
    pub fn subscribe_inserts<G, F>(&mut self, gateway: &G, on_new_alert: F)
    where
        G: CitationGateway,
        F: FnMut(&Alert) -> Result<(), NotifyError> + Send + 'static,
    {
        if self.closed {
            tracing::debug!(user_id = %self.user.user_id, "not subscribing a closed feed");
            return;
        }
        if let Some(mut previous) = self.subscription.take() {
            previous.close();
        }
        self.subscription = Some(gateway.subscribe_alerts(&self.user));
        self.notifier = Some(Box::new(on_new_alert));
    }

    /// Wait for the subscription's next insert and apply it.
    ///
    /// # Errors
    ///
    /// Returns `InsightError::SubscriptionDropped` if there is no open
    /// subscription or it ended without [`AlertFeed::close`]. It is not
    /// reopened automatically.
    pub async fn next_insert(&mut self) -> Result<Delivery, InsightError> {
        if self.closed {
            return Ok(Delivery::Ignored);
        }
        let Some(subscription) = self.subscription.as_mut() else {
            return Err(InsightError::SubscriptionDropped);
        };
        let next = subscription.recv().await;
        match next {
            Some(alert) => Ok(self.apply_insert(alert)),
            None => {
                self.subscription = None;
                tracing::warn!(user_id = %self.user.user_id, "alert subscription dropped");
                Err(InsightError::SubscriptionDropped)
            }
        }
    }

    /// Prepend one inserted alert and notify.
    ///
    /// A failing notifier is logged and reported in the returned
    /// [`Delivery`]; the alert is kept and the subscription stays open.
    pub fn apply_insert(&mut self, alert: Alert) -> Delivery {
        if self.closed {
            return Delivery::Ignored;
        }
        if self.alerts.iter().any(|a| a.id == alert.id) {
            tracing::debug!(alert_id = %alert.id, "ignoring duplicate alert insert");
            return Delivery::Duplicate { alert_id: alert.id };
        }

        if let Some(in_flight) = self.in_flight.as_mut() {
            in_flight.arrived.push(alert.clone());
        }
        let alert_id = alert.id.clone();
        self.alerts.insert(0, alert);

        let notify_error = match self.notifier.as_mut() {
            Some(notify) => notify(&self.alerts[0]).err(),
            None => None,
        };
        if let Some(ref error) = notify_error {
            tracing::warn!(alert_id = %alert_id, %error, "alert notification failed");
        }
        Delivery::Delivered {
            alert_id,
            notify_error,
        }
    }

    /// Mark an alert as read in the store, then locally.
    ///
    /// Already-read alerts are left alone without a store write.
    ///
    /// # Errors
    ///
    /// Returns `InsightError::FetchFailed` if the store write fails; local
    /// state is unchanged.
    pub async fn mark_read<G: CitationGateway>(
        &mut self,
        gateway: &G,
        alert_id: &str,
    ) -> Result<(), InsightError> {
        let local = self.alerts.iter().find(|a| a.id == alert_id);
        if local.is_some_and(|a| !a.state().can_transition_to(AlertState::Read)) {
            return Ok(());
        }

        gateway
            .update_alert(&self.user, alert_id, &AlertUpdate::mark_read())
            .await?;

        if let Some(alert) = self.alerts.iter_mut().find(|a| a.id == alert_id) {
            alert.is_read = true;
        }
        if let Some(in_flight) = self.in_flight.as_mut() {
            in_flight.read.insert(alert_id.to_string());
        }
        Ok(())
    }

    /// Delete an alert from the store, then from the list. Deleting an ID
    /// that is already gone succeeds.
    ///
    /// # Errors
    ///
    /// Returns `InsightError::FetchFailed` if the store delete fails; local
    /// state is unchanged.
    pub async fn delete<G: CitationGateway>(
        &mut self,
        gateway: &G,
        alert_id: &str,
    ) -> Result<(), InsightError> {
        gateway.delete_alert(&self.user, alert_id).await?;

        self.alerts.retain(|a| a.id != alert_id);
        if let Some(in_flight) = self.in_flight.as_mut() {
            in_flight.arrived.retain(|a| a.id != alert_id);
            in_flight.deleted.insert(alert_id.to_string());
        }
        Ok(())
    }

    /// Tear down: release the subscription, drop the notifier, and make any
    /// in-flight load land as discarded. Idempotent.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Some(mut subscription) = self.subscription.take() {
            subscription.close();
        }
        self.notifier = None;
        self.in_flight = None;
        tracing::debug!(user_id = %self.user.user_id, "alert feed closed");
    }
}

/// Unread alerts from `alerts`, in their original order.
#[must_use]
pub fn filter_unread(alerts: &[Alert]) -> Vec<&Alert> {
    alerts.iter().filter(|a| !a.is_read).collect()
}
