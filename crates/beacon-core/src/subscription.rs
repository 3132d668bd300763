//! Cancellable push subscriptions for newly inserted records.
//!
//! Stores publish every alert and citation insert on a
//! `tokio::sync::broadcast` channel as an [`Insert`]. A [`Subscription`]
//! holds one receiver, keeps only the inserts addressed to its user, and is
//! released with [`Subscription::close`].

use tokio::sync::broadcast::{self, error::RecvError};

use crate::entities::{Alert, Citation};

/// One insert as published by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insert<T> {
    pub user_id: String,
    pub record: T,
}

pub type AlertInsert = Insert<Alert>;
pub type CitationInsert = Insert<Citation>;

/// A standing subscription to inserts for a single user.
#[derive(Debug)]
pub struct Subscription<T> {
    user_id: String,
    receiver: Option<broadcast::Receiver<Insert<T>>>,
}

/// Drift alerts inserted for one user.
pub type AlertSubscription = Subscription<Alert>;
/// Citations recorded for one user.
pub type CitationSubscription = Subscription<Citation>;

impl<T: Clone> Subscription<T> {
    #[must_use]
    pub fn new(user_id: impl Into<String>, receiver: broadcast::Receiver<Insert<T>>) -> Self {
        Self {
            user_id: user_id.into(),
            receiver: Some(receiver),
        }
    }

    /// User whose inserts this subscription delivers.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Wait for the next record inserted for this user.
    ///
    /// Returns `None` once the subscription is closed or the publishing side
    /// has gone away. Inserts lost to a lagging receiver are skipped with a warning.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            let receiver = self.receiver.as_mut()?;
            match receiver.recv().await {
                Ok(insert) if insert.user_id == self.user_id => return Some(insert.record),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        skipped,
                        user_id = %self.user_id,
                        "subscription lagged; inserts were skipped"
                    );
                }
                Err(RecvError::Closed) => {
                    self.receiver = None;
                    return None;
                }
            }
        }
    }

    /// Release the receiver. Nothing is delivered afterwards.
    pub fn close(&mut self) {
        if self.receiver.take().is_some() {
            tracing::debug!(user_id = %self.user_id, "subscription closed");
        }
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.receiver.is_none()
    }
}
