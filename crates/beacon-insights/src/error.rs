//! Insight error types for beacon-insights.

use beacon_core::errors::GatewayError;
use thiserror::Error;

/// Failures surfaced by the insight components.
///
/// Pure computations never produce these; only operations that touch the
/// gateway do.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InsightError {
    /// The user has no brand settings, so gap analysis cannot run.
    #[error("brand settings are not configured for user {user_id}")]
    SetupRequired { user_id: String },

    /// The gateway returned an error or could not be reached. Local state is unchanged.
    #[error("fetch failed: {0}")]
    FetchFailed(#[from] GatewayError),

    /// An insert subscription ended without being closed.
    #[error("insert subscription dropped")]
    SubscriptionDropped,
}

/// Error returned by a new-alert notification callback.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("notification failed: {message}")]
pub struct NotifyError {
    pub message: String,
}

impl NotifyError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_required_names_the_user() {
        let err = InsightError::SetupRequired {
            user_id: "alice".into(),
        };
        assert_eq!(
            err.to_string(),
            "brand settings are not configured for user alice"
        );
    }

    #[test]
    fn gateway_errors_become_fetch_failed() {
        let err: InsightError = GatewayError::Store("timeout".into()).into();
        assert_eq!(
            err,
            InsightError::FetchFailed(GatewayError::Store("timeout".into()))
        );
        assert_eq!(err.to_string(), "fetch failed: Store request failed: timeout");
    }
}
