use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Authenticated user identity, passed explicitly into every store call.
///
/// Produced by whatever authenticates the caller (the CLI takes it from
/// `--user` or `general.user_id`). Contains only data fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct AuthIdentity {
    /// Stable user ID; every stored row is keyed by it.
    pub user_id: String,
    /// Contact email, when known.
    pub email: Option<String>,
}

impl AuthIdentity {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
        }
    }
}
