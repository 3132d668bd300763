//! Database error types for beacon-db.

use beacon_core::errors::GatewayError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned undecodable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Input rejected before touching the database.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<DatabaseError> for GatewayError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Query(_) | DatabaseError::NoResult => {
                Self::InvalidRecord(error.to_string())
            }
            DatabaseError::Validation(reason) => Self::InvalidRequest(reason),
            DatabaseError::Migration(_) | DatabaseError::LibSql(_) | DatabaseError::Other(_) => {
                Self::Store(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_invalid_request() {
        let err: GatewayError = DatabaseError::Validation("brand_name is empty".into()).into();
        assert_eq!(err, GatewayError::InvalidRequest("brand_name is empty".into()));
    }

    #[test]
    fn decode_failures_map_to_invalid_record() {
        let err: GatewayError = DatabaseError::Query("bad engine".into()).into();
        assert!(matches!(err, GatewayError::InvalidRecord(_)));
    }
}
