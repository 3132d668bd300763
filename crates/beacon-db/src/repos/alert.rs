//! Drift alert repository: insert with publish, list, read-flag update, delete.

use beacon_core::entities::{Alert, NewAlert};
use beacon_core::enums::Severity;
use beacon_core::gateway::AlertUpdate;
use beacon_core::identity::AuthIdentity;
use beacon_core::ids::PREFIX_ALERT;

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_bool, get_opt_string, optional_text, parse_datetime, require_text,
    stored_now,
};
use crate::service::BeaconStore;

pub(crate) const ALERT_COLUMNS: &str =
    "id, created_at, alert_type, query, competitor_name, message, severity, is_read";

/// Decode an alert starting at column `offset` (laid out as `ALERT_COLUMNS`).
pub(crate) fn row_to_alert(row: &libsql::Row, offset: i32) -> Result<Alert, DatabaseError> {
    Ok(Alert {
        id: row.get::<String>(offset)?,
        created_at: parse_datetime(&row.get::<String>(offset + 1)?)?,
        alert_type: row.get::<String>(offset + 2)?,
        query: get_opt_string(row, offset + 3)?,
        competitor_name: get_opt_string(row, offset + 4)?,
        message: get_opt_string(row, offset + 5)?,
        severity: Severity::from_label(get_opt_string(row, offset + 6)?.as_deref()),
        is_read: get_bool(row, offset + 7)?,
    })
}

impl BeaconStore {
    /// Insert an alert for `user` and publish it to open subscriptions.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank alert type, or a
    /// `DatabaseError` if the INSERT fails. Nothing is published on failure.
    pub async fn create_alert(
        &self,
        user: &AuthIdentity,
        alert: &NewAlert,
    ) -> Result<Alert, DatabaseError> {
        let alert_type = require_text("alert_type", &alert.alert_type)?;
        let now = stored_now();
        let id = self.db().generate_id(PREFIX_ALERT).await?;

        let created = Alert {
            id: id.clone(),
            created_at: now,
            alert_type: alert_type.to_string(),
            query: optional_text(alert.query.as_deref()).map(String::from),
            competitor_name: optional_text(alert.competitor_name.as_deref()).map(String::from),
            message: optional_text(alert.message.as_deref()).map(String::from),
            severity: alert.severity,
            is_read: false,
        };

        self.db()
            .conn()
            .execute(
                "INSERT INTO drift_alerts (id, user_id, alert_type, query, competitor_name, message, severity, is_read, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8)",
                libsql::params![
                    id.as_str(),
                    user.user_id.as_str(),
                    created.alert_type.as_str(),
                    created.query.as_deref(),
                    created.competitor_name.as_deref(),
                    created.message.as_deref(),
                    created.severity.as_str(),
                    format_datetime(&now)
                ],
            )
            .await?;

        self.publish_alert(&user.user_id, &created);
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the alert does not exist for `user`.
    pub async fn get_alert(&self, user: &AuthIdentity, id: &str) -> Result<Alert, DatabaseError> {
        let sql = format!("SELECT {ALERT_COLUMNS} FROM drift_alerts WHERE user_id = ?1 AND id = ?2");
        let mut rows = self
            .db()
            .conn()
            .query(&sql, [user.user_id.as_str(), id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_alert(&row, 0)
    }

    /// Most recent alerts for `user`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn list_alerts(
        &self,
        user: &AuthIdentity,
        limit: u32,
    ) -> Result<Vec<Alert>, DatabaseError> {
        let sql = format!(
            "SELECT {ALERT_COLUMNS} FROM drift_alerts WHERE user_id = ?1
             ORDER BY created_at DESC, seq DESC LIMIT {limit}"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, [user.user_id.as_str()])
            .await?;

        let mut alerts = Vec::new();
        while let Some(row) = rows.next().await? {
            alerts.push(row_to_alert(&row, 0)?);
        }
        Ok(alerts)
    }

    /// Number of unread alerts for `user`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_unread_alerts(&self, user: &AuthIdentity) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM drift_alerts WHERE user_id = ?1 AND is_read = 0",
                [user.user_id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        u64::try_from(row.get::<i64>(0)?)
            .map_err(|e| DatabaseError::Query(format!("negative count: {e}")))
    }

    /// Apply a partial update. Returns whether a row was touched; a missing
    /// ID is not an error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the UPDATE fails.
    pub async fn update_alert(
        &self,
        user: &AuthIdentity,
        id: &str,
        update: &AlertUpdate,
    ) -> Result<bool, DatabaseError> {
        let Some(is_read) = update.is_read else {
            return Ok(false);
        };

        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE drift_alerts SET is_read = ?1 WHERE user_id = ?2 AND id = ?3",
                libsql::params![i64::from(is_read), user.user_id.as_str(), id],
            )
            .await?;
        if changed == 0 {
            tracing::debug!(alert_id = id, "update of missing alert ignored");
        }
        Ok(changed > 0)
    }

    /// Delete an alert. Returns whether a row was removed; a missing ID is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the DELETE fails.
    pub async fn delete_alert(&self, user: &AuthIdentity, id: &str) -> Result<bool, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM drift_alerts WHERE user_id = ?1 AND id = ?2",
                [user.user_id.as_str(), id],
            )
            .await?;
        Ok(changed > 0)
    }
}
