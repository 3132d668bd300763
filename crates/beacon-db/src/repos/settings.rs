//! User settings repository.

use beacon_core::entities::UserSettings;
use beacon_core::identity::AuthIdentity;

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_bool, get_opt_string, optional_text, parse_datetime, require_text,
    stored_now,
};
use crate::service::BeaconStore;

fn row_to_settings(row: &libsql::Row) -> Result<UserSettings, DatabaseError> {
    Ok(UserSettings {
        user_id: row.get::<String>(0)?,
        brand_name: row.get::<String>(1)?,
        slack_webhook_url: get_opt_string(row, 2)?,
        email_notifications: get_bool(row, 3)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl BeaconStore {
    /// Create or replace the brand settings for `user`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank brand name, or a
    /// `DatabaseError` if the write fails.
    pub async fn upsert_settings(
        &self,
        user: &AuthIdentity,
        brand_name: &str,
        slack_webhook_url: Option<&str>,
        email_notifications: bool,
    ) -> Result<UserSettings, DatabaseError> {
        let brand_name = require_text("brand_name", brand_name)?;
        let slack_webhook_url = optional_text(slack_webhook_url);
        let now = stored_now();

        self.db()
            .conn()
            .execute(
                "INSERT INTO user_settings (user_id, brand_name, slack_webhook_url, email_notifications, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(user_id) DO UPDATE SET
                    brand_name = excluded.brand_name,
                    slack_webhook_url = excluded.slack_webhook_url,
                    email_notifications = excluded.email_notifications,
                    updated_at = excluded.updated_at",
                libsql::params![
                    user.user_id.as_str(),
                    brand_name,
                    slack_webhook_url,
                    i64::from(email_notifications),
                    format_datetime(&now)
                ],
            )
            .await?;

        tracing::debug!(user_id = %user.user_id, brand_name, "saved user settings");
        Ok(UserSettings {
            user_id: user.user_id.clone(),
            brand_name: brand_name.to_string(),
            slack_webhook_url: slack_webhook_url.map(String::from),
            email_notifications,
            updated_at: now,
        })
    }

    /// Brand settings for `user`, or `None` if never configured.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_settings(
        &self,
        user: &AuthIdentity,
    ) -> Result<Option<UserSettings>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT user_id, brand_name, slack_webhook_url, email_notifications, updated_at
                 FROM user_settings WHERE user_id = ?1",
                [user.user_id.as_str()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_settings(&row)?)),
            None => Ok(None),
        }
    }
}
