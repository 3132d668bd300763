//! Tracked competitor repository.

use beacon_core::entities::Competitor;
use beacon_core::identity::AuthIdentity;
use beacon_core::ids::PREFIX_COMPETITOR;

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_opt_string, optional_text, parse_datetime, require_text, stored_now,
};
use crate::service::BeaconStore;

fn row_to_competitor(row: &libsql::Row) -> Result<Competitor, DatabaseError> {
    Ok(Competitor {
        id: row.get::<String>(0)?,
        competitor_name: row.get::<String>(1)?,
        competitor_domain: get_opt_string(row, 2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl BeaconStore {
    /// Start tracking a competitor. Names are trimmed and unique per user.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank or already tracked
    /// name, or a `DatabaseError` if the INSERT fails.
    pub async fn add_competitor(
        &self,
        user: &AuthIdentity,
        name: &str,
        domain: Option<&str>,
    ) -> Result<Competitor, DatabaseError> {
        let name = require_text("competitor_name", name)?;
        let domain = optional_text(domain);

        let mut existing = self
            .db()
            .conn()
            .query(
                "SELECT id FROM competitors WHERE user_id = ?1 AND competitor_name = ?2",
                [user.user_id.as_str(), name],
            )
            .await?;
        if existing.next().await?.is_some() {
            return Err(DatabaseError::Validation(format!(
                "competitor '{name}' is already tracked"
            )));
        }

        let id = self.db().generate_id(PREFIX_COMPETITOR).await?;
        let now = stored_now();
        self.db()
            .conn()
            .execute(
                "INSERT INTO competitors (id, user_id, competitor_name, competitor_domain, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    id.as_str(),
                    user.user_id.as_str(),
                    name,
                    domain,
                    format_datetime(&now)
                ],
            )
            .await?;

        Ok(Competitor {
            id,
            competitor_name: name.to_string(),
            competitor_domain: domain.map(String::from),
            created_at: now,
        })
    }

    /// Tracked competitors in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_competitors(
        &self,
        user: &AuthIdentity,
    ) -> Result<Vec<Competitor>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, competitor_name, competitor_domain, created_at
                 FROM competitors WHERE user_id = ?1 ORDER BY created_at, rowid",
                [user.user_id.as_str()],
            )
            .await?;

        let mut competitors = Vec::new();
        while let Some(row) = rows.next().await? {
            competitors.push(row_to_competitor(&row)?);
        }
        Ok(competitors)
    }

    /// Stop tracking a competitor. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the DELETE fails.
    pub async fn remove_competitor(
        &self,
        user: &AuthIdentity,
        id: &str,
    ) -> Result<bool, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM competitors WHERE user_id = ?1 AND id = ?2",
                [user.user_id.as_str(), id],
            )
            .await?;
        Ok(changed > 0)
    }
}
