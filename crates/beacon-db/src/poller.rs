//! Cross-process insert delivery.
//!
//! Inserts made through one `BeaconStore` reach only that store's
//! subscribers. A process that shares the database file with other writers
//! (the CLI's `alerts watch` and `shares --watch`, for instance) polls
//! `drift_alerts` and `citations` by their `seq` column and republishes any
//! new rows to its own hubs. `seq` is AUTOINCREMENT, so a row inserted after
//! the newest one was deleted still lands above the watermark.

use crate::error::DatabaseError;
use crate::repos::alert::{ALERT_COLUMNS, row_to_alert};
use crate::repos::citation::{CITATION_COLUMNS, row_to_citation};
use crate::service::BeaconStore;

/// Position of the last row already published by one of the `poll_*` methods.
///
/// Use one cursor per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertCursor {
    watermark: Option<i64>,
}

impl InsertCursor {
    #[must_use]
    pub const fn new() -> Self {
        Self { watermark: None }
    }

    /// Whether the first poll has run.
    #[must_use]
    pub const fn is_primed(&self) -> bool {
        self.watermark.is_some()
    }
}

impl BeaconStore {
    /// Publish alert rows added since the previous poll.
    ///
    /// The first call only records the current high-water mark so that
    /// existing alerts are not replayed. Returns the number of alerts published.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    /// The cursor is left unchanged on error.
    pub async fn poll_alert_inserts(&self, cursor: &mut InsertCursor) -> Result<usize, DatabaseError> {
        let Some(watermark) = cursor.watermark else {
            return self.prime(cursor, "drift_alerts").await;
        };

        let sql = format!(
            "SELECT seq, user_id, {ALERT_COLUMNS} FROM drift_alerts WHERE seq > ?1 ORDER BY seq"
        );
        let mut rows = self.db().conn().query(&sql, [watermark]).await?;

        let mut fresh = Vec::new();
        while let Some(row) = rows.next().await? {
            let seq = row.get::<i64>(0)?;
            let user_id = row.get::<String>(1)?;
            fresh.push((seq, user_id, row_to_alert(&row, 2)?));
        }

        for (seq, user_id, alert) in &fresh {
            self.publish_alert(user_id, alert);
            cursor.watermark = Some(*seq);
        }
        if !fresh.is_empty() {
            tracing::debug!(count = fresh.len(), "alert poller published inserts");
        }
        Ok(fresh.len())
    }

    /// Publish citation rows added since the previous poll. Same contract as
    /// [`BeaconStore::poll_alert_inserts`].
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    /// The cursor is left unchanged on error.
    pub async fn poll_citation_inserts(
        &self,
        cursor: &mut InsertCursor,
    ) -> Result<usize, DatabaseError> {
        let Some(watermark) = cursor.watermark else {
            return self.prime(cursor, "citations").await;
        };

        let sql = format!(
            "SELECT seq, user_id, {CITATION_COLUMNS} FROM citations WHERE seq > ?1 ORDER BY seq"
        );
        let mut rows = self.db().conn().query(&sql, [watermark]).await?;

        let mut fresh = Vec::new();
        while let Some(row) = rows.next().await? {
            let seq = row.get::<i64>(0)?;
            let user_id = row.get::<String>(1)?;
            fresh.push((seq, user_id, row_to_citation(&row, 2)?));
        }

        for (seq, user_id, citation) in &fresh {
            self.publish_citation(user_id, citation);
            cursor.watermark = Some(*seq);
        }
        if !fresh.is_empty() {
            tracing::debug!(count = fresh.len(), "citation poller published inserts");
        }
        Ok(fresh.len())
    }

    /// Highest `seq` ever handed out for `table`, including deleted rows.
    async fn prime(&self, cursor: &mut InsertCursor, table: &str) -> Result<usize, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT COALESCE(MAX(seq), 0) FROM {table}"), ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let mut primed = row.get::<i64>(0)?;

        // sqlite_sequence also remembers a deleted newest row.
        let mut rows = self
            .db()
            .conn()
            .query("SELECT seq FROM sqlite_sequence WHERE name = ?1", [table])
            .await?;
        if let Some(row) = rows.next().await? {
            primed = primed.max(row.get::<i64>(0)?);
        }

        cursor.watermark = Some(primed);
        tracing::debug!(table, watermark = primed, "insert poller primed");
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use beacon_core::enums::{Engine, Severity};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{new_alert, new_citation, test_store, user};

    #[tokio::test]
    async fn first_poll_only_primes() {
        let store = test_store().await;
        let alice = user("alice");
        store
            .create_alert(&alice, &new_alert("share_drop", Severity::Low))
            .await
            .unwrap();

        let mut cursor = InsertCursor::new();
        assert!(!cursor.is_primed());
        assert_eq!(store.poll_alert_inserts(&mut cursor).await.unwrap(), 0);
        assert!(cursor.is_primed());
        assert_eq!(store.poll_alert_inserts(&mut cursor).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn later_polls_republish_new_rows() {
        let store = test_store().await;
        let alice = user("alice");
        let mut cursor = InsertCursor::new();
        store.poll_alert_inserts(&mut cursor).await.unwrap();

        let created = store
            .create_alert(&alice, &new_alert("competitor_gain", Severity::High))
            .await
            .unwrap();

        let mut sub = store.subscribe_alerts(&alice);
        assert_eq!(store.poll_alert_inserts(&mut cursor).await.unwrap(), 1);
        assert_eq!(sub.recv().await.unwrap(), created);
        assert_eq!(store.poll_alert_inserts(&mut cursor).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insert_after_deleting_newest_alert_is_polled() {
        let store = test_store().await;
        let alice = user("alice");
        let newest = store
            .create_alert(&alice, &new_alert("share_drop", Severity::Low))
            .await
            .unwrap();

        let mut cursor = InsertCursor::new();
        store.poll_alert_inserts(&mut cursor).await.unwrap();
        assert!(store.delete_alert(&alice, &newest.id).await.unwrap());

        let replacement = store
            .create_alert(&alice, &new_alert("competitor_gain", Severity::High))
            .await
            .unwrap();
        let mut sub = store.subscribe_alerts(&alice);
        assert_eq!(store.poll_alert_inserts(&mut cursor).await.unwrap(), 1);
        assert_eq!(sub.recv().await.unwrap(), replacement);
    }

    #[tokio::test]
    async fn priming_after_deleting_newest_skips_nothing_new() {
        let store = test_store().await;
        let alice = user("alice");
        let newest = store
            .create_alert(&alice, &new_alert("share_drop", Severity::Low))
            .await
            .unwrap();
        store.delete_alert(&alice, &newest.id).await.unwrap();

        let mut cursor = InsertCursor::new();
        store.poll_alert_inserts(&mut cursor).await.unwrap();
        store
            .create_alert(&alice, &new_alert("competitor_gain", Severity::High))
            .await
            .unwrap();
        assert_eq!(store.poll_alert_inserts(&mut cursor).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn citation_polls_republish_new_rows() {
        let store = test_store().await;
        let alice = user("alice");
        store
            .record_citation(&alice, &new_citation(Engine::Gemini, "Acme", "q", true))
            .await
            .unwrap();

        let mut cursor = InsertCursor::new();
        assert_eq!(store.poll_citation_inserts(&mut cursor).await.unwrap(), 0);

        let recorded = store
            .record_citation(&alice, &new_citation(Engine::Gemini, "Beacon", "q", false))
            .await
            .unwrap();
        let mut sub = store.subscribe_citations(&alice);
        assert_eq!(store.poll_citation_inserts(&mut cursor).await.unwrap(), 1);
        assert_eq!(sub.recv().await.unwrap(), recorded);
        assert_eq!(store.poll_citation_inserts(&mut cursor).await.unwrap(), 0);
    }
}
