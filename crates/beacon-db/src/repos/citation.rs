//! Citation repository: record, filtered reads, counts.

use beacon_core::entities::{Citation, NewCitation};
use beacon_core::gateway::CitationFilter;
use beacon_core::identity::AuthIdentity;
use beacon_core::ids::PREFIX_CITATION;

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_bool, get_opt_string, optional_text, parse_datetime, parse_enum,
    require_text, stored_now, to_stored_precision,
};
use crate::service::BeaconStore;

pub(crate) const CITATION_COLUMNS: &str =
    "id, ai_engine, brand_name, query, citation_url, is_competitor, created_at";

/// Decode a citation starting at column `offset` (laid out as `CITATION_COLUMNS`).
pub(crate) fn row_to_citation(row: &libsql::Row, offset: i32) -> Result<Citation, DatabaseError> {
    Ok(Citation {
        id: row.get::<String>(offset)?,
        engine: parse_enum(&row.get::<String>(offset + 1)?)?,
        brand_name: row.get::<String>(offset + 2)?,
        query: row.get::<String>(offset + 3)?,
        citation_url: get_opt_string(row, offset + 4)?,
        is_competitor: get_bool(row, offset + 5)?,
        created_at: parse_datetime(&row.get::<String>(offset + 6)?)?,
    })
}

/// Build the `WHERE` clause and parameters for a citation filter.
fn filter_clause(user: &AuthIdentity, filter: &CitationFilter) -> (String, Vec<libsql::Value>) {
    let mut params: Vec<libsql::Value> = vec![libsql::Value::Text(user.user_id.clone())];
    let mut conditions = vec![String::from("user_id = ?1")];

    if let Some(engine) = filter.engine {
        params.push(libsql::Value::Text(engine.as_str().to_string()));
        conditions.push(format!("ai_engine = ?{}", params.len()));
    }
    if let Some(is_competitor) = filter.is_competitor {
        params.push(libsql::Value::Integer(i64::from(is_competitor)));
        conditions.push(format!("is_competitor = ?{}", params.len()));
    }
    if let Some(ref query) = filter.query {
        params.push(libsql::Value::Text(query.clone()));
        conditions.push(format!("query = ?{}", params.len()));
    }
    if let Some(since) = filter.since {
        params.push(libsql::Value::Text(format_datetime(&since)));
        conditions.push(format!("created_at >= ?{}", params.len()));
    }

    (format!("WHERE {}", conditions.join(" AND ")), params)
}

impl BeaconStore {
    /// Record one citation for `user` and publish it to open subscriptions.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank brand or query, or a
    /// `DatabaseError` if the INSERT fails. Nothing is published on failure.
    pub async fn record_citation(
        &self,
        user: &AuthIdentity,
        citation: &NewCitation,
    ) -> Result<Citation, DatabaseError> {
        let brand_name = require_text("brand_name", &citation.brand_name)?;
        if citation.query.trim().is_empty() {
            return Err(DatabaseError::Validation("query must not be empty".into()));
        }
        let citation_url = optional_text(citation.citation_url.as_deref());
        let created_at = citation
            .created_at
            .map_or_else(stored_now, to_stored_precision);
        let id = self.db().generate_id(PREFIX_CITATION).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO citations (id, user_id, ai_engine, brand_name, query, citation_url, is_competitor, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    id.as_str(),
                    user.user_id.as_str(),
                    citation.engine.as_str(),
                    brand_name,
                    citation.query.as_str(),
                    citation_url,
                    i64::from(citation.is_competitor),
                    format_datetime(&created_at)
                ],
            )
            .await?;

        let recorded = Citation {
            id,
            engine: citation.engine,
            brand_name: brand_name.to_string(),
            query: citation.query.clone(),
            citation_url: citation_url.map(String::from),
            is_competitor: citation.is_competitor,
            created_at,
        };
        self.publish_citation(&user.user_id, &recorded);
        Ok(recorded)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the citation does not exist for `user`.
    pub async fn get_citation(
        &self,
        user: &AuthIdentity,
        id: &str,
    ) -> Result<Citation, DatabaseError> {
        let sql = format!("SELECT {CITATION_COLUMNS} FROM citations WHERE user_id = ?1 AND id = ?2");
        let mut rows = self
            .db()
            .conn()
            .query(&sql, [user.user_id.as_str(), id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_citation(&row, 0)
    }

    /// Citations matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn query_citations(
        &self,
        user: &AuthIdentity,
        filter: &CitationFilter,
    ) -> Result<Vec<Citation>, DatabaseError> {
        let (where_clause, params) = filter_clause(user, filter);
        let limit_clause = filter
            .limit
            .map(|limit| format!(" LIMIT {limit}"))
            .unwrap_or_default();
        let sql = format!(
            "SELECT {CITATION_COLUMNS} FROM citations {where_clause}
             ORDER BY created_at DESC, seq DESC{limit_clause}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut citations = Vec::new();
        while let Some(row) = rows.next().await? {
            citations.push(row_to_citation(&row, 0)?);
        }
        tracing::debug!(user_id = %user.user_id, count = citations.len(), "queried citations");
        Ok(citations)
    }

    /// Number of citations matching `filter`; `limit` is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_citations(
        &self,
        user: &AuthIdentity,
        filter: &CitationFilter,
    ) -> Result<u64, DatabaseError> {
        let (where_clause, params) = filter_clause(user, filter);
        let sql = format!("SELECT COUNT(*) FROM citations {where_clause}");
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = row.get::<i64>(0)?;
        u64::try_from(count).map_err(|e| DatabaseError::Query(format!("negative count: {e}")))
    }
}
