//! Citation gap detection.
//!
//! A gap is a query where competitors are cited and the tracked brand has no
//! citation at all. [`find_gaps`] ranks gaps from data already in hand;
//! [`analyze_gaps`] gathers that data from a gateway first.

use std::collections::{BTreeSet, HashMap};

use beacon_core::entities::Citation;
use beacon_core::gateway::{CitationFilter, CitationGateway};
use beacon_core::identity::AuthIdentity;
use beacon_core::reports::GapCandidate;

use crate::error::InsightError;

/// `competitor_count * engine_count * 10`, saturating.
#[must_use]
pub fn opportunity_score(competitor_count: u32, engine_count: usize) -> u64 {
    let engines = u64::try_from(engine_count).unwrap_or(u64::MAX);
    u64::from(competitor_count)
        .saturating_mul(engines)
        .saturating_mul(10)
}

/// Group competitor citations by exact query and keep the queries for which
/// `own_lookup` reports no own citations.
///
/// Query text is compared as-is (case-sensitive). `own_lookup` is called once
/// per distinct query. Records not flagged as competitor citations are
/// ignored. The result is sorted by descending opportunity score; equal
/// scores keep the order in which their queries were first seen.
pub fn find_gaps<F>(competitor_citations: &[Citation], mut own_lookup: F) -> Vec<GapCandidate>
where
    F: FnMut(&str) -> u64,
{
    let mut groups: Vec<GapCandidate> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for citation in competitor_citations.iter().filter(|c| c.is_competitor) {
        let slot = *index.entry(citation.query.as_str()).or_insert_with(|| {
            groups.push(GapCandidate {
                query: citation.query.clone(),
                competitor_count: 0,
                competitor_names: BTreeSet::new(),
                competitor_urls: BTreeSet::new(),
                engines: BTreeSet::new(),
                opportunity_score: 0,
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.competitor_count = group.competitor_count.saturating_add(1);
        group.competitor_names.insert(citation.brand_name.clone());
        if let Some(url) = citation.citation_url.as_ref().filter(|u| !u.is_empty()) {
            group.competitor_urls.insert(url.clone());
        }
        group.engines.insert(citation.engine);
    }

    let mut gaps: Vec<GapCandidate> = groups
        .into_iter()
        .filter(|group| own_lookup(&group.query) == 0)
        .map(|mut gap| {
            gap.opportunity_score = opportunity_score(gap.competitor_count, gap.engines.len());
            gap
        })
        .collect();

    // Stable sort: ties stay in discovery order.
    gaps.sort_by(|a, b| b.opportunity_score.cmp(&a.opportunity_score));
    gaps
}

/// Run gap analysis for `user` against the store.
///
/// Requires brand settings. Own-citation counts are fetched once per distinct
/// competitor query before ranking.
///
/// # Errors
///
/// Returns `InsightError::SetupRequired` if the user has no settings, or
/// `InsightError::FetchFailed` if any gateway call fails.
pub async fn analyze_gaps<G: CitationGateway>(
    gateway: &G,
    user: &AuthIdentity,
) -> Result<Vec<GapCandidate>, InsightError> {
    let Some(settings) = gateway.get_user_settings(user).await? else {
        return Err(InsightError::SetupRequired {
            user_id: user.user_id.clone(),
        });
    };

    let competitor = gateway
        .query_citations(user, &CitationFilter::competitors())
        .await?;

    let mut own_counts: HashMap<&str, u64> = HashMap::new();
    for citation in competitor.iter().filter(|c| c.is_competitor) {
        let query = citation.query.as_str();
        if own_counts.contains_key(query) {
            continue;
        }
        let own = gateway
            .count_citations(user, &CitationFilter::own_for_query(query))
            .await?;
        own_counts.insert(query, own);
    }

    let gaps = find_gaps(&competitor, |query| {
        own_counts.get(query).copied().unwrap_or_default()
    });
    tracing::debug!(
        user_id = %user.user_id,
        brand = %settings.brand_name,
        competitor_citations = competitor.len(),
        queries = own_counts.len(),
        gaps = gaps.len(),
        "gap analysis complete"
    );
    Ok(gaps)
}
