use beacon_core::enums::Engine;
use beacon_core::gateway::CitationFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub struct ListParams<'a> {
    pub engine: Option<&'a str>,
    pub competitor: bool,
    pub own: bool,
    pub query: Option<&'a str>,
}

pub async fn run(
    params: &ListParams<'_>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = build_filter(params, ctx.limit(flags.limit))?;
    let citations = ctx.store.query_citations(&ctx.identity, &filter).await?;
    output(&citations, flags.format)
}

fn build_filter(params: &ListParams<'_>, limit: u32) -> anyhow::Result<CitationFilter> {
    let engine = params
        .engine
        .map(|raw| parse_enum::<Engine>(raw, "engine"))
        .transpose()?;
    let is_competitor = match (params.competitor, params.own) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    };
    Ok(CitationFilter {
        engine,
        is_competitor,
        query: params.query.map(str::to_string),
        since: None,
        limit: Some(limit),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn own_flag_selects_own_brand_citations() {
        let params = ListParams {
            engine: Some("gemini"),
            competitor: false,
            own: true,
            query: Some("best crm"),
        };
        let filter = build_filter(&params, 25).unwrap();
        assert_eq!(
            filter,
            CitationFilter {
                engine: Some(Engine::Gemini),
                is_competitor: Some(false),
                query: Some("best crm".to_string()),
                since: None,
                limit: Some(25),
            }
        );
    }

    #[test]
    fn no_flags_leave_competitor_unconstrained() {
        let params = ListParams {
            engine: None,
            competitor: false,
            own: false,
            query: None,
        };
        let filter = build_filter(&params, 10).unwrap();
        assert_eq!(filter.is_competitor, None);
        assert_eq!(filter.engine, None);
    }

    #[test]
    fn unknown_engine_is_rejected() {
        let params = ListParams {
            engine: Some("bing"),
            competitor: true,
            own: false,
            query: None,
        };
        assert!(build_filter(&params, 10).is_err());
    }
}
