use beacon_core::entities::NewCitation;
use beacon_core::enums::Engine;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_enum, parse_timestamp};
use crate::context::AppContext;
use crate::output::output;

pub struct RecordParams<'a> {
    pub engine: &'a str,
    pub brand: &'a str,
    pub query: &'a str,
    pub url: Option<&'a str>,
    pub competitor: bool,
    pub at: Option<&'a str>,
}

pub async fn run(
    params: &RecordParams<'_>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let engine: Engine = parse_enum(params.engine, "engine")?;
    let created_at = params
        .at
        .map(|raw| parse_timestamp(raw, "at"))
        .transpose()?;

    let citation = ctx
        .store
        .record_citation(
            &ctx.identity,
            &NewCitation {
                engine,
                brand_name: params.brand.to_string(),
                query: params.query.to_string(),
                citation_url: params.url.map(str::to_string),
                is_competitor: params.competitor,
                created_at,
            },
        )
        .await?;
    output(&citation, flags.format)
}
