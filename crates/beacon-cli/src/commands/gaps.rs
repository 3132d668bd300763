use anyhow::bail;

use beacon_insights::{InsightError, analyze_gaps};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `bcn gaps`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut gaps = match analyze_gaps(&ctx.store, &ctx.identity).await {
        Ok(gaps) => gaps,
        Err(InsightError::SetupRequired { user_id }) => bail!(
            "no brand configured for user '{user_id}'; run 'bcn settings set --brand <name>' first"
        ),
        Err(error) => return Err(error.into()),
    };

    if let Some(limit) = flags.limit {
        gaps.truncate(usize::try_from(limit)?);
    }
    output(&gaps, flags.format)
}
