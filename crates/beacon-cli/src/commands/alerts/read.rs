use anyhow::Context;
use beacon_core::gateway::AlertUpdate;

use crate::cli::GlobalFlags;
use crate::context::AppContext;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut alert = ctx
        .store
        .get_alert(&ctx.identity, id)
        .await
        .with_context(|| format!("alert '{id}' not found"))?;

    if !alert.is_read {
        ctx.store
            .update_alert(&ctx.identity, id, &AlertUpdate::mark_read())
            .await?;
        alert.is_read = true;
    }
    println!("{}", super::render_alert(&alert, flags.format)?);
    Ok(())
}
