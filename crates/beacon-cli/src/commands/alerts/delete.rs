use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let deleted = ctx.store.delete_alert(&ctx.identity, id).await?;
    if !deleted {
        tracing::debug!(alert_id = %id, "alert already gone");
    }
    output(
        &serde_json::json!({ "id": id, "deleted": deleted }),
        flags.format,
    )
}
