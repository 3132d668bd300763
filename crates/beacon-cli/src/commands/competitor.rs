use crate::cli::GlobalFlags;
use crate::cli::subcommands::CompetitorCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `bcn competitor`.
pub async fn handle(
    action: &CompetitorCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CompetitorCommands::Add { name, domain } => {
            let competitor = ctx
                .store
                .add_competitor(&ctx.identity, name, domain.as_deref())
                .await?;
            output(&competitor, flags.format)
        }
        CompetitorCommands::List => {
            let competitors = ctx.store.list_competitors(&ctx.identity).await?;
            output(&competitors, flags.format)
        }
        CompetitorCommands::Remove { id } => {
            let removed = ctx.store.remove_competitor(&ctx.identity, id).await?;
            if !removed {
                anyhow::bail!("competitor '{id}' not found");
            }
            output(&serde_json::json!({ "id": id, "removed": true }), flags.format)
        }
    }
}
