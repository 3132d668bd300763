use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Shares(args) => commands::shares::handle(&args, ctx, flags).await,
        Commands::Gaps => commands::gaps::handle(ctx, flags).await,
        Commands::Alerts { action } => commands::alerts::handle(&action, ctx, flags).await,
        Commands::Citation { action } => commands::citation::handle(&action, ctx, flags).await,
        Commands::Settings { action } => commands::settings::handle(&action, ctx, flags).await,
        Commands::Competitor { action } => {
            commands::competitor::handle(&action, ctx, flags).await
        }
    }
}
