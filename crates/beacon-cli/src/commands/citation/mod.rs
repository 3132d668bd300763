mod list;
mod record;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CitationCommands;
use crate::context::AppContext;

/// Handle `bcn citation`.
pub async fn handle(
    action: &CitationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CitationCommands::Record {
            engine,
            brand,
            query,
            url,
            competitor,
            at,
        } => {
            let params = record::RecordParams {
                engine,
                brand,
                query,
                url: url.as_deref(),
                competitor: *competitor,
                at: at.as_deref(),
            };
            record::run(&params, ctx, flags).await
        }
        CitationCommands::List {
            engine,
            competitor,
            own,
            query,
        } => {
            let params = list::ListParams {
                engine: engine.as_deref(),
                competitor: *competitor,
                own: *own,
                query: query.as_deref(),
            };
            list::run(&params, ctx, flags).await
        }
    }
}
