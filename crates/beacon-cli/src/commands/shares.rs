use std::time::Duration;

use chrono::Utc;

use beacon_db::poller::InsertCursor;
use beacon_insights::{InsightError, ShareBoard};

use crate::cli::root_commands::SharesArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::parse::parse_timestamp;
use crate::context::AppContext;
use crate::output::output;

/// Handle `bcn shares`.
pub async fn handle(
    args: &SharesArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if args.watch {
        return watch(ctx, flags).await;
    }

    let now = args
        .at
        .as_deref()
        .map(|raw| parse_timestamp(raw, "at"))
        .transpose()?
        .unwrap_or_else(Utc::now);

    let mut board = ShareBoard::from_config(&ctx.config.analysis);
    board.refresh(&ctx.store, &ctx.identity, now).await?;
    print_board(&board, flags.format)
}

/// Reprint the board each time a citation is recorded, until Ctrl-C.
///
/// Citations recorded by other processes sharing the database file are
/// picked up by polling and delivered through the board's subscription.
async fn watch(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut board = ShareBoard::from_config(&ctx.config.analysis);
    board.subscribe_citations(&ctx.store, &ctx.identity);

    let mut cursor = InsertCursor::new();
    ctx.store.poll_citation_inserts(&mut cursor).await?;
    board.refresh(&ctx.store, &ctx.identity, Utc::now()).await?;
    print_board(&board, flags.format)?;
    if !flags.quiet {
        eprintln!(
            "watching shares for {}, Ctrl-C to stop",
            ctx.identity.user_id
        );
    }

    let mut ticker =
        tokio::time::interval(Duration::from_millis(ctx.config.store.poll_interval_ms));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let result = loop {
        tokio::select! {
            refreshed = board.refresh_on_insert(&ctx.store, &ctx.identity) => {
                match refreshed.map(|shares| shares.is_some()) {
                    Ok(true) => {
                        if let Err(error) = print_board(&board, flags.format) {
                            break Err(error);
                        }
                    }
                    Ok(false) => break Ok(()),
                    // Logged by the board; the last shares stay on screen.
                    Err(InsightError::FetchFailed(_)) => {}
                    Err(error) => break Err(error.into()),
                }
            },
            _ = ticker.tick() => {
                if let Err(error) = ctx.store.poll_citation_inserts(&mut cursor).await {
                    tracing::warn!(%error, "citation poll failed");
                }
            },
            _ = &mut ctrl_c => break Ok(()),
        }
    };

    board.close();
    result
}

fn print_board(board: &ShareBoard, format: OutputFormat) -> anyhow::Result<()> {
    // One row per engine reads better as a table; the summary carries the overall share.
    if format == OutputFormat::Table {
        output(&board.shares(), format)
    } else {
        output(&board.summary(), format)
    }
}
