use beacon_insights::{AlertFeed, filter_unread};

use crate::cli::GlobalFlags;
use crate::context::AppContext;

pub async fn run(unread: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = flags.limit.unwrap_or(ctx.config.alerts.recent_limit);
    let mut feed = AlertFeed::new(ctx.identity.clone());
    feed.load_recent(&ctx.store, limit).await?;

    let alerts = if unread {
        filter_unread(feed.alerts())
    } else {
        feed.alerts().iter().collect()
    };
    println!("{}", super::render_alerts(&alerts, flags.format)?);
    Ok(())
}
