use std::time::Duration;

use beacon_db::poller::InsertCursor;
use beacon_insights::{AlertFeed, Delivery, NotifyError};

use crate::cli::GlobalFlags;
use crate::context::AppContext;

/// Follow the alert feed until Ctrl-C.
///
/// Inserts made by other processes sharing the database file are picked up
/// by polling and fed through the same subscription as local inserts.
pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let format = flags.format;
    let quiet = flags.quiet;

    let mut feed = AlertFeed::new(ctx.identity.clone());
    feed.subscribe_inserts(&ctx.store, move |alert| {
        if quiet {
            return Ok(());
        }
        let rendered = super::render_alert(alert, format)
            .map_err(|error| NotifyError::new(error.to_string()))?;
        println!("{rendered}");
        Ok(())
    });

    let mut cursor = InsertCursor::new();
    ctx.store.poll_alert_inserts(&mut cursor).await?;
    feed.load_recent(&ctx.store, ctx.config.alerts.recent_limit)
        .await?;
    if !quiet {
        eprintln!(
            "watching alerts for {} ({} unread), Ctrl-C to stop",
            ctx.identity.user_id,
            feed.unread_count()
        );
    }

    let mut ticker =
        tokio::time::interval(Duration::from_millis(ctx.config.store.poll_interval_ms));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let result = loop {
        tokio::select! {
            delivery = feed.next_insert() => match delivery {
                Ok(Delivery::Delivered { alert_id, .. }) => {
                    tracing::debug!(alert_id = %alert_id, unread = feed.unread_count(), "alert delivered");
                }
                Ok(Delivery::Duplicate { .. } | Delivery::Ignored) => {}
                Err(error) => break Err(error.into()),
            },
            _ = ticker.tick() => {
                if let Err(error) = ctx.store.poll_alert_inserts(&mut cursor).await {
                    tracing::warn!(%error, "alert poll failed");
                }
            },
            _ = &mut ctrl_c => break Ok(()),
        }
    };

    feed.close();
    result
}
