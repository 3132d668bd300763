use beacon_core::entities::UserSettings;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SettingsCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `bcn settings`.
pub async fn handle(
    action: &SettingsCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SettingsCommands::Show => {
            let settings = ctx.store.get_settings(&ctx.identity).await?;
            output(&settings, flags.format)
        }
        SettingsCommands::Set {
            brand,
            slack_webhook,
            email_notifications,
        } => {
            let existing = ctx.store.get_settings(&ctx.identity).await?;
            let (slack_webhook, email_notifications) = merge_with_existing(
                existing.as_ref(),
                slack_webhook.as_deref(),
                *email_notifications,
            );
            let settings = ctx
                .store
                .upsert_settings(&ctx.identity, brand, slack_webhook, email_notifications)
                .await?;
            output(&settings, flags.format)
        }
    }
}

/// Fields not given on the command line keep their stored value.
fn merge_with_existing<'a>(
    existing: Option<&'a UserSettings>,
    slack_webhook: Option<&'a str>,
    email_notifications: Option<bool>,
) -> (Option<&'a str>, bool) {
    let slack_webhook =
        slack_webhook.or_else(|| existing.and_then(|s| s.slack_webhook_url.as_deref()));
    let email_notifications = email_notifications
        .or_else(|| existing.map(|s| s.email_notifications))
        .unwrap_or(true);
    (slack_webhook, email_notifications)
}
