mod delete;
mod list;
mod raise;
mod read;
mod watch;

use beacon_core::entities::Alert;
use beacon_core::enums::{Severity, Treatment};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::subcommands::AlertCommands;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;

/// Handle `bcn alerts`.
pub async fn handle(
    action: &AlertCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AlertCommands::List { unread } => list::run(*unread, ctx, flags).await,
        AlertCommands::Read { id } => read::run(id, ctx, flags).await,
        AlertCommands::Delete { id } => delete::run(id, ctx, flags).await,
        AlertCommands::Raise {
            alert_type,
            severity,
            query,
            competitor,
            message,
        } => {
            let params = raise::RaiseParams {
                alert_type,
                severity: severity.as_deref(),
                query: query.as_deref(),
                competitor: competitor.as_deref(),
                message: message.as_deref(),
            };
            raise::run(&params, ctx, flags).await
        }
        AlertCommands::Watch => watch::run(ctx, flags).await,
    }
}

/// Flattened alert row for table output.
#[derive(Debug, Serialize)]
struct AlertView<'a> {
    id: &'a str,
    created_at: DateTime<Utc>,
    severity: Severity,
    treatment: Treatment,
    headline: &'a str,
    query: Option<&'a str>,
    competitor: Option<&'a str>,
    read: bool,
}

impl<'a> From<&'a Alert> for AlertView<'a> {
    fn from(alert: &'a Alert) -> Self {
        Self {
            id: &alert.id,
            created_at: alert.created_at,
            severity: alert.severity,
            treatment: alert.severity.treatment(),
            headline: alert.headline(),
            query: alert.query.as_deref(),
            competitor: alert.competitor_name.as_deref(),
            read: alert.is_read,
        }
    }
}

/// Table output gets the presentation view, other formats the stored record.
fn render_alert(alert: &Alert, format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Table {
        crate::output::render(&AlertView::from(alert), format)
    } else {
        crate::output::render(alert, format)
    }
}

fn render_alerts(alerts: &[&Alert], format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Table {
        let views = alerts.iter().map(|a| AlertView::from(*a)).collect::<Vec<_>>();
        crate::output::render(&views, format)
    } else {
        crate::output::render(&alerts, format)
    }
}
