use beacon_core::entities::NewAlert;
use beacon_core::enums::Severity;

use crate::cli::GlobalFlags;
use crate::context::AppContext;

pub struct RaiseParams<'a> {
    pub alert_type: &'a str,
    pub severity: Option<&'a str>,
    pub query: Option<&'a str>,
    pub competitor: Option<&'a str>,
    pub message: Option<&'a str>,
}

pub async fn run(
    params: &RaiseParams<'_>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let new_alert = NewAlert {
        alert_type: params.alert_type.to_string(),
        query: params.query.map(str::to_string),
        competitor_name: params.competitor.map(str::to_string),
        message: params.message.map(str::to_string),
        severity: Severity::from_label(params.severity),
    };
    let alert = ctx.store.create_alert(&ctx.identity, &new_alert).await?;
    println!("{}", super::render_alert(&alert, flags.format)?);
    Ok(())
}
