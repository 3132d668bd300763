use clap::Subcommand;

/// Brand settings commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SettingsCommands {
    /// Show the current settings.
    Show,
    /// Create or update the settings.
    Set {
        #[arg(long)]
        brand: String,
        #[arg(long)]
        slack_webhook: Option<String>,
        #[arg(long)]
        email_notifications: Option<bool>,
    },
}
