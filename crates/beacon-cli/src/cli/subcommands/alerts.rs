use clap::Subcommand;

/// Drift alert commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AlertCommands {
    /// List recent alerts, newest first.
    List {
        /// Only unread alerts
        #[arg(long)]
        unread: bool,
    },
    /// Mark an alert as read.
    Read { id: String },
    /// Delete an alert.
    Delete { id: String },
    /// Record a new alert.
    Raise {
        #[arg(long = "type")]
        alert_type: String,
        /// high, medium or low (anything else is stored as low)
        #[arg(long)]
        severity: Option<String>,
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        competitor: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// Follow new alerts until interrupted.
    Watch,
}
