use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AlertCommands, CitationCommands, CompetitorCommands, SettingsCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Per-engine recommendation share over the trailing window.
    Shares(SharesArgs),
    /// Queries where competitors are cited and your brand is not.
    Gaps,
    /// Drift alerts.
    Alerts {
        #[command(subcommand)]
        action: AlertCommands,
    },
    /// Recorded citations.
    Citation {
        #[command(subcommand)]
        action: CitationCommands,
    },
    /// Brand settings.
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
    /// Tracked competitors.
    Competitor {
        #[command(subcommand)]
        action: CompetitorCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct SharesArgs {
    /// End of the window as RFC 3339 (defaults to now)
    #[arg(long)]
    pub at: Option<String>,

    /// Keep running and reprint whenever a citation is recorded
    #[arg(long, conflicts_with = "at")]
    pub watch: bool,
}
