use clap::Subcommand;

/// Tracked competitor commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CompetitorCommands {
    /// Start tracking a competitor.
    Add {
        name: String,
        #[arg(long)]
        domain: Option<String>,
    },
    /// List tracked competitors.
    List,
    /// Stop tracking a competitor.
    Remove { id: String },
}
