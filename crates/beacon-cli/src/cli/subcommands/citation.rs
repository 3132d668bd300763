use clap::Subcommand;

/// Citation commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CitationCommands {
    /// Record one citation.
    Record {
        /// perplexity, chatgpt, gemini or claude
        #[arg(long)]
        engine: String,
        #[arg(long)]
        brand: String,
        #[arg(long)]
        query: String,
        #[arg(long)]
        url: Option<String>,
        /// The cited brand is a competitor
        #[arg(long)]
        competitor: bool,
        /// When the citation was observed, RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
    /// List citations, newest first.
    List {
        #[arg(long)]
        engine: Option<String>,
        /// Only competitor citations
        #[arg(long, conflicts_with = "own")]
        competitor: bool,
        /// Only own-brand citations
        #[arg(long)]
        own: bool,
        /// Exact query text
        #[arg(long)]
        query: Option<String>,
    },
}
