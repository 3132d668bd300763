use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `bcn` binary.
#[derive(Debug, Parser)]
#[command(name = "bcn", version, about = "Beacon - brand visibility in AI answer engines")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Table coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// User to act as (overrides general.user_id)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Database path (overrides store.path)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
            user: self.user.clone(),
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{AlertCommands, CitationCommands, SettingsCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "bcn", "--format", "table", "--limit", "10", "--verbose", "gaps",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Gaps));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["bcn", "gaps", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["bcn", "--format", "xml", "gaps"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["bcn", "--user", "alice", "--db", ":memory:", "gaps"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.user.as_deref(), Some("alice"));
        assert_eq!(flags.db.as_deref(), Some(":memory:"));
    }

    #[test]
    fn shares_accepts_reference_time() {
        let cli = Cli::try_parse_from(["bcn", "shares", "--at", "2026-10-01T00:00:00Z"])
            .expect("cli should parse");
        let Commands::Shares(args) = cli.command else {
            panic!("expected shares");
        };
        assert_eq!(args.at.as_deref(), Some("2026-10-01T00:00:00Z"));
        assert!(!args.watch);
    }

    #[test]
    fn shares_watch_follows_now_only() {
        let cli = Cli::try_parse_from(["bcn", "shares", "--watch"]).expect("cli should parse");
        let Commands::Shares(args) = cli.command else {
            panic!("expected shares");
        };
        assert!(args.watch);

        let parsed =
            Cli::try_parse_from(["bcn", "shares", "--watch", "--at", "2026-10-01T00:00:00Z"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn alerts_raise_uses_type_flag() {
        let cli = Cli::try_parse_from([
            "bcn", "alerts", "raise", "--type", "competitor_gain", "--severity", "high",
        ])
        .expect("cli should parse");
        let Commands::Alerts {
            action: AlertCommands::Raise {
                alert_type,
                severity,
                ..
            },
        } = cli.command
        else {
            panic!("expected alerts raise");
        };
        assert_eq!(alert_type, "competitor_gain");
        assert_eq!(severity.as_deref(), Some("high"));
    }

    #[test]
    fn citation_list_side_flags_conflict() {
        let parsed = Cli::try_parse_from(["bcn", "citation", "list", "--competitor", "--own"]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from(["bcn", "citation", "list", "--own", "--engine", "claude"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Citation {
                action: CitationCommands::List { own: true, .. }
            }
        ));
    }

    #[test]
    fn settings_set_takes_explicit_booleans() {
        let cli = Cli::try_parse_from([
            "bcn",
            "settings",
            "set",
            "--brand",
            "Beacon",
            "--email-notifications",
            "false",
        ])
        .expect("cli should parse");
        let Commands::Settings {
            action:
                SettingsCommands::Set {
                    brand,
                    email_notifications,
                    slack_webhook,
                },
        } = cli.command
        else {
            panic!("expected settings set");
        };
        assert_eq!(brand, "Beacon");
        assert_eq!(email_notifications, Some(false));
        assert!(slack_webhook.is_none());
    }
}
