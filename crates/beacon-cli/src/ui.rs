//! Terminal presentation: which palette tables are painted with and how wide
//! they may grow.
//!
//! Severity, treatment and trend words get a [`Tone`] from their beacon-core
//! enum, so a table cell reading `high` or `down` is colored the same way
//! wherever it appears.

use std::io::IsTerminal;
use std::sync::OnceLock;

use beacon_core::enums::{Severity, Treatment, Trend};

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

/// Narrower `COLUMNS` values are ignored.
const MIN_TERM_WIDTH: usize = 40;

/// Emphasis given to a table cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Alarm,
    Caution,
    Good,
    Muted,
}

impl Tone {
    #[must_use]
    pub const fn for_treatment(treatment: Treatment) -> Self {
        match treatment {
            Treatment::Urgent => Self::Alarm,
            Treatment::Cautionary => Self::Caution,
            Treatment::Informational => Self::Muted,
        }
    }

    #[must_use]
    pub const fn for_trend(trend: Trend) -> Self {
        match trend {
            Trend::Down => Self::Alarm,
            Trend::Up => Self::Good,
            Trend::Stable => Self::Muted,
        }
    }

    /// Tone for a rendered severity, treatment or trend word.
    #[must_use]
    pub fn for_cell(text: &str) -> Option<Self> {
        let text = text.trim();
        let matches = |word: &str| text.eq_ignore_ascii_case(word);

        if let Some(severity) = [Severity::High, Severity::Medium, Severity::Low]
            .into_iter()
            .find(|s| matches(s.as_str()))
        {
            return Some(Self::for_treatment(severity.treatment()));
        }
        if let Some(treatment) = [Treatment::Urgent, Treatment::Cautionary, Treatment::Informational]
            .into_iter()
            .find(|t| matches(t.as_str()))
        {
            return Some(Self::for_treatment(treatment));
        }
        [Trend::Up, Trend::Down, Trend::Stable]
            .into_iter()
            .find(|t| matches(t.as_str()))
            .map(Self::for_trend)
    }

    const fn sgr(self) -> &'static str {
        match self {
            Self::Alarm => "31",
            Self::Caution => "33",
            Self::Good => "32",
            Self::Muted => "2",
        }
    }
}

/// How table cells are painted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Palette {
    #[default]
    Plain,
    Ansi,
}

impl Palette {
    /// Paint an already padded cell according to its unpadded `text`.
    #[must_use]
    pub fn paint(self, padded: &str, text: &str) -> String {
        match (self, Tone::for_cell(text)) {
            (Self::Ansi, Some(tone)) => format!("\u{1b}[{}m{padded}\u{1b}[0m", tone.sgr()),
            _ => padded.to_string(),
        }
    }
}

/// What the process can observe about stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct Terminal {
    pub is_tty: bool,
    pub no_color: bool,
    pub columns: Option<usize>,
}

impl Terminal {
    fn detect() -> Self {
        Self {
            is_tty: std::io::stdout().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            columns: std::env::var("COLUMNS")
                .ok()
                .and_then(|value| value.parse::<usize>().ok()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub palette: Palette,
    pub term_width: Option<usize>,
}

impl UiPrefs {
    /// Only table output is ever painted. `--color always` skips the
    /// terminal checks; `auto` also stays plain in quiet mode.
    #[must_use]
    pub fn resolve(flags: &GlobalFlags, terminal: Terminal) -> Self {
        let tables = flags.format == OutputFormat::Table;
        let painted = match flags.color {
            ColorMode::Always => tables,
            ColorMode::Never => false,
            ColorMode::Auto => tables && terminal.is_tty && !terminal.no_color && !flags.quiet,
        };
        Self {
            palette: if painted { Palette::Ansi } else { Palette::Plain },
            term_width: terminal.columns.filter(|width| *width >= MIN_TERM_WIDTH),
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(UiPrefs::resolve(flags, Terminal::detect()));
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn flags(format: OutputFormat, color: ColorMode, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            format,
            limit: None,
            quiet,
            verbose: false,
            color,
            user: None,
            db: None,
        }
    }

    const TTY: Terminal = Terminal {
        is_tty: true,
        no_color: false,
        columns: None,
    };

    #[rstest]
    #[case::auto_on_a_terminal(OutputFormat::Table, ColorMode::Auto, false, TTY, Palette::Ansi)]
    #[case::auto_when_piped(OutputFormat::Table, ColorMode::Auto, false, Terminal::default(), Palette::Plain)]
    #[case::auto_honors_no_color(OutputFormat::Table, ColorMode::Auto, false, Terminal { no_color: true, ..TTY }, Palette::Plain)]
    #[case::auto_quiet(OutputFormat::Table, ColorMode::Auto, true, TTY, Palette::Plain)]
    #[case::always_when_piped(OutputFormat::Table, ColorMode::Always, false, Terminal::default(), Palette::Ansi)]
    #[case::always_skips_json(OutputFormat::Json, ColorMode::Always, false, TTY, Palette::Plain)]
    #[case::never(OutputFormat::Table, ColorMode::Never, false, TTY, Palette::Plain)]
    fn palette_resolution(
        #[case] format: OutputFormat,
        #[case] color: ColorMode,
        #[case] quiet: bool,
        #[case] terminal: Terminal,
        #[case] expected: Palette,
    ) {
        let prefs = UiPrefs::resolve(&flags(format, color, quiet), terminal);
        assert_eq!(prefs.palette, expected);
    }

    #[test]
    fn narrow_columns_are_ignored() {
        let table = flags(OutputFormat::Table, ColorMode::Never, false);
        let narrow = Terminal {
            columns: Some(MIN_TERM_WIDTH - 1),
            ..TTY
        };
        let wide = Terminal {
            columns: Some(120),
            ..TTY
        };
        assert_eq!(UiPrefs::resolve(&table, narrow).term_width, None);
        assert_eq!(UiPrefs::resolve(&table, wide).term_width, Some(120));
    }

    #[test]
    fn severity_tones_follow_treatment() {
        assert_eq!(Tone::for_cell("high"), Some(Tone::Alarm));
        assert_eq!(Tone::for_cell("Medium"), Some(Tone::Caution));
        assert_eq!(Tone::for_cell(" low "), Some(Tone::Muted));
        assert_eq!(Tone::for_cell("urgent"), Tone::for_cell("high"));
    }

    #[test]
    fn trend_tones() {
        assert_eq!(Tone::for_cell("up"), Some(Tone::Good));
        assert_eq!(Tone::for_cell("down"), Some(Tone::Alarm));
        assert_eq!(Tone::for_cell("stable"), Some(Tone::Muted));
        assert_eq!(Tone::for_cell("chatgpt"), None);
    }

    #[test]
    fn plain_palette_leaves_cells_alone() {
        assert_eq!(Palette::Plain.paint("high  ", "high"), "high  ");
        assert_eq!(Palette::Ansi.paint("alr-1 ", "alr-1"), "alr-1 ");
        assert_eq!(Palette::Ansi.paint("up ", "up"), "\u{1b}[32mup \u{1b}[0m");
    }
}
