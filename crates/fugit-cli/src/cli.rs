//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser};
use fugit_core::Tag;

use crate::range::Period;

/// Reports time spent from a plain-text stanza log.
///
/// The log location comes from `--file`, the `FUGIT_FILE` environment
/// variable, or the `file` key of the config file.
#[derive(Debug, Parser)]
#[command(name = "fugit", version, about, long_about = None)]
pub struct Cli {
    /// Only count time on tasks whose description contains this tag (e.g. #project1).
    #[arg(short, long, value_name = "TAG")]
    pub tag: Option<Tag>,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Log file to read, overriding configuration.
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Path to config file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Report window selection. At most one may be given.
#[derive(Debug, Default, Args)]
#[group(multiple = false)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "mutually exclusive clap flags"
)]
pub struct RangeArgs {
    /// This day.
    #[arg(short, long)]
    pub day: bool,

    /// This month.
    #[arg(short, long)]
    pub month: bool,

    /// This week, starting on Sunday.
    #[arg(short, long)]
    pub week: bool,

    /// This week, starting on Monday.
    #[arg(short = 'W', long)]
    pub week_monday: bool,

    /// All time.
    #[arg(short, long)]
    pub all: bool,
}

impl RangeArgs {
    /// The period selected by the flags; [`Period::Now`] when none is set.
    pub const fn period(&self) -> Period {
        if self.all {
            Period::All
        } else if self.day {
            Period::Day
        } else if self.month {
            Period::Month
        } else if self.week {
            Period::Week
        } else if self.week_monday {
            Period::WeekMonday
        } else {
            Period::Now
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("fugit").chain(args.iter().copied()))
    }

    #[test]
    fn no_range_flag_means_now() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.range.period(), Period::Now);
        assert!(cli.tag.is_none());
    }

    #[test]
    fn short_flags_select_periods() {
        for (flag, period) in [
            ("-d", Period::Day),
            ("-m", Period::Month),
            ("-w", Period::Week),
            ("-W", Period::WeekMonday),
            ("-a", Period::All),
        ] {
            let cli = parse(&["-t", "#ok", flag]).unwrap();
            assert_eq!(cli.range.period(), period, "{flag}");
            assert_eq!(cli.tag.as_ref().map(Tag::as_str), Some("#ok"));
        }
    }

    #[test]
    fn tag_is_validated_while_parsing() {
        let err = parse(&["-t", "project1"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

        let cli = parse(&["-t", "x #ab"]).unwrap();
        assert_eq!(cli.tag.as_ref().map(Tag::as_str), Some("x #ab"));
    }

    #[test]
    fn range_flags_are_mutually_exclusive() {
        let err = parse(&["-d", "-m"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
