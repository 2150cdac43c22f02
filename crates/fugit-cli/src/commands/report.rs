//! Report generation over a time log.
//!
//! Wires the pipeline together: parse the log on a producer thread, keep the
//! records inside the requested window, then summarise them (and total the
//! tagged ones) in a single pass.

use std::fmt::Write;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use fugit_core::{ParseError, Tag, Task, filter_range, parse_input, sum_by_tag};
use serde::Serialize;

use crate::range::Window;

/// Time spent on one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTotal {
    pub tag: Tag,
    pub spent: TimeDelta,
}

/// Aggregates over the records of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    /// Start of the first record.
    pub first: Option<DateTime<Utc>>,
    /// End of the last record.
    pub last: Option<DateTime<Utc>>,
    pub total: TimeDelta,
    pub tagged: Option<TagTotal>,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            count: 0,
            first: None,
            last: None,
            total: TimeDelta::zero(),
            tagged: None,
        }
    }
}

impl Summary {
    fn observe(&mut self, task: &Task) {
        if self.count == 0 {
            self.first = Some(task.start);
        }
        self.last = Some(task.end());
        self.total += task.duration;
        self.count += 1;
    }
}

/// Summarises `tasks`, also totalling time on `tag` when given.
///
/// Both totals come from one pass over the sequence.
pub fn summarize<I>(tasks: I, tag: Option<&Tag>) -> Result<Summary, fugit_core::Error>
where
    I: IntoIterator<Item = Result<Task, ParseError>>,
{
    let mut summary = Summary::default();
    match tag {
        Some(tag) => {
            let observed = tasks
                .into_iter()
                .map(|item| item.inspect(|task| summary.observe(task)));
            let spent = sum_by_tag(observed, tag.as_str())?;
            summary.tagged = Some(TagTotal {
                tag: tag.clone(),
                spent,
            });
        }
        None => {
            for task in tasks {
                summary.observe(&task?);
            }
        }
    }
    Ok(summary)
}

// ========== Duration Formatting ==========

/// Formats a duration as "Xh Ym" if >= 1 hour, "Xm" otherwise.
pub fn format_duration(duration: TimeDelta) -> String {
    let total_minutes = duration.num_minutes();
    let sign = if total_minutes < 0 { "-" } else { "" };
    let total_minutes = total_minutes.unsigned_abs();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 1 {
        format!("{sign}{hours}h {minutes}m")
    } else {
        format!("{sign}{minutes}m")
    }
}

/// Formats the human-readable report output.
pub fn format_report(file: &Path, summary: &Summary) -> String {
    let mut output = String::new();

    writeln!(output, "OK: {}", file.display()).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Read {} tasks", summary.count).unwrap();

    if let (Some(first), Some(last)) = (summary.first, summary.last) {
        writeln!(output, "From {first}").unwrap();
        writeln!(output, "To   {last}").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "Time spent: {}", format_duration(summary.total)).unwrap();
        if let Some(tagged) = &summary.tagged {
            writeln!(
                output,
                "Time spent on {}: {}",
                tagged.tag,
                format_duration(tagged.spent)
            )
            .unwrap();
        }
    }

    output
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub file: &'a Path,
    pub window: Window,
    pub tasks: usize,
    pub first: Option<DateTime<Utc>>,
    pub last: Option<DateTime<Utc>>,
    pub total_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<&'a Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_minutes: Option<i64>,
}

/// Formats the report as JSON.
pub fn format_report_json(file: &Path, window: Window, summary: &Summary) -> Result<String> {
    let report = JsonReport {
        file,
        window,
        tasks: summary.count,
        first: summary.first,
        last: summary.last,
        total_minutes: summary.total.num_minutes(),
        tag: summary.tagged.as_ref().map(|t| &t.tag),
        tag_minutes: summary.tagged.as_ref().map(|t| t.spent.num_minutes()),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the report over the log at `file`.
pub fn run<W: io::Write>(
    writer: &mut W,
    file: &Path,
    window: Window,
    tag: Option<&Tag>,
    json: bool,
) -> Result<()> {
    let log = File::open(file).with_context(|| format!("failed to open {}", file.display()))?;
    tracing::debug!(file = %file.display(), from = %window.from, to = %window.to, "reading log");

    let tasks = filter_range(parse_input(BufReader::new(log)), window.from, window.to);
    let summary =
        summarize(tasks, tag).with_context(|| format!("cannot report on {}", file.display()))?;

    if json {
        writeln!(writer, "{}", format_report_json(file, window, &summary)?)?;
    } else {
        write!(writer, "{}", format_report(file, &summary))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fugit_core::{Error, ParseErrorKind, Parser};
    use insta::assert_snapshot;

    const LOG: &str = "
2021-09-30
    21:00-22:30 Work on #project1 and #project3
    22:30-23:00 Work on #project2

2021-10-01
    10:00-11:00 Work on #project1
    11:30-13:00 Lunch
";

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn summary_of(log: &str, tag: Option<&str>) -> Result<Summary, Error> {
        let tag = tag.map(|t| Tag::new(t).unwrap());
        summarize(Parser::new(log.as_bytes()), tag.as_ref())
    }

    // ========== Summary Tests ==========

    #[test]
    fn test_summary_without_tag() {
        let summary = summary_of(LOG, None).unwrap();

        assert_eq!(summary.count, 4);
        assert_eq!(summary.first, Some(utc(2021, 9, 30, 21, 0)));
        assert_eq!(summary.last, Some(utc(2021, 10, 1, 13, 0)));
        assert_eq!(summary.total, TimeDelta::minutes(90 + 30 + 60 + 90));
        assert!(summary.tagged.is_none());
    }

    #[test]
    fn test_summary_with_tag_counts_everything() {
        let summary = summary_of(LOG, Some("#project1")).unwrap();

        assert_eq!(summary.count, 4);
        assert_eq!(summary.total, TimeDelta::minutes(270));
        assert_eq!(
            summary.tagged,
            Some(TagTotal {
                tag: Tag::new("#project1").unwrap(),
                spent: TimeDelta::minutes(150),
            })
        );
    }

    #[test]
    fn test_summary_empty() {
        let summary = summary_of("", Some("#x1")).unwrap();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.first, None);
        assert_eq!(summary.tagged.unwrap().spent, TimeDelta::zero());
    }

    #[test]
    fn test_summary_propagates_parse_error() {
        let err = summary_of("  10:00-11:00 orphan\n", None).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError {
                line: 1,
                kind: ParseErrorKind::OutsideStanza
            })
        ));
    }

    // ========== Duration Formatting Tests ==========

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::zero()), "0m");
        assert_eq!(format_duration(TimeDelta::minutes(45)), "45m");
        assert_eq!(format_duration(TimeDelta::minutes(60)), "1h 0m");
        assert_eq!(format_duration(TimeDelta::minutes(150)), "2h 30m");
        assert_eq!(format_duration(TimeDelta::seconds(119)), "1m");
        assert_eq!(format_duration(TimeDelta::minutes(-90)), "-1h 30m");
    }

    // ========== Rendering Tests ==========

    #[test]
    fn test_report_with_tag() {
        let summary = summary_of(LOG, Some("#project1")).unwrap();
        let output = format_report(Path::new("/logs/fugit.txt"), &summary);
        assert_snapshot!(output, @r"
        OK: /logs/fugit.txt

        Read 4 tasks
        From 2021-09-30 21:00:00 UTC
        To   2021-10-01 13:00:00 UTC

        Time spent: 4h 30m
        Time spent on #project1: 2h 30m
        ");
    }

    #[test]
    fn test_report_no_tasks() {
        let output = format_report(Path::new("/logs/fugit.txt"), &Summary::default());
        assert_snapshot!(output, @r"
        OK: /logs/fugit.txt

        Read 0 tasks
        ");
    }

    #[test]
    fn test_report_json() {
        let summary = summary_of(LOG, Some("#project2")).unwrap();
        let window = Window {
            from: utc(2021, 9, 1, 0, 0),
            to: utc(2021, 10, 31, 23, 59),
        };
        let json = format_report_json(Path::new("/logs/fugit.txt"), window, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["file"], "/logs/fugit.txt");
        assert_eq!(value["tasks"], 4);
        assert_eq!(value["first"], "2021-09-30T21:00:00Z");
        assert_eq!(value["last"], "2021-10-01T13:00:00Z");
        assert_eq!(value["total_minutes"], 270);
        assert_eq!(value["tag"], "#project2");
        assert_eq!(value["tag_minutes"], 30);
        assert_eq!(value["window"]["from"], "2021-09-01T00:00:00Z");
    }

    #[test]
    fn test_report_json_omits_tag_fields() {
        let summary = summary_of(LOG, None).unwrap();
        let window = Window {
            from: utc(2021, 9, 1, 0, 0),
            to: utc(2021, 10, 31, 23, 59),
        };
        let json = format_report_json(Path::new("/logs/fugit.txt"), window, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("tag").is_none());
        assert!(value.get("tag_minutes").is_none());
    }

    // ========== Run Tests ==========

    #[test]
    fn test_run_filters_to_window() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("log.txt");
        std::fs::write(&path, LOG).unwrap();

        let window = Window {
            from: utc(2021, 10, 1, 0, 0),
            to: utc(2021, 10, 1, 23, 59),
        };
        let mut output = Vec::new();
        let tag = Tag::new("#project1").unwrap();
        run(&mut output, &path, window, Some(&tag), false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Read 2 tasks"), "{output}");
        assert!(output.contains("Time spent: 2h 30m"), "{output}");
        assert!(output.contains("Time spent on #project1: 1h 0m"), "{output}");
    }

    #[test]
    fn test_run_missing_file_fails() {
        let temp = tempfile::tempdir().unwrap();
        let window = Window {
            from: utc(2021, 1, 1, 0, 0),
            to: utc(2022, 1, 1, 0, 0),
        };
        let mut output = Vec::new();
        let err = run(&mut output, &temp.path().join("missing.txt"), window, None, false).unwrap_err();

        assert!(err.to_string().contains("failed to open"));
        assert!(output.is_empty());
    }
}
