//! Line-oriented parser for stanza time logs.
//!
//! A log is a sequence of stanzas. Each stanza opens with a day line and is
//! followed by indented task lines:
//!
//! ```text
//! 2021-09-30
//!     21:00-22:30 Work on #project1
//!     22:30-23:00 Reading
//! ```
//!
//! Empty lines are ignored anywhere; a line of only spaces is not empty.
//! The parser is a pull-based iterator, so records become available as soon
//! as their line has been read.

use std::io::{self, BufRead};
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::{Captures, Regex};
use thiserror::Error;

use crate::task::Task;

/// A day line: `YYYY-MM-DD`, optionally followed by spaces.
pub const DAY_LINE_PATTERN: &str = r"^([0-9]{4}-[0-9]{2}-[0-9]{2}) *$";

/// A task line: indentation, `HH:MM-HH:MM`, at least one space, then the description.
///
/// The separator is lazy so any extra spacing stays part of the description.
pub const TASK_LINE_PATTERN: &str =
    r"^ +?([01][0-9]|2[0-3]):([0-5][0-9])-([01][0-9]|2[0-3]):([0-5][0-9]) +?(.+)$";

static DAY_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(DAY_LINE_PATTERN).unwrap());
static TASK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(TASK_LINE_PATTERN).unwrap());

/// Why a line was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A day line whose date does not exist on the calendar.
    #[error("wrong date format")]
    WrongDateFormat,

    /// A task line before the first day line.
    #[error("cannot parse tasks outside a stanza")]
    OutsideStanza,

    /// A non-blank line that is neither a day line nor a task line.
    #[error("syntax error")]
    Syntax,

    /// The line could not be read from the source.
    #[error("cannot read input: {0}")]
    Read(String),
}

/// A fatal parse failure. Ends the record sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based number of the offending line.
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// Grammar state between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingStanza,
    InStanza { day: NaiveDate },
}

impl State {
    /// Consumes one line, returning the next state and the task it produced, if any.
    fn advance(self, line: &str) -> Result<(Self, Option<Task>), ParseErrorKind> {
        if line.is_empty() {
            return Ok((self, None));
        }

        if let Some(caps) = TASK_LINE_RE.captures(line) {
            let Self::InStanza { day } = self else {
                return Err(ParseErrorKind::OutsideStanza);
            };
            let from = clock_time(&caps, 1)?;
            let to = clock_time(&caps, 3)?;
            let task = Task::on_day(day, from, to, caps[5].to_string());
            if task.duration < chrono::TimeDelta::zero() {
                tracing::warn!(start = %task.start, "task interval crosses midnight, duration is negative");
            }
            return Ok((self, Some(task)));
        }

        if let Some(caps) = DAY_LINE_RE.captures(line) {
            let day = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d")
                .map_err(|_| ParseErrorKind::WrongDateFormat)?;
            tracing::trace!(%day, "stanza");
            return Ok((Self::InStanza { day }, None));
        }

        Err(ParseErrorKind::Syntax)
    }
}

/// Reads the `HH` and `MM` captures starting at group `first`.
fn clock_time(caps: &Captures<'_>, first: usize) -> Result<NaiveTime, ParseErrorKind> {
    let hour: u32 = caps[first].parse().map_err(|_| ParseErrorKind::Syntax)?;
    let minute: u32 = caps[first + 1]
        .parse()
        .map_err(|_| ParseErrorKind::Syntax)?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(ParseErrorKind::Syntax)
}

/// Iterator turning log lines into [`Task`]s.
///
/// Yields at most one error, after which it is exhausted. Single pass.
#[derive(Debug)]
pub struct Parser<I> {
    lines: I,
    state: State,
    line_no: usize,
    failed: bool,
}

impl<R: BufRead> Parser<io::Lines<R>> {
    /// Creates a parser reading lines from `reader`.
    pub fn new(reader: R) -> Self {
        Self::from_lines(reader.lines())
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    /// Creates a parser over an existing line source.
    pub const fn from_lines(lines: I) -> Self {
        Self {
            lines,
            state: State::AwaitingStanza,
            line_no: 0,
            failed: false,
        }
    }

    /// Number of lines consumed so far.
    pub const fn line_number(&self) -> usize {
        self.line_no
    }

    const fn fail(&mut self, kind: ParseErrorKind) -> ParseError {
        self.failed = true;
        ParseError {
            line: self.line_no,
            kind,
        }
    }
}

impl<I> Iterator for Parser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<Task, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let line = self.lines.next()?;
            self.line_no += 1;

            let line = match line {
                Ok(line) => line,
                Err(err) => return Some(Err(self.fail(ParseErrorKind::Read(err.to_string())))),
            };

            match self.state.advance(&line) {
                Ok((state, task)) => {
                    self.state = state;
                    if let Some(task) = task {
                        return Some(Ok(task));
                    }
                }
                Err(kind) => return Some(Err(self.fail(kind))),
            }
        }
    }
}

impl<I> std::iter::FusedIterator for Parser<I> where I: std::iter::FusedIterator<Item = io::Result<String>> {}
