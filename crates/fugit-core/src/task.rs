//! Parsed time-log entries.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

/// One interval of work read from a task line.
///
/// Built once by the parser and handed down the pipeline by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// When the interval began.
    pub start: DateTime<Utc>,
    /// Length of the interval. Negative only for intervals written across midnight.
    pub duration: TimeDelta,
    /// Free text following the interval, tags included.
    pub description: String,
}

impl Task {
    /// Builds a task from the day of its stanza and the clock times of its line.
    pub fn on_day(day: NaiveDate, from: NaiveTime, to: NaiveTime, description: String) -> Self {
        let start = day.and_time(from).and_utc();
        let end = day.and_time(to).and_utc();
        Self {
            start,
            duration: end - start,
            description,
        }
    }

    /// When the interval ended.
    pub fn end(&self) -> DateTime<Utc> {
        self.start + self.duration
    }
}
