//! Report windows derived from the current time.
//!
//! All boundaries are computed in UTC. Windows are inclusive at the end, with
//! the upper bound one second before the next period starts.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Serialize;

/// Named report periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// The instant of the call; an empty window.
    Now,
    Day,
    Month,
    /// Sunday through Saturday.
    Week,
    /// Monday through Sunday.
    WeekMonday,
    All,
}

/// Bounds handed to the range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

const fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Window from `first` 00:00:00 through the second before `next` 00:00:00.
fn days_window(first: NaiveDate, next: NaiveDate) -> Window {
    Window {
        from: midnight(first),
        to: midnight(next) - TimeDelta::seconds(1),
    }
}

fn week_from(start: NaiveDate) -> Window {
    days_window(start, start + Days::new(7))
}

impl Period {
    /// Computes the window for this period around `now`.
    pub fn window(self, now: DateTime<Utc>) -> Window {
        let today = now.date_naive();
        match self {
            Self::Now => Window { from: now, to: now },
            Self::All => Window {
                from: DateTime::<Utc>::MIN_UTC,
                to: DateTime::<Utc>::MAX_UTC,
            },
            Self::Day => days_window(today, today + Days::new(1)),
            Self::Month => {
                let first = today - Days::new(u64::from(today.day0()));
                let next = first
                    .checked_add_months(Months::new(1))
                    .unwrap_or(NaiveDate::MAX);
                days_window(first, next)
            }
            Self::Week => {
                let back = today.weekday().num_days_from_sunday();
                week_from(today - Days::new(u64::from(back)))
            }
            Self::WeekMonday => {
                let back = today.weekday().num_days_from_monday();
                week_from(today - Days::new(u64::from(back)))
            }
        }
    }
}
