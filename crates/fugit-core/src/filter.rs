//! Time-window filtering over an ordered record sequence.

use chrono::{DateTime, Utc};

use crate::parser::ParseError;
use crate::task::Task;

/// Iterator adapter returned by [`filter_range`].
#[derive(Debug)]
pub struct FilterRange<I> {
    tasks: I,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    done: bool,
}

/// Keeps records whose start lies after `from` and not after `to`.
///
/// The input is assumed to be in ascending start order, as a well-formed log
/// is. The first record starting after `to` ends the sequence without reading
/// further, so an out-of-order record behind it is dropped even if it would
/// have matched. A record starting exactly at `from` is excluded.
///
/// Parse errors are passed through and end the sequence.
pub fn filter_range<I>(tasks: I, from: DateTime<Utc>, to: DateTime<Utc>) -> FilterRange<I::IntoIter>
where
    I: IntoIterator<Item = Result<Task, ParseError>>,
{
    FilterRange {
        tasks: tasks.into_iter(),
        from,
        to,
        done: false,
    }
}

impl<I> Iterator for FilterRange<I>
where
    I: Iterator<Item = Result<Task, ParseError>>,
{
    type Item = Result<Task, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        for item in self.tasks.by_ref() {
            let task = match item {
                Ok(task) => task,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            };
            if task.start > self.to {
                tracing::debug!(start = %task.start, to = %self.to, "past the window, stopping");
                self.done = true;
                return None;
            }
            if task.start > self.from {
                return Some(Ok(task));
            }
        }

        self.done = true;
        None
    }
}

impl<I> std::iter::FusedIterator for FilterRange<I> where I: Iterator<Item = Result<Task, ParseError>> {}
