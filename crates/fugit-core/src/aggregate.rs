//! Duration totals over record sequences.

use chrono::TimeDelta;

use crate::error::Error;
use crate::parser::ParseError;
use crate::task::Task;
use crate::types::Tag;

/// Sums the durations of all records whose description contains `tag`.
///
/// The tag is validated before anything is read. Containment is a plain
/// substring test, so `#project1` also counts `#project10`. Drains the whole
/// sequence and stops at the first parse error.
pub fn sum_by_tag<I>(tasks: I, tag: &str) -> Result<TimeDelta, Error>
where
    I: IntoIterator<Item = Result<Task, ParseError>>,
{
    let tag = Tag::new(tag)?;
    let mut spent = TimeDelta::zero();
    for task in tasks {
        let task = task?;
        if tag.is_in(&task.description) {
            spent += task.duration;
        }
    }
    tracing::debug!(%tag, minutes = spent.num_minutes(), "tag total");
    Ok(spent)
}
