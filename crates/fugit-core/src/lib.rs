//! Core logic for the fugit time log.
//!
//! This crate contains:
//! - Parsing: turning stanza logs into [`Task`] records, lazily
//! - Pipeline: running the parser on a producer thread behind a bounded channel
//! - Filtering: bounding records to a time window
//! - Aggregation: summing time spent per tag

mod aggregate;
mod error;
mod filter;
pub mod parser;
pub mod pipeline;
mod task;
pub mod types;

pub use aggregate::sum_by_tag;
pub use error::Error;
pub use filter::{FilterRange, filter_range};
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use pipeline::{CHANNEL_CAPACITY, TaskStream, parse_input, parse_stanzas};
pub use task::Task;
pub use types::{Tag, ValidationError};
