//! Errors surfaced by whole-pipeline operations.

use thiserror::Error;

use crate::parser::ParseError;
use crate::types::ValidationError;

/// A failure while consuming a parsed log.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The log is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A caller-supplied parameter was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
