//! fugit CLI library.
//!
//! This crate provides the CLI interface for reporting on a fugit time log.

mod cli;
pub mod commands;
mod config;
pub mod range;

pub use cli::{Cli, RangeArgs};
pub use config::{Config, FILE_ENV};
pub use range::{Period, Window};
