//! Producer/consumer plumbing between the parser and its consumers.
//!
//! [`parse_input`] runs a [`Parser`] on its own thread and hands records over
//! a bounded channel, so parsing and consumption overlap while memory stays
//! bounded by [`CHANNEL_CAPACITY`].

use std::io::BufRead;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, bounded};

use crate::parser::{ParseError, Parser};
use crate::task::Task;

/// Records buffered between producer and consumer before the producer blocks.
pub const CHANNEL_CAPACITY: usize = 100;

/// Consumer side of a running parse.
///
/// Yields records in log order. A parse failure arrives as a final `Err`
/// item. Dropping the stream early stops the producer at its next send.
#[derive(Debug)]
pub struct TaskStream {
    rx: Receiver<Result<Task, ParseError>>,
    producer: Option<JoinHandle<()>>,
}

impl Iterator for TaskStream {
    type Item = Result<Task, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Ok(item) = self.rx.recv() {
            return Some(item);
        }
        // Disconnected: the producer is done, or it panicked.
        if let Some(handle) = self.producer.take() {
            if let Err(panic) = handle.join() {
                std::panic::resume_unwind(panic);
            }
        }
        None
    }
}

/// Starts parsing `reader` on a background thread.
pub fn parse_input<R>(reader: R) -> TaskStream
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = bounded(CHANNEL_CAPACITY);
    let producer = thread::spawn(move || {
        tracing::debug!("parser started");
        let mut parser = Parser::new(reader);
        while let Some(item) = parser.next() {
            if tx.send(item).is_err() {
                tracing::debug!(line = parser.line_number(), "consumer dropped the stream");
                return;
            }
        }
        tracing::debug!(lines = parser.line_number(), "parser finished");
    });

    TaskStream {
        rx,
        producer: Some(producer),
    }
}

/// Parses a whole log into memory.
pub fn parse_stanzas<R>(reader: R) -> Result<Vec<Task>, ParseError>
where
    R: BufRead + Send + 'static,
{
    parse_input(reader).collect()
}
