//! Console sink
//!
//! Writes formatted lines to stderr. Stderr is line-buffered and shared
//! process-wide, so every emitter can hold its own sink instance.

use super::{Record, Sink, SinkFactory};
use crate::category::Category;
use std::io::{self, Write};

/// Sink writing formatted records to stderr
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn emit(&mut self, record: &Record) {
        let _ = writeln!(io::stderr().lock(), "{}", record.format());
    }
}

/// Factory handing out [`ConsoleSink`]s
pub struct ConsoleFactory;

impl SinkFactory for ConsoleFactory {
    fn create(&self, _category: Category, _name: Option<&str>) -> io::Result<Box<dyn Sink>> {
        Ok(Box::new(ConsoleSink))
    }
}
