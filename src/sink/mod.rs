//! Sink abstraction for the write side of logging
//!
//! Separates the registry's concerns from line output:
//! - **Registry/Emitter**: who may log, at which verbosity (handled there)
//! - **Sink**: where accepted records go (console, file, UDP broadcast...)
//!
//! Each sink manages its own execution model internally:
//! - console: direct writes to stderr
//! - file: dedicated writer thread with buffered writes and rotation
//! - net: dedicated broadcaster thread sending JSON over UDP
//!
//! # Adding a new sink
//!
//! 1. Create `sink/my_sink.rs`
//! 2. Implement the `Sink` and `SinkFactory` traits
//! 3. Add `pub mod my_sink;` here
//! 4. No other changes needed

pub mod console;
pub mod file;
pub mod net;

pub use console::{ConsoleFactory, ConsoleSink};
pub use file::{FileFactory, FileSink, FileSinkConfig};
pub use net::{UdpBroadcastFactory, UdpBroadcastSink};

use crate::category::Category;
use crate::flags::Verbosity;
use serde::{Deserialize, Serialize};
use std::io;

/// One accepted log line (serializable for UDP broadcast)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub timestamp: String, // HH:MM:SS.mmm
    pub category: Category,
    /// Caller-supplied emitter name, if any
    pub name: Option<String>,
    /// Verbosity bit(s) the line was emitted at
    pub severity: Verbosity,
    pub message: String,
}

impl Record {
    /// Current timestamp as HH:MM:SS.mmm
    #[inline]
    fn now() -> String {
        chrono::Local::now().format("%H:%M:%S%.3f").to_string()
    }

    /// Create a record stamped with the current time
    pub fn new(
        category: Category,
        name: Option<String>,
        severity: Verbosity,
        message: String,
    ) -> Self {
        Self {
            timestamp: Self::now(),
            category,
            name,
            severity,
            message,
        }
    }

    /// Render the human-readable line.
    ///
    /// The category label is always present; the emitter name is appended
    /// to it when set.
    pub fn format(&self) -> String {
        match &self.name {
            Some(name) => format!(
                "{} [{}:{}] [{}] {}",
                self.timestamp,
                self.category.label(),
                name,
                self.severity,
                self.message
            ),
            None => format!(
                "{} [{}] [{}] {}",
                self.timestamp,
                self.category.label(),
                self.severity,
                self.message
            ),
        }
    }
}

/// Trait for log destinations
///
/// A sink receives records that already passed the verbosity check. It
/// handles:
/// - Rendering (or serializing) the record
/// - Writing to its destination
/// - Its own buffering/threading model
///
/// A sink does NOT handle:
/// - Verbosity decisions (that's the table's job)
/// - Handle lifetime (that's the registry's job)
///
/// Resource teardown happens on `Drop`; the registry drops the sink when
/// the owning emitter is released.
pub trait Sink: Send {
    /// Write one record to the destination.
    ///
    /// Must not block the caller beyond brief buffering; sinks with slow
    /// destinations queue internally and drop lines when saturated.
    fn emit(&mut self, record: &Record);
}

/// Trait for sink construction
///
/// The registry calls this once per [`create`](crate::LoggerRegistry::create)
/// to build the sink an emitter will write through. Factories for shared
/// destinations (one log file, one broadcast socket) hand out lightweight
/// sinks that feed a common writer.
///
/// # Errors
///
/// `create` fails when the destination cannot be set up (file not
/// writable, socket unavailable). The registry reports this as a sink
/// allocation failure and tracks nothing.
pub trait SinkFactory: Send + Sync {
    fn create(&self, category: Category, name: Option<&str>) -> io::Result<Box<dyn Sink>>;
}
