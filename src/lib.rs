//! Runtime-configurable logging registry for multi-threaded daemons
//!
//! Every daemon subsystem obtains a named emitter tagged with its
//! [`Category`]; an operator can change any category's [`Verbosity`] at
//! runtime without restarting the process and without disturbing threads
//! that are actively logging.
//!
//! Centralizes the registry types and utilities:
//! - `Category` / `Verbosity` - subsystem tags and verbosity bitmasks
//! - `VerbosityTable` - lock-free per-category verbosity lookup
//! - `Emitter` - live logging endpoint handed out by the registry
//! - `LoggerRegistry` - emitter factory and lifecycle bookkeeping
//! - `sink` - pluggable write side (console, rotating file, UDP broadcast)
//!
//! # Example
//!
//! ```rust
//! use log_registry::{Category, ConsoleFactory, LoggerRegistry, Verbosity};
//!
//! let registry = LoggerRegistry::new(Verbosity::ERROR, ConsoleFactory);
//! let worker = registry.create(Category::Worker, Some("pool-0"))?;
//!
//! // ERROR is on from construction, DEBUG is not
//! worker.log(Verbosity::DEBUG, "suppressed");
//!
//! // Takes effect for the existing handle immediately
//! registry.enable(Category::Worker, Verbosity::DEBUG);
//! worker.log(Verbosity::DEBUG, "now visible");
//!
//! registry.release(&worker)?;
//! registry.shutdown();
//! # Ok::<(), log_registry::RegistryError>(())
//! ```

pub mod category;
pub mod constants;
pub mod emitter;
pub mod error;
pub mod flags;
pub mod registry;
pub mod sink;
pub mod table;

pub use category::Category;
pub use emitter::Emitter;
pub use error::{RegistryError, Result};
pub use flags::Verbosity;
pub use registry::LoggerRegistry;
pub use sink::{
    ConsoleFactory, FileFactory, FileSinkConfig, Record, Sink, SinkFactory, UdpBroadcastFactory,
};
pub use table::VerbosityTable;

/// Initialize internal tracing for registry debug output
///
/// Call early in the embedding daemon's main() before any logging occurs.
/// Set `verbose` to true for debug-level output.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .compact(),
        )
        .with(tracing_subscriber::EnvFilter::new(level))
        .try_init();
}
