//! Emitter handles
//!
//! An [`Emitter`] is one live logging endpoint bound to a category. It
//! consults the shared verbosity table on every call — never a cached
//! copy — so runtime verbosity changes apply to it immediately.

use crate::category::Category;
use crate::flags::Verbosity;
use crate::sink::{Record, Sink};
use crate::table::VerbosityTable;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// State shared between a handle and the registry's tracked set.
///
/// The sink slot is the handle's Live/Released state: `Some` while live,
/// taken (and dropped) exactly once on release or registry shutdown.
pub(crate) struct EmitterShared {
    pub(crate) category: Category,
    pub(crate) name: Option<String>,
    pub(crate) sink: Mutex<Option<Box<dyn Sink>>>,
}

/// Live logging endpoint for one subsystem.
///
/// Created by [`LoggerRegistry::create`](crate::LoggerRegistry::create) and
/// released either explicitly via
/// [`LoggerRegistry::release`](crate::LoggerRegistry::release) or implicitly
/// when the registry shuts down. After release, [`log`](Self::log) is a
/// no-op.
pub struct Emitter {
    id: u64,
    table: Arc<VerbosityTable>,
    shared: Arc<EmitterShared>,
}

impl Emitter {
    pub(crate) fn new(id: u64, table: Arc<VerbosityTable>, shared: Arc<EmitterShared>) -> Self {
        Self { id, table, shared }
    }

    /// Category this emitter speaks for
    pub fn category(&self) -> Category {
        self.shared.category
    }

    /// Caller-supplied name, if any
    pub fn name(&self) -> Option<&str> {
        self.shared.name.as_deref()
    }

    /// Check whether a line at `severity` would currently be written.
    ///
    /// Lock-free; use this to skip building expensive messages.
    #[inline]
    pub fn enabled(&self, severity: Verbosity) -> bool {
        self.table.is_enabled(self.shared.category, severity)
    }

    /// Emit a line at `severity`.
    ///
    /// Consults the live verbosity table first and returns without further
    /// work when no requested bit is enabled. The message is only
    /// materialized after the check passes.
    pub fn log(&self, severity: Verbosity, message: impl Into<String>) {
        if !self.enabled(severity) {
            return;
        }

        let record = Record::new(
            self.shared.category,
            self.shared.name.clone(),
            severity,
            message.into(),
        );
        if let Some(sink) = self.shared.sink.lock().as_mut() {
            sink.emit(&record);
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn shared(&self) -> &Arc<EmitterShared> {
        &self.shared
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("id", &self.id)
            .field("category", &self.shared.category)
            .field("name", &self.shared.name)
            .finish_non_exhaustive()
    }
}
