//! Per-category verbosity table
//!
//! Fixed-size table mapping each [`Category`] to its currently enabled
//! [`Verbosity`] bits. One atomic word per category:
//! - reads are plain atomic loads (the emitter hot path)
//! - updates are atomic read-modify-writes, so two updates to the same
//!   category serialize and a racing read only ever observes a whole
//!   pre- or post-update mask
//! - entries are independent; touching one category never blocks another

use crate::category::Category;
use crate::flags::Verbosity;
use std::sync::atomic::{AtomicU32, Ordering};

/// Category → verbosity mapping, shared by every emitter of a registry.
///
/// All entries start at the default supplied to [`VerbosityTable::new`].
/// Updates made through [`enable`](Self::enable)/[`disable`](Self::disable)
/// are visible to every subsequent [`get`](Self::get) on any thread.
pub struct VerbosityTable {
    entries: [AtomicU32; Category::COUNT],
}

impl VerbosityTable {
    /// Create a table with every category set to `default`
    pub fn new(default: Verbosity) -> Self {
        Self {
            entries: std::array::from_fn(|_| AtomicU32::new(default.bits())),
        }
    }

    /// Current verbosity of a category
    #[inline]
    pub fn get(&self, category: Category) -> Verbosity {
        Verbosity::from_bits_retain(self.entries[category.index()].load(Ordering::SeqCst))
    }

    /// Check whether any of `flags` is enabled for a category.
    ///
    /// This is the per-line decision emitters make before doing any work.
    #[inline]
    pub fn is_enabled(&self, category: Category, flags: Verbosity) -> bool {
        self.get(category).intersects(flags)
    }

    /// Union `flags` into a category's current set. Idempotent.
    pub fn enable(&self, category: Category, flags: Verbosity) {
        self.entries[category.index()].fetch_or(flags.bits(), Ordering::SeqCst);
    }

    /// Clear `flags` from a category's current set. Idempotent.
    pub fn disable(&self, category: Category, flags: Verbosity) {
        self.entries[category.index()].fetch_and(!flags.bits(), Ordering::SeqCst);
    }
}
