//! Emitter registry
//!
//! Factory and bookkeeper for [`Emitter`] handles. Owns the verbosity
//! table and the set of handles it has not yet released; remaining
//! handles are released when the registry shuts down or is dropped.

use crate::category::Category;
use crate::emitter::{Emitter, EmitterShared};
use crate::error::{RegistryError, Result};
use crate::flags::Verbosity;
use crate::sink::SinkFactory;
use crate::table::VerbosityTable;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Registry creating, tracking, and tearing down emitter handles.
///
/// Any number of threads may call any method concurrently. Verbosity
/// lookups and updates go through per-category atomics; the tracked set
/// has its own lock, so a verbosity change never blocks a concurrent
/// create/release and vice versa.
pub struct LoggerRegistry {
    table: Arc<VerbosityTable>,
    factory: Box<dyn SinkFactory>,
    tracked: Mutex<HashMap<u64, Arc<EmitterShared>>>,
    next_id: AtomicU64,
}

impl LoggerRegistry {
    /// Create a registry with every category at `default_verbosity`.
    ///
    /// `factory` is the external capability that builds the write side of
    /// each emitter.
    pub fn new(default_verbosity: Verbosity, factory: impl SinkFactory + 'static) -> Self {
        Self {
            table: Arc::new(VerbosityTable::new(default_verbosity)),
            factory: Box::new(factory),
            tracked: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a new emitter for `category`.
    ///
    /// The category label is always part of emitted lines; `name` is an
    /// optional additional tag (empty counts as absent). The handle is
    /// tracked by this registry until released here or at shutdown.
    ///
    /// # Errors
    ///
    /// [`RegistryError::SinkAllocation`] when the factory cannot build the
    /// sink; nothing is tracked in that case.
    pub fn create(&self, category: Category, name: Option<&str>) -> Result<Emitter> {
        let name = name.filter(|n| !n.is_empty());

        let sink = self
            .factory
            .create(category, name)
            .map_err(|source| RegistryError::SinkAllocation { category, source })?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let shared = Arc::new(EmitterShared {
            category,
            name: name.map(str::to_owned),
            sink: Mutex::new(Some(sink)),
        });
        self.tracked.lock().insert(id, Arc::clone(&shared));

        debug!("created emitter {} (id {})", category, id);
        Ok(Emitter::new(id, Arc::clone(&self.table), shared))
    }

    /// Release an emitter and dispose of its sink.
    ///
    /// The handle must not be used for logging afterwards (further `log`
    /// calls are no-ops).
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidHandle`] when the handle is not currently
    /// tracked here — already released, or created by another registry.
    /// The tracked set is left untouched in that case.
    pub fn release(&self, emitter: &Emitter) -> Result<()> {
        let shared = {
            let mut tracked = self.tracked.lock();
            // Id match alone is not enough: ids restart at 1 in every
            // registry, so verify it is the same handle.
            let is_ours = tracked
                .get(&emitter.id())
                .map_or(false, |entry| Arc::ptr_eq(entry, emitter.shared()));
            if is_ours {
                tracked.remove(&emitter.id())
            } else {
                None
            }
        };

        match shared {
            Some(shared) => {
                // Dispose outside the tracked-set lock (drop may flush I/O)
                drop(shared.sink.lock().take());
                debug!("released emitter {} (id {})", emitter.category(), emitter.id());
                Ok(())
            }
            None => Err(RegistryError::InvalidHandle {
                category: emitter.category(),
                name: emitter.name().map(str::to_owned),
            }),
        }
    }

    /// Current verbosity of a category
    pub fn level(&self, category: Category) -> Verbosity {
        self.table.get(category)
    }

    /// Union `flags` into a category's verbosity.
    ///
    /// Takes effect immediately for every live emitter of the category;
    /// handles read the table on each decision, never a cached copy.
    pub fn enable(&self, category: Category, flags: Verbosity) {
        self.table.enable(category, flags);
        debug!("verbosity for {} now {}", category, self.table.get(category));
    }

    /// Clear `flags` from a category's verbosity. Same immediacy as
    /// [`enable`](Self::enable).
    pub fn disable(&self, category: Category, flags: Verbosity) {
        self.table.disable(category, flags);
        debug!("verbosity for {} now {}", category, self.table.get(category));
    }

    /// Number of handles currently tracked
    pub fn tracked_count(&self) -> usize {
        self.tracked.lock().len()
    }

    /// Release every handle still tracked, in no particular order.
    ///
    /// Callers must stop logging through outstanding handles before this
    /// begins; their `log` calls become no-ops once released. Also runs
    /// implicitly when the registry is dropped.
    pub fn shutdown(&self) {
        let released = self.release_all();
        debug!("registry shut down, released {} emitter(s)", released);
    }

    fn release_all(&self) -> usize {
        // Drain under the lock, dispose outside it
        let drained: Vec<Arc<EmitterShared>> = {
            let mut tracked = self.tracked.lock();
            tracked.drain().map(|(_, shared)| shared).collect()
        };

        let count = drained.len();
        for shared in drained {
            drop(shared.sink.lock().take());
        }
        count
    }
}

impl Drop for LoggerRegistry {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{Record, Sink};
    use std::io;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex as StdMutex;

    // === Test collaborator counting construct/emit/dispose ===

    #[derive(Default)]
    struct SinkCounters {
        created: AtomicUsize,
        disposed: AtomicUsize,
        records: StdMutex<Vec<Record>>,
    }

    struct CountingSink {
        counters: Arc<SinkCounters>,
    }

    impl Sink for CountingSink {
        fn emit(&mut self, record: &Record) {
            self.counters.records.lock().unwrap().push(record.clone());
        }
    }

    impl Drop for CountingSink {
        fn drop(&mut self) {
            self.counters.disposed.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct CountingFactory {
        counters: Arc<SinkCounters>,
        fail: bool,
    }

    impl CountingFactory {
        fn new(counters: Arc<SinkCounters>) -> Self {
            Self {
                counters,
                fail: false,
            }
        }
    }

    impl SinkFactory for CountingFactory {
        fn create(&self, _category: Category, _name: Option<&str>) -> io::Result<Box<dyn Sink>> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::Other, "no resources"));
            }
            self.counters.created.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(CountingSink {
                counters: self.counters.clone(),
            }))
        }
    }

    fn counting_registry(default: Verbosity) -> (LoggerRegistry, Arc<SinkCounters>) {
        let counters = Arc::new(SinkCounters::default());
        let registry = LoggerRegistry::new(default, CountingFactory::new(counters.clone()));
        (registry, counters)
    }

    // === Creation / release ===

    #[test]
    fn test_create_tracks_handle() {
        let (registry, counters) = counting_registry(Verbosity::ERROR);
        assert_eq!(registry.tracked_count(), 0);

        let _h1 = registry.create(Category::Worker, None).unwrap();
        let _h2 = registry.create(Category::Worker, Some("pool-1")).unwrap();

        assert_eq!(registry.tracked_count(), 2);
        assert_eq!(counters.created.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_name_counts_as_absent() {
        let (registry, _counters) = counting_registry(Verbosity::ERROR);
        let h = registry.create(Category::Daemon, Some("")).unwrap();
        assert_eq!(h.name(), None);
    }

    #[test]
    fn test_release_untracks_and_disposes() {
        let (registry, counters) = counting_registry(Verbosity::ERROR);
        let h = registry.create(Category::Worker, None).unwrap();

        registry.release(&h).unwrap();

        assert_eq!(registry.tracked_count(), 0);
        assert_eq!(counters.disposed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_double_release_is_invalid_handle() {
        let (registry, counters) = counting_registry(Verbosity::ERROR);
        let h = registry.create(Category::Worker, Some("pool-0")).unwrap();

        registry.release(&h).unwrap();
        let err = registry.release(&h).unwrap_err();

        assert!(matches!(err, RegistryError::InvalidHandle { .. }));
        // Disposed exactly once despite the second call
        assert_eq!(counters.disposed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_foreign_handle_is_invalid_and_harmless() {
        let (registry_a, _counters_a) = counting_registry(Verbosity::ERROR);
        let (registry_b, counters_b) = counting_registry(Verbosity::ERROR);

        // Both ids are 1; registry_b must still reject registry_a's handle
        let foreign = registry_a.create(Category::Worker, None).unwrap();
        let _own = registry_b.create(Category::Worker, None).unwrap();

        let err = registry_b.release(&foreign).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidHandle { .. }));

        // registry_b's own handle is untouched
        assert_eq!(registry_b.tracked_count(), 1);
        assert_eq!(counters_b.disposed.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failed_allocation_tracks_nothing() {
        let counters = Arc::new(SinkCounters::default());
        let registry = LoggerRegistry::new(
            Verbosity::ERROR,
            CountingFactory {
                counters: counters.clone(),
                fail: true,
            },
        );

        let err = registry.create(Category::Worker, None).unwrap_err();
        assert!(matches!(err, RegistryError::SinkAllocation { .. }));
        assert_eq!(registry.tracked_count(), 0);
    }

    // === Verbosity delegation ===

    #[test]
    fn test_level_reflects_enable_disable() {
        let (registry, _counters) = counting_registry(Verbosity::ERROR);

        registry.enable(Category::Worker, Verbosity::DEBUG);
        assert_eq!(
            registry.level(Category::Worker),
            Verbosity::ERROR | Verbosity::DEBUG
        );

        registry.disable(Category::Worker, Verbosity::ERROR);
        assert_eq!(registry.level(Category::Worker), Verbosity::DEBUG);
    }

    #[test]
    fn test_enable_applies_to_existing_handle() {
        let (registry, counters) = counting_registry(Verbosity::ERROR);
        let h = registry.create(Category::Worker, None).unwrap();

        h.log(Verbosity::DEBUG, "suppressed");
        registry.enable(Category::Worker, Verbosity::DEBUG);
        h.log(Verbosity::DEBUG, "forwarded");

        let records = counters.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "forwarded");
    }

    // === Shutdown / drop ===

    #[test]
    fn test_shutdown_releases_all_remaining() {
        let (registry, counters) = counting_registry(Verbosity::ERROR);
        let _h1 = registry.create(Category::Worker, None).unwrap();
        let _h2 = registry.create(Category::Scheduler, None).unwrap();
        let h3 = registry.create(Category::Sender, None).unwrap();
        registry.release(&h3).unwrap();

        registry.shutdown();

        assert_eq!(registry.tracked_count(), 0);
        // h3 once at release, h1/h2 once at shutdown
        assert_eq!(counters.disposed.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_release_after_shutdown_is_invalid_handle() {
        let (registry, _counters) = counting_registry(Verbosity::ERROR);
        let h = registry.create(Category::Worker, None).unwrap();

        registry.shutdown();

        let err = registry.release(&h).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidHandle { .. }));
    }

    #[test]
    fn test_drop_disposes_tracked_sinks() {
        let counters = Arc::new(SinkCounters::default());
        {
            let registry =
                LoggerRegistry::new(Verbosity::ERROR, CountingFactory::new(counters.clone()));
            let _h1 = registry.create(Category::Worker, None).unwrap();
            let _h2 = registry.create(Category::Daemon, None).unwrap();
        }
        assert_eq!(counters.disposed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_shutdown_then_drop_does_not_double_dispose() {
        let counters = Arc::new(SinkCounters::default());
        {
            let registry =
                LoggerRegistry::new(Verbosity::ERROR, CountingFactory::new(counters.clone()));
            let _h = registry.create(Category::Worker, None).unwrap();
            registry.shutdown();
        }
        assert_eq!(counters.disposed.load(Ordering::SeqCst), 1);
    }
}
