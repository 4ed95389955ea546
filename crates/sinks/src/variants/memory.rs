//! MemorySink - keeps the latest dataset and notifies listeners
//!
//! Meant for programmatic use: a consumer clones the sink handle before handing
//! it to a tee decorator, then reads `data()` or registers listeners on its copy.
//!
//! Listeners are held weakly and called synchronously on the dumping thread.
//! A listener must not register or unregister listeners from inside its own
//! callback.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use contracts::{BoxError, Dataset, DumpError, Sink};
use tracing::{debug, warn};

/// Notification payload sent after each dump
#[derive(Debug, Clone)]
pub struct DataChanged {
    /// The dataset now cached
    pub data: Dataset,
    /// Number of dumps so far, starting at 1
    pub generation: u64,
}

/// Receives change notifications from a `MemorySink`
///
/// Errors (and panics) are contained at the notification boundary and never
/// reach the producer.
pub trait DataListener: Send + Sync {
    fn data_changed(&self, event: &DataChanged) -> Result<(), BoxError>;
}

impl<F> DataListener for F
where
    F: Fn(&DataChanged) -> Result<(), BoxError> + Send + Sync,
{
    fn data_changed(&self, event: &DataChanged) -> Result<(), BoxError> {
        self(event)
    }
}

#[derive(Default)]
struct MemoryState {
    data: Mutex<Option<Dataset>>,
    listeners: Mutex<Vec<Weak<dyn DataListener>>>,
    generation: AtomicU64,
}

/// Single-slot in-memory sink
///
/// Clones share the same slot and listener set.
#[derive(Clone, Default)]
pub struct MemorySink {
    state: Arc<MemoryState>,
}

impl MemorySink {
    pub const TYPE_NAME: &'static str = "Memory";

    pub fn new() -> Self {
        Self::default()
    }

    /// Latest dataset, `None` before the first dump
    pub fn data(&self) -> Option<Dataset> {
        lock(&self.state.data).clone()
    }

    /// Number of dumps seen so far
    pub fn generation(&self) -> u64 {
        self.state.generation.load(Ordering::Acquire)
    }

    /// Register a listener; registering the same listener twice is a no-op
    pub fn add_listener(&self, listener: &Arc<dyn DataListener>) {
        let mut listeners = lock(&self.state.listeners);
        listeners.retain(|l| l.strong_count() > 0);
        if !listeners.iter().any(|l| same_listener(l, listener)) {
            listeners.push(Arc::downgrade(listener));
        }
    }

    /// Unregister a listener; unknown listeners are ignored
    pub fn remove_listener(&self, listener: &Arc<dyn DataListener>) {
        lock(&self.state.listeners)
            .retain(|l| l.strong_count() > 0 && !same_listener(l, listener));
    }

    /// Number of live registered listeners
    pub fn listener_count(&self) -> usize {
        lock(&self.state.listeners)
            .iter()
            .filter(|l| l.strong_count() > 0)
            .count()
    }

    fn notify_listeners(&self, event: &DataChanged) {
        // Snapshot so callbacks run without the lock held
        let listeners: Vec<Arc<dyn DataListener>> = lock(&self.state.listeners)
            .iter()
            .filter_map(Weak::upgrade)
            .collect();

        for listener in listeners {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener.data_changed(event)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    observability::record_listener_failure(Self::TYPE_NAME);
                    warn!(generation = event.generation, error = %e, "Listener failed");
                }
                Err(_) => {
                    observability::record_listener_failure(Self::TYPE_NAME);
                    warn!(generation = event.generation, "Listener panicked");
                }
            }
        }
    }
}

impl fmt::Debug for MemorySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySink")
            .field("data", &self.data())
            .field("generation", &self.generation())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl Sink for MemorySink {
    fn type_name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn global_info(&self) -> &str {
        "Keeps the data in memory and notifies any registered listeners when data changes.\n\
         Not meant for interactive configuration, only for programmatic use."
    }

    fn dump(&mut self, data: &Dataset) -> Result<(), DumpError> {
        *lock(&self.state.data) = Some(data.clone());
        let generation = self.state.generation.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(generation, records = data.len(), "Dataset cached");

        self.notify_listeners(&DataChanged {
            data: data.clone(),
            generation,
        });
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn same_listener(registered: &Weak<dyn DataListener>, candidate: &Arc<dyn DataListener>) -> bool {
    registered.as_ptr().cast::<()>() == Arc::as_ptr(candidate).cast::<()>()
}
