//! Trailing-edge debounce.
//!
//! Each call restarts the quiescence window; only the argument of the last
//! call in a burst reaches the wrapped action. Must be called from inside a
//! tokio runtime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::task::AbortHandle;
use tokio::time::sleep;
use tracing::trace;

type Action<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

pub struct Debouncer<T> {
    delay: Duration,
    action: Action<T>,
    pending: Arc<Mutex<Option<AbortHandle>>>,
    generation: Arc<AtomicU64>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, action: F) -> Self
    where
        F: Fn(T) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        Self {
            delay,
            action: Arc::new(action),
            pending: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `arg`, replacing whatever call is still waiting.
    pub fn call(&self, arg: T) {
        // Holding the slot while spawning keeps the task from detaching
        // itself before its own handle is stored.
        let mut slot = lock(&self.pending);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let pending = Arc::clone(&self.pending);
        let current = Arc::clone(&self.generation);
        let action = Arc::clone(&self.action);
        let delay = self.delay;

        let task = tokio::spawn(async move {
            sleep(delay).await;
            {
                let mut slot = lock(&pending);
                if current.load(Ordering::SeqCst) != generation {
                    return;
                }
                // Detach: from here on cancel() must not interrupt the write.
                *slot = None;
            }
            action(arg).await;
        });

        if let Some(previous) = slot.replace(task.abort_handle()) {
            previous.abort();
            trace!(generation, "debounce restarted");
        }
    }

    /// Abort the waiting call, if any. A call already past its window runs
    /// to completion.
    pub fn cancel(&self) {
        let mut slot = lock(&self.pending);
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = slot.take() {
            handle.abort();
            trace!("debounce cancelled");
        }
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.pending).is_some()
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
