//! Debounced persistence of one step record under one storage key.
//!
//! Storage failures never reach the form: reads degrade to "nothing saved"
//! and writes are logged and dropped.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, trace, warn};

use sw_core::ports::KeyValueStorePort;

use crate::debounce::Debouncer;

/// Quiescence window applied when no other value is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

type Memo = Arc<Mutex<Option<String>>>;

pub struct PersistenceAdapter<T> {
    store: Arc<dyn KeyValueStorePort>,
    key: String,
    /// Serialized form of the last value handed to storage (or loaded from it).
    last_saved: Memo,
    /// Bumped by `clear`; a write scheduled under an older epoch is dropped.
    epoch: Arc<AtomicU64>,
    /// Held for the whole of a store write and of a clear.
    gate: Arc<tokio::sync::Mutex<()>>,
    writer: Debouncer<(u64, String)>,
    _record: PhantomData<fn() -> T>,
}

impl<T> PersistenceAdapter<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStorePort>, key: impl Into<String>, debounce: Duration) -> Self {
        let key = key.into();
        let last_saved: Memo = Arc::new(Mutex::new(None));
        let epoch = Arc::new(AtomicU64::new(0));
        let gate = Arc::new(tokio::sync::Mutex::new(()));

        let writer = {
            let store = Arc::clone(&store);
            let key = key.clone();
            let last_saved = Arc::clone(&last_saved);
            let epoch = Arc::clone(&epoch);
            let gate = Arc::clone(&gate);
            Debouncer::new(debounce, move |(scheduled, json): (u64, String)| {
                let store = Arc::clone(&store);
                let key = key.clone();
                let last_saved = Arc::clone(&last_saved);
                let epoch = Arc::clone(&epoch);
                let gate = Arc::clone(&gate);
                async move {
                    let _gate = gate.lock().await;
                    if epoch.load(Ordering::SeqCst) != scheduled {
                        trace!(key = %key, "form record cleared before write, dropping it");
                        return;
                    }
                    match store.set_item(&key, &json).await {
                        Ok(()) => debug!(key = %key, bytes = json.len(), "form record saved"),
                        Err(err) => {
                            warn!(key = %key, error = %err, "failed to save form record");
                            let mut memo = lock(&last_saved);
                            if memo.as_deref() == Some(json.as_str()) {
                                *memo = None;
                            }
                        }
                    }
                }
                .boxed()
            })
        };

        Self {
            store,
            key,
            last_saved,
            epoch,
            gate,
            writer,
            _record: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read and parse the stored record. Absent, unreadable and corrupt
    /// entries all yield `None`.
    pub async fn load(&self) -> Option<T> {
        let raw = match self.store.get_item(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read form record");
                return None;
            }
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                *self.memo() = serde_json::to_string(&value).ok();
                debug!(key = %self.key, "form record loaded");
                Some(value)
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "ignoring unparsable form record");
                None
            }
        }
    }

    /// Schedule a write of `value` unless it equals what was last saved.
    pub fn save(&self, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to serialize form record");
                return;
            }
        };

        {
            let mut memo = self.memo();
            if memo.as_deref() == Some(json.as_str()) {
                trace!(key = %self.key, "form record unchanged, skipping save");
                return;
            }
            *memo = Some(json.clone());
        }
        self.writer.call((self.epoch.load(Ordering::SeqCst), json));
    }

    /// Drop any pending write and remove the stored record. A write already
    /// talking to the store finishes first and is then removed with the rest.
    pub async fn clear(&self) {
        self.writer.cancel();
        let _gate = self.gate.lock().await;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        *self.memo() = None;
        match self.store.remove_item(&self.key).await {
            Ok(()) => debug!(key = %self.key, "form record cleared"),
            Err(err) => warn!(key = %self.key, error = %err, "failed to clear form record"),
        }
    }

    pub async fn exists(&self) -> bool {
        match self.store.contains_key(&self.key).await {
            Ok(found) => found,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to probe form record");
                false
            }
        }
    }

    pub fn has_pending_write(&self) -> bool {
        self.writer.is_pending()
    }

    fn memo(&self) -> MutexGuard<'_, Option<String>> {
        lock(&self.last_saved)
    }
}

fn lock(memo: &Mutex<Option<String>>) -> MutexGuard<'_, Option<String>> {
    memo.lock().unwrap_or_else(PoisonError::into_inner)
}
