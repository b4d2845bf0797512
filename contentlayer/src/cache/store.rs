//! Cache-aside store with in-flight load coalescing.
//!
//! Each key maps to a [`Slot`]: either a load in progress or a resolved
//! value. A missing key means nothing has been loaded yet.
//!
//! # Coalescing
//!
//! The first caller for a missing key inserts a `Loading` slot holding a
//! [`Shared`] future that wraps the caller's loader. Later callers for the
//! same key clone that shared future instead of invoking their own loader,
//! so at most one load runs per key at a time.
//!
//! The shard lock is held only while checking or creating a slot and while
//! settling it. The loader itself is invoked lazily on the first poll of the
//! shared future, after the lock has been released.
//!
//! # Settlement
//!
//! Every caller that sees the load complete tries to settle the slot, but only
//! if the slot still belongs to the same load generation. Settling is
//! idempotent, so a leader dropped mid-load does not strand the entry: the
//! remaining waiters (or the next caller) drive the shared future and settle it.
//!
//! - success: the slot becomes `Resolved` and is served to later callers
//! - failure: the slot is removed so the next call starts a fresh load
//! - panic: the slot is removed and the panic is resumed in every attached
//!   caller, so the key is not left poisoned
//!
//! Hits on a resolved slot take only the shard's read lock.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{FutureExt, Shared};
use tracing::{debug, warn};

use crate::cache::traits::{BoxFuture, CacheStats};

/// Load result, or the message of a panic raised by the loader.
type LoadOutcome<V, E> = Result<Result<V, E>, Arc<str>>;

type SharedLoad<V, E> = Shared<BoxFuture<'static, LoadOutcome<V, E>>>;

enum Slot<V, E> {
    /// A load is in flight; callers attach to the shared future.
    Loading {
        generation: u64,
        load: SharedLoad<V, E>,
    },
    /// The value has been loaded.
    Resolved(V),
}

impl<V, E> Slot<V, E> {
    fn is_load(&self, generation: u64) -> bool {
        matches!(self, Slot::Loading { generation: g, .. } if *g == generation)
    }
}

/// Unbounded cache-aside store.
///
/// Keys are opaque to the store; any `Hash + Eq` type works. Values and errors
/// must be `Clone` because one load result is handed to every coalesced caller.
/// Failures are never cached.
pub struct CacheAsideStore<K, V, E> {
    entries: DashMap<K, Slot<V, E>>,
    next_generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    coalesced: AtomicU64,
    failures: AtomicU64,
}

impl<K, V, E> CacheAsideStore<K, V, E>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone + Send + Sync + 'static,
    E: Clone + fmt::Display + Send + Sync + 'static,
{
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_generation: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            coalesced: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Return the value for `key`, loading it with `loader` on a miss.
    ///
    /// - Resolved entry: returns a clone without calling `loader`.
    /// - Load in flight: waits for that load and returns its result.
    /// - No entry: starts a load with `loader` and returns its result.
    ///
    /// `loader` is dropped without being called unless this call starts the load.
    ///
    /// # Errors
    ///
    /// Returns the loader's error unchanged. Every caller attached to a failed
    /// load receives the same error, and the key is left without an entry.
    ///
    /// # Panics
    ///
    /// If the loader panics, every attached caller panics with the same
    /// message. The entry is removed first, so the next call loads again.
    pub async fn get_or_load<F, Fut>(&self, key: K, loader: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        if let Some(value) = self.peek(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = ?key, "Cache hit");
            return Ok(value);
        }

        let (generation, load) = match self.entries.entry(key.clone()) {
            Entry::Occupied(occupied) => match occupied.get() {
                Slot::Resolved(value) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    debug!(key = ?key, "Cache hit");
                    return Ok(value.clone());
                }
                Slot::Loading { generation, load } => {
                    self.coalesced.fetch_add(1, Ordering::Relaxed);
                    debug!(key = ?key, generation, "Attaching to in-flight load");
                    (*generation, load.clone())
                }
            },
            Entry::Vacant(vacant) => {
                let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
                let load: BoxFuture<'static, LoadOutcome<V, E>> =
                    AssertUnwindSafe(async move { loader().await })
                        .catch_unwind()
                        .map(|outcome| outcome.map_err(|payload| panic_message(&*payload)))
                        .boxed();
                let load = load.shared();
                vacant.insert(Slot::Loading {
                    generation,
                    load: load.clone(),
                });
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key = ?key, generation, "Cache miss, starting load");
                (generation, load)
            }
        };

        match load.await {
            Ok(result) => {
                self.settle(&key, generation, &result);
                result
            }
            Err(message) => {
                self.discard(&key, generation, &message);
                panic::resume_unwind(Box::new(format!(
                    "loader for {:?} panicked: {}",
                    key, message
                )))
            }
        }
    }

    /// Return the resolved value for `key` without loading.
    ///
    /// Returns `None` when the key is absent or its load is still in flight.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.entries.get(key).and_then(|slot| match slot.value() {
            Slot::Resolved(value) => Some(value.clone()),
            Slot::Loading { .. } => None,
        })
    }

    /// Number of entries, counting loads still in flight.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the store's counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            entries: self.entries.len() as u64,
        }
    }

    fn settle(&self, key: &K, generation: u64, result: &Result<V, E>) {
        match result {
            Ok(value) => {
                if let Some(mut slot) = self.entries.get_mut(key) {
                    if slot.is_load(generation) {
                        *slot = Slot::Resolved(value.clone());
                        debug!(key = ?key, generation, "Load resolved");
                    }
                }
            }
            Err(e) => self.discard(key, generation, e),
        }
    }

    fn discard(&self, key: &K, generation: u64, reason: &dyn fmt::Display) {
        let removed = self
            .entries
            .remove_if(key, |_, slot| slot.is_load(generation));
        if removed.is_some() {
            self.failures.fetch_add(1, Ordering::Relaxed);
            warn!(key = ?key, generation, error = %reason, "Load failed, entry discarded");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> Arc<str> {
    if let Some(message) = payload.downcast_ref::<&str>() {
        Arc::from(*message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        Arc::from(message.as_str())
    } else {
        Arc::from("non-string panic payload")
    }
}

impl<K, V, E> Default for CacheAsideStore<K, V, E>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone + Send + Sync + 'static,
    E: Clone + fmt::Display + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
