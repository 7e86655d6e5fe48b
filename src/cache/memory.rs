// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory cache with TTL expiry and optional LRU capacity

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::debug;

use super::{AccessSequence, CacheStats, Clock, SystemClock, TimestampMillis};

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    fetched_at: TimestampMillis,
    last_accessed: TimestampMillis,
    access_seq: AccessSequence,
}

impl<V> Entry<V> {
    /// An entry is fresh while `now - fetched_at < ttl`.
    fn is_expired(&self, now: TimestampMillis, ttl: Duration) -> bool {
        now.duration_since(self.fetched_at) >= ttl
    }
}

#[derive(Debug)]
struct State<K, V> {
    entries: HashMap<K, Entry<V>>,
    stats: CacheStats,
    next_seq: AccessSequence,
}

impl<K, V> Default for State<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::default(),
            next_seq: AccessSequence::default(),
        }
    }
}

/// Thread-safe key/value cache with a fixed TTL.
///
/// Entries are replaced wholesale on insert (last writer wins) and are never
/// mutated in place. When `max_entries` is set, inserting into a full cache
/// first evicts the least recently used entry.
///
/// # Examples
///
/// ```
/// use swapscan::cache::{ManualClock, TtlCache};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # tokio_test_block_on(async {
/// let clock = ManualClock::new();
/// let cache = TtlCache::new("example", Duration::from_secs(60))
///     .with_max_entries(100)
///     .with_clock(Arc::new(clock.clone()));
///
/// cache.insert(1u64, "one").await;
/// assert_eq!(cache.get(&1).await, Some("one"));
///
/// clock.advance(Duration::from_secs(60));
/// assert_eq!(cache.get(&1).await, None);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug)]
pub struct TtlCache<K, V> {
    name: &'static str,
    ttl: Duration,
    max_entries: Option<usize>,
    clock: Arc<dyn Clock>,
    state: Mutex<State<K, V>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Debug + Send,
    V: Clone + Send,
{
    /// Creates an unbounded cache using wall-clock time
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            max_entries: None,
            clock: Arc::new(SystemClock),
            state: Mutex::new(State::default()),
        }
    }

    /// Bound the cache to `max_entries`, evicting LRU entries beyond it.
    ///
    /// A limit of zero is treated as one.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries.max(1));
        self
    }

    /// Read time from `clock` instead of the system clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The configured time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a fresh entry. Expired entries are removed and count as misses.
    pub async fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        let expired = match state.entries.get_mut(key) {
            Some(entry) if !entry.is_expired(now, self.ttl) => {
                entry.last_accessed = now;
                entry.access_seq = state.next_seq;
                state.next_seq = state.next_seq.next();
                state.stats.hits += 1;
                debug!(cache = self.name, ?key, "Cache hit");
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            state.entries.remove(key);
            state.stats.expirations += 1;
            state.stats.entries = state.entries.len();
            debug!(cache = self.name, ?key, "Cache entry expired");
        } else {
            debug!(cache = self.name, ?key, "Cache miss");
        }
        state.stats.misses += 1;
        None
    }

    /// Insert or replace an entry, stamped with the current time.
    pub async fn insert(&self, key: K, value: V) {
        let now = self.clock.now();
        let mut state = self.state.lock().await;

        if let Some(max_entries) = self.max_entries {
            if !state.entries.contains_key(&key) {
                while state.entries.len() >= max_entries {
                    if !Self::evict_lru(self.name, &mut state) {
                        break;
                    }
                }
            }
        }

        let seq = state.next_seq;
        state.next_seq = seq.next();
        state.entries.insert(
            key,
            Entry {
                value,
                fetched_at: now,
                last_accessed: now,
                access_seq: seq,
            },
        );
        state.stats.entries = state.entries.len();
    }

    /// Remove every entry. Statistics other than `entries` are kept.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        debug!(cache = self.name, entries = state.entries.len(), "Clearing cache");
        state.entries.clear();
        state.stats.entries = 0;
    }

    /// Number of stored entries, fresh or not yet swept
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Snapshot of the statistics
    pub async fn stats(&self) -> CacheStats {
        self.state.lock().await.stats
    }

    fn evict_lru(name: &'static str, state: &mut State<K, V>) -> bool {
        let lru_key = state
            .entries
            .iter()
            .min_by_key(|(_, entry)| (entry.last_accessed, entry.access_seq))
            .map(|(key, _)| key.clone());

        match lru_key {
            Some(key) => {
                debug!(cache = name, ?key, "Evicting LRU cache entry");
                state.entries.remove(&key);
                state.stats.evictions += 1;
                true
            }
            None => false,
        }
    }
}
