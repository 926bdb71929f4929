//! Short-lived read-through cache for derived decision tables.
//!
//! Entries expire passively after the configured TTL. Concurrent misses on the
//! same key may each run the factory; only `clear` is ordered against reads.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

struct CacheState<V> {
    // Bumped by every clear; results computed under an older generation are discarded.
    generation: u64,
    entries: HashMap<String, CacheEntry<V>>,
}

pub struct ScoreCache<V> {
    ttl: Duration,
    state: RwLock<CacheState<V>>,
}

impl<V: Clone> ScoreCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(CacheState {
                generation: 0,
                entries: HashMap::new(),
            }),
        }
    }

    /// Returns the live entry for `key`, or runs `factory` and stores its result.
    pub fn get_or_compute<F>(&self, key: &str, factory: F) -> V
    where
        F: FnOnce() -> V,
    {
        let generation = {
            let state = self.state.read();
            if let Some(entry) = state.entries.get(key) {
                if entry.expires_at > Instant::now() {
                    return entry.value.clone();
                }
            }
            state.generation
        };

        let value = factory();

        let mut state = self.state.write();
        if state.generation == generation {
            state.entries.insert(
                key.to_string(),
                CacheEntry {
                    value: value.clone(),
                    expires_at: Instant::now() + self.ttl,
                },
            );
        }

        value
    }

    /// Drops every entry. Any read that starts after this returns recomputes.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.generation = state.generation.wrapping_add(1);
        state.entries.clear();
    }

    /// Number of unexpired entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.state
            .read()
            .entries
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for ScoreCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
