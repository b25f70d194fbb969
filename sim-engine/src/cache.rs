//! Bounded TTL cache for static definitions
//!
//! Discount, combo, and coupon definitions change rarely; re-reading them
//! on every order wastes API calls. Entries expire after a TTL and the
//! cache evicts least-recently-accessed entries past a size bound, so it
//! can never grow without limit.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use shared::gateway::GatewayResult;

/// Default entry lifetime
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
/// Default entry bound
pub const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    inserted: Instant,
    last_access: Instant,
}

/// TTL + LRU cache keyed by string
#[derive(Debug)]
pub struct DefinitionCache<T> {
    entries: Mutex<HashMap<String, Entry<T>>>,
    ttl: Duration,
    capacity: usize,
}

impl<T: Clone> Default for DefinitionCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CAPACITY)
    }
}

impl<T: Clone> DefinitionCache<T> {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry<T>>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Fresh value for `key`, touching its access time
    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.lock();
        let now = Instant::now();
        match entries.get_mut(key) {
            Some(entry) if now.duration_since(entry.inserted) < self.ttl => {
                entry.last_access = now;
                Some(entry.value.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert a value, evicting the least-recently-accessed entry when
    /// the bound is reached
    pub fn insert(&self, key: impl Into<String>, value: T) {
        let mut entries = self.lock();
        let key = key.into();
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            if let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, e)| e.last_access)
                .map(|(k, _)| k.clone())
            {
                entries.remove(&oldest);
            }
        }
        let now = Instant::now();
        entries.insert(
            key,
            Entry {
                value,
                inserted: now,
                last_access: now,
            },
        );
    }

    /// Read-through: return the cached value or run the loader and cache
    /// its result
    pub async fn get_or_load<F, Fut>(&self, key: &str, loader: F) -> GatewayResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = GatewayResult<T>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        let value = loader().await?;
        self.insert(key, value.clone());
        Ok(value)
    }

    pub fn invalidate(&self, key: &str) {
        self.lock().remove(key);
    }

    /// Drop every entry past its TTL
    pub fn invalidate_expired(&self) {
        let now = Instant::now();
        self.lock()
            .retain(|_, entry| now.duration_since(entry.inserted) < self.ttl);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
