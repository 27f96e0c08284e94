use dashmap::DashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

/// One mutex per key, created on first use and dropped once no caller
/// holds or waits on it. The map only holds keys that are in use.
///
/// The map shard lock is only held while fetching or removing the key's
/// mutex, never while the caller's closure runs.
#[derive(Debug)]
pub struct KeyedLocks<K: Eq + Hash> {
    locks: DashMap<K, Arc<Mutex<()>>>,
}

impl<K: Eq + Hash> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self { locks: DashMap::new() }
    }
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `key`.
    ///
    /// The mutex guards no data, so a guard poisoned by a panicking closure
    /// is taken over rather than reported.
    pub fn with_lock<T, F>(&self, key: K, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let lock =
            self.locks.entry(key.clone()).or_insert_with(|| Arc::new(Mutex::new(()))).clone();
        let out = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };

        // Clones are only taken under the shard lock, so a count of two
        // (map + ours) means nobody else is waiting.
        self.locks
            .remove_if(&key, |_, entry| Arc::ptr_eq(entry, &lock) && Arc::strong_count(entry) == 2);
        out
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
