//! Lock-sharded memoization of `f64` values under packed integer keys.
//!
//! Lookups take a shared lock on one shard.  On a miss the value is
//! computed with no lock held and then inserted; if another thread got
//! there first its value is kept, so racing threads may compute the same
//! entry twice but always observe a single stored result.
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use fnv::FnvHashMap;

type Shard = RwLock<FnvHashMap<u64, f64>>;

pub struct CoefficientCache {
    shards: Vec<Shard>,
}

impl fmt::Debug for CoefficientCache {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CoefficientCache")
            .field("shards", &self.shards.len())
            .field("len", &self.len())
            .finish()
    }
}

/// 16 shards.
impl Default for CoefficientCache {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Copies every entry; the clone shares nothing with the original.
impl Clone for CoefficientCache {
    fn clone(&self) -> Self {
        Self {
            shards: (0 .. self.shards.len())
                .map(|i| RwLock::new(self.read_shard(i).clone()))
                .collect(),
        }
    }
}

impl CoefficientCache {
    /// The number of shards is rounded up to a power of two.
    pub fn new(num_shards: usize) -> Self {
        let n = num_shards.max(1).next_power_of_two();
        Self {
            shards: (0 .. n).map(|_| Default::default()).collect(),
        }
    }

    pub fn num_shards(&self) -> usize {
        self.shards.len()
    }

    fn shard_of(&self, key: u64) -> usize {
        // packed keys differ mostly in their low bits, so mix them first
        let h = key.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        (h >> 32) as usize & (self.shards.len() - 1)
    }

    // the maps hold plain numbers, so a poisoned lock is still consistent
    fn read_shard(&self, i: usize) -> RwLockReadGuard<FnvHashMap<u64, f64>> {
        self.shards[i].read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_shard(&self, i: usize)
                   -> RwLockWriteGuard<FnvHashMap<u64, f64>>
    {
        self.shards[i].write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: u64) -> Option<f64> {
        self.read_shard(self.shard_of(key)).get(&key).cloned()
    }

    pub fn contains(&self, key: u64) -> bool {
        self.read_shard(self.shard_of(key)).contains_key(&key)
    }

    /// Store `value` unless the key is already present.  Returns the value
    /// that ends up stored.
    pub fn insert(&self, key: u64, value: f64) -> f64 {
        *self.write_shard(self.shard_of(key)).entry(key).or_insert(value)
    }

    /// Retrieve the value with the given key or, if it's not yet cached,
    /// compute and store it.
    pub fn get_or_insert_with<F: FnOnce() -> f64>(&self, key: u64, f: F)
                                                  -> f64
    {
        if let Some(value) = self.get(key) {
            return value;
        }
        // no lock is held while f runs
        let value = f();
        self.insert(key, value)
    }

    pub fn len(&self) -> usize {
        (0 .. self.shards.len()).map(|i| self.read_shard(i).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        (0 .. self.shards.len()).all(|i| self.read_shard(i).is_empty())
    }

    pub fn clear(&self) {
        for i in 0 .. self.shards.len() {
            self.write_shard(i).clear();
        }
    }
}
