//! Modulo baseline: hash the key, index into a flat bucket list.
//!
//! This is deliberately *not* a consistent-hashing strategy. Any membership
//! change renumbers the list, so most keys remap on churn. It exists as the
//! lower baseline the stability measurements are compared against, and as the
//! cheapest possible lookup for throughput comparisons.
//!
//! ## Algorithm Properties
//!
//! | Operation      | Time | Notes                                   |
//! |----------------|------|-----------------------------------------|
//! | `get`          | O(1) | one hash + one index                    |
//! | `add`          | O(1) | append, duplicates kept                 |
//! | `remove`       | O(n) | linear scan, first occurrence only      |
//! | `bucket_count` | O(1) |                                         |
//!
//! The shared streaming hasher is reset and reused per lookup, so the read
//! path carries its own lock. This mirrors adapters whose underlying
//! structure is not inherently concurrency-safe: the locking discipline lives
//! inside the adapter, never in the harness.

use parking_lot::Mutex;
use xxhash_rust::xxh64::Xxh64;

use crate::traits::BucketRouter;

/// Baseline router: `xxh64(key) % buckets.len()`.
///
/// # Example
///
/// ```
/// use hashbench::strategy::modulo::ModuloRouter;
/// use hashbench::traits::BucketRouter;
///
/// let mut router = ModuloRouter::new();
/// assert_eq!(router.get("k"), None);
///
/// router.add("a");
/// assert_eq!(router.get("k").as_deref(), Some("a"));
/// ```
pub struct ModuloRouter {
    buckets: Vec<String>,
    /// Shared streaming hasher, reset per lookup.
    hasher: Mutex<Xxh64>,
}

impl ModuloRouter {
    /// Creates an empty baseline router.
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            hasher: Mutex::new(Xxh64::new(0)),
        }
    }
}

impl Default for ModuloRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl BucketRouter for ModuloRouter {
    /// Appends unconditionally: duplicate identifiers are kept, which skews
    /// distribution toward the duplicated bucket. Documented, not corrected.
    fn add(&mut self, bucket: &str) {
        self.buckets.push(bucket.to_owned());
    }

    /// Removes the first occurrence, preserving list order so that surviving
    /// indices shift minimally. Unknown identifiers are a no-op.
    fn remove(&mut self, bucket: &str) {
        if let Some(idx) = self.buckets.iter().position(|b| b == bucket) {
            self.buckets.remove(idx);
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        if self.buckets.is_empty() {
            return None;
        }
        let mut hasher = self.hasher.lock();
        hasher.reset(0);
        hasher.update(key.as_bytes());
        let idx = (hasher.digest() % self.buckets.len() as u64) as usize;
        Some(self.buckets[idx].clone())
    }

    fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
