//! Jump consistent hashing.
//!
//! [`jump_consistent_hash`] is the Lamping & Veach function mapping a 64-bit
//! key hash to a bucket index in `[0, n)` with the minimal-disruption
//! property when `n` grows: going from `n` to `n + 1` reassigns only
//! `~1/(n+1)` of keys. It is memoryless — there is no ring to store — which
//! is why two strategies here build on it: [`JumpRouter`] in this module and
//! the hole-tolerant variant in
//! [`double_jump`](crate::strategy::double_jump).
//!
//! Jump hash only knows how to drop the *last* index, so [`JumpRouter`]
//! keeps buckets in append order and fills a removal hole with the final
//! element (swap-remove). Adds are therefore minimally disruptive; removal of
//! a middle bucket additionally remaps the keys of the element that was moved
//! into the hole. That extra disruption is exactly what the double-jump
//! design eliminates, and the benchmark shows the two side by side.

use rustc_hash::FxHashMap;
use xxhash_rust::xxh3::xxh3_64;

use crate::traits::BucketRouter;

/// Maps `key` to a bucket index in `[0, num_buckets)`.
///
/// Deterministic; when `num_buckets` grows from N to N+1, only ~1/(N+1) of
/// keys are reassigned.
///
/// Reference: Lamping & Veach, "A Fast, Minimal Memory, Consistent Hash
/// Algorithm" (<https://arxiv.org/abs/1406.2294>).
///
/// # Panics
///
/// Panics if `num_buckets` is 0; callers guard the empty registry before
/// computing an index.
///
/// # Example
///
/// ```
/// use hashbench::strategy::jump::jump_consistent_hash;
///
/// let idx = jump_consistent_hash(0xdead_beef, 10);
/// assert!(idx < 10);
/// assert_eq!(idx, jump_consistent_hash(0xdead_beef, 10));
/// ```
pub fn jump_consistent_hash(key: u64, num_buckets: u32) -> u32 {
    assert!(num_buckets > 0, "num_buckets must be positive");

    let mut k = key;
    let mut b: i64 = -1;
    let mut j: i64 = 0;

    while j < i64::from(num_buckets) {
        b = j;
        k = k.wrapping_mul(2_862_933_555_777_941_757).wrapping_add(1);
        j = (((b.wrapping_add(1)) as f64) * f64::from(1u32 << 31)
            / (((k >> 33).wrapping_add(1)) as f64)) as i64;
    }

    b as u32
}

/// Jump-hash router over an append-ordered bucket list with swap-remove.
///
/// # Example
///
/// ```
/// use hashbench::strategy::jump::JumpRouter;
/// use hashbench::traits::BucketRouter;
///
/// let mut router = JumpRouter::new();
/// router.add("a");
/// router.add("b");
/// assert!(router.get("key").is_some());
/// ```
pub struct JumpRouter {
    buckets: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl JumpRouter {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl Default for JumpRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl BucketRouter for JumpRouter {
    /// Idempotent: jump hash addresses buckets by position, so a duplicate
    /// entry would shadow nothing and only skew distribution.
    fn add(&mut self, bucket: &str) {
        if self.index.contains_key(bucket) {
            return;
        }
        self.index.insert(bucket.to_owned(), self.buckets.len());
        self.buckets.push(bucket.to_owned());
    }

    fn remove(&mut self, bucket: &str) {
        let Some(idx) = self.index.remove(bucket) else {
            return;
        };
        self.buckets.swap_remove(idx);
        if idx < self.buckets.len() {
            self.index.insert(self.buckets[idx].clone(), idx);
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        if self.buckets.is_empty() {
            return None;
        }
        let idx = jump_consistent_hash(xxh3_64(key.as_bytes()), self.buckets.len() as u32);
        Some(self.buckets[idx as usize].clone())
    }

    fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
