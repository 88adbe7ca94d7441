//! Double-jump hashing: jump consistent hashing with arbitrary removal.
//!
//! Plain jump hash can only shrink from the end, so removing a middle bucket
//! forces some repair that remaps extra keys. The double-jump design keeps
//! two views of the membership and consults them in order:
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │  loose holder:  [ "a" ][ hole ][ "c" ][ "d" ][ hole ]         │
//!   │                 removals punch holes; later adds refill them  │
//!   │                                                               │
//!   │  compact holder: [ "a" ][ "c" ][ "d" ]                        │
//!   │                 dense, maintained by swap-remove              │
//!   └───────────────────────────────────────────────────────────────┘
//!
//!   get(key):
//!     1. jump(h, loose.len) → slot; if occupied, done   (most lookups)
//!     2. otherwise jump(scramble(h), compact.len) → always occupied
//! ```
//!
//! Keys whose loose slot is intact never move on an unrelated removal, which
//! restores the minimal-disruption property for arbitrary membership churn.
//! Only keys that land in a hole fall through to the compact array.
//!
//! The key-hash function is a type parameter so the benchmark can compare
//! hash quality (Fx, XXH3, XXH64) over an identical routing structure,
//! mirroring how the distribution scorer separates algorithm from hash.

use std::hash::Hasher;

use rustc_hash::{FxHashMap, FxHasher};
use xxhash_rust::xxh3::xxh3_64;
use xxhash_rust::xxh64::xxh64;

use crate::strategy::jump::jump_consistent_hash;
use crate::traits::BucketRouter;

/// Multiplier decorrelating the compact-array jump from the loose-array jump.
const COMPACT_SCRAMBLE: u64 = 0xc6a4_a793_5bd1_e995;

/// Stateless 64-bit key hash plugged into [`DoubleJumpRouter`].
pub trait KeyHash: Send + Sync + Default {
    /// Hashes a key to 64 bits.
    fn hash_key(&self, key: &str) -> u64;
}

/// FxHasher-based key hash (fast, weaker avalanche).
#[derive(Default)]
pub struct FxKeyHash;

impl KeyHash for FxKeyHash {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        let mut hasher = FxHasher::default();
        hasher.write(key.as_bytes());
        hasher.finish()
    }
}

/// XXH3-based key hash.
#[derive(Default)]
pub struct Xxh3KeyHash;

impl KeyHash for Xxh3KeyHash {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        xxh3_64(key.as_bytes())
    }
}

/// XXH64-based key hash.
#[derive(Default)]
pub struct Xxh64KeyHash;

impl KeyHash for Xxh64KeyHash {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        xxh64(key.as_bytes(), 0)
    }
}

/// Sparse membership view: removals leave holes, adds refill them.
struct LooseHolder {
    slots: Vec<Option<String>>,
    index: FxHashMap<String, usize>,
    free: Vec<usize>,
}

impl LooseHolder {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: FxHashMap::default(),
            free: Vec::new(),
        }
    }

    fn add(&mut self, bucket: &str) {
        if self.index.contains_key(bucket) {
            return;
        }
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(bucket.to_owned());
                self.index.insert(bucket.to_owned(), slot);
            },
            None => {
                self.index.insert(bucket.to_owned(), self.slots.len());
                self.slots.push(Some(bucket.to_owned()));
            },
        }
    }

    fn remove(&mut self, bucket: &str) {
        if let Some(slot) = self.index.remove(bucket) {
            self.slots[slot] = None;
            self.free.push(slot);
        }
    }

    fn get(&self, hash: u64) -> Option<&str> {
        if self.slots.is_empty() {
            return None;
        }
        let idx = jump_consistent_hash(hash, self.slots.len() as u32);
        self.slots[idx as usize].as_deref()
    }
}

/// Dense membership view maintained by swap-remove; the fallback for lookups
/// that land in a loose hole.
struct CompactHolder {
    slots: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl CompactHolder {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    fn add(&mut self, bucket: &str) {
        if self.index.contains_key(bucket) {
            return;
        }
        self.index.insert(bucket.to_owned(), self.slots.len());
        self.slots.push(bucket.to_owned());
    }

    fn remove(&mut self, bucket: &str) {
        if let Some(idx) = self.index.remove(bucket) {
            self.slots.swap_remove(idx);
            if idx < self.slots.len() {
                self.index.insert(self.slots[idx].clone(), idx);
            }
        }
    }

    fn get(&self, hash: u64) -> Option<&str> {
        if self.slots.is_empty() {
            return None;
        }
        let idx = jump_consistent_hash(
            hash.wrapping_mul(COMPACT_SCRAMBLE),
            self.slots.len() as u32,
        );
        Some(&self.slots[idx as usize])
    }
}

/// Jump-hash router with arbitrary removal, generic over the key hash.
///
/// # Example
///
/// ```
/// use hashbench::strategy::double_jump::{DoubleJumpRouter, Xxh3KeyHash};
/// use hashbench::traits::BucketRouter;
///
/// let mut router: DoubleJumpRouter<Xxh3KeyHash> = DoubleJumpRouter::new();
/// router.add("a");
/// router.add("b");
/// router.add("c");
/// router.remove("b");
///
/// assert_eq!(router.bucket_count(), 2);
/// let owner = router.get("key").unwrap();
/// assert!(owner == "a" || owner == "c");
/// ```
pub struct DoubleJumpRouter<H: KeyHash> {
    loose: LooseHolder,
    compact: CompactHolder,
    hasher: H,
}

impl<H: KeyHash> DoubleJumpRouter<H> {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self {
            loose: LooseHolder::new(),
            compact: CompactHolder::new(),
            hasher: H::default(),
        }
    }
}

impl<H: KeyHash> Default for DoubleJumpRouter<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: KeyHash> BucketRouter for DoubleJumpRouter<H> {
    /// Idempotent in both holders.
    fn add(&mut self, bucket: &str) {
        self.loose.add(bucket);
        self.compact.add(bucket);
    }

    fn remove(&mut self, bucket: &str) {
        self.loose.remove(bucket);
        self.compact.remove(bucket);
    }

    fn get(&self, key: &str) -> Option<String> {
        let hash = self.hasher.hash_key(key);
        self.loose
            .get(hash)
            .or_else(|| self.compact.get(hash))
            .map(str::to_owned)
    }

    fn bucket_count(&self) -> usize {
        self.compact.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated(n: usize) -> (DoubleJumpRouter<Xxh3KeyHash>, Vec<String>) {
        let mut router = DoubleJumpRouter::new();
        let buckets: Vec<String> = (0..n).map(|i| format!("192.168.0.{i}")).collect();
        for b in &buckets {
            router.add(b);
        }
        (router, buckets)
    }

    #[test]
    fn empty_returns_none() {
        let router: DoubleJumpRouter<Xxh3KeyHash> = DoubleJumpRouter::new();
        assert_eq!(router.get("k"), None);
    }

    #[test]
    fn get_is_deterministic_after_churn() {
        let (mut router, _) = populated(20);
        router.remove("192.168.0.3");
        router.remove("192.168.0.17");
        router.add("10.0.0.1");

        let first = router.get("probe");
        for _ in 0..1000 {
            assert_eq!(router.get("probe"), first);
        }
    }

    #[test]
    fn membership_is_sound_with_holes_present() {
        let (mut router, mut live) = populated(20);
        for victim in ["192.168.0.0", "192.168.0.9", "192.168.0.13"] {
            router.remove(victim);
            live.retain(|b| b != victim);
        }
        // Holes exist now; every lookup must still land on a live bucket.
        for i in 0..2000 {
            let got = router.get(&format!("k{i}")).unwrap();
            assert!(live.contains(&got), "hole leaked: {got}");
        }
        assert_eq!(router.bucket_count(), 17);
    }

    #[test]
    fn holes_are_refilled_by_later_adds() {
        let (mut router, _) = populated(5);
        router.remove("192.168.0.2");
        router.add("10.0.0.1");
        assert_eq!(router.bucket_count(), 5);
        assert_eq!(router.loose.free.len(), 0);
        assert_eq!(router.loose.slots.len(), 5);
    }

    #[test]
    fn unrelated_removal_keeps_intact_slots_stable() {
        let (mut router, _) = populated(50);
        let keys: Vec<String> = (0..10_000).map(|i| format!("{i:x}")).collect();
        let before: Vec<String> = keys.iter().map(|k| router.get(k).unwrap()).collect();

        router.remove("192.168.0.31");
        let moved = keys
            .iter()
            .zip(&before)
            .filter(|(k, prev)| router.get(k).as_ref() != Some(prev))
            .count();

        // Only the leaver's ~2% of keys fall through to the compact array.
        let fraction = moved as f64 / keys.len() as f64;
        assert!(fraction < 0.04, "remapped fraction {fraction}");
    }

    #[test]
    fn duplicate_add_is_idempotent() {
        let (mut router, _) = populated(5);
        router.add("192.168.0.1");
        assert_eq!(router.bucket_count(), 5);
    }

    #[test]
    fn hash_variants_agree_on_membership() {
        let mut fx: DoubleJumpRouter<FxKeyHash> = DoubleJumpRouter::new();
        let mut x64: DoubleJumpRouter<Xxh64KeyHash> = DoubleJumpRouter::new();
        for i in 0..8 {
            let b = format!("192.168.0.{i}");
            fx.add(&b);
            x64.add(&b);
        }
        assert_eq!(fx.bucket_count(), x64.bucket_count());
        // Different hashes route differently, but both stay in-set.
        for i in 0..200 {
            let key = format!("k{i}");
            assert!(fx.get(&key).unwrap().starts_with("192.168.0."));
            assert!(x64.get(&key).unwrap().starts_with("192.168.0."));
        }
    }
}
