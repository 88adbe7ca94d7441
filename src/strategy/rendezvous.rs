//! Rendezvous (highest-random-weight) hashing.
//!
//! Every lookup scores each registered bucket against the key and routes to
//! the highest score. O(n) per lookup, but with two properties that make it
//! the reference point for stability measurements: distribution is as even
//! as the hash, and churn disturbs exactly the keys whose winning bucket
//! joined or left.

use xxhash_rust::xxh64::xxh64;

use crate::traits::BucketRouter;

/// Highest-random-weight router over a flat bucket list.
///
/// # Example
///
/// ```
/// use hashbench::strategy::rendezvous::RendezvousRouter;
/// use hashbench::traits::BucketRouter;
///
/// let mut router = RendezvousRouter::new();
/// router.add("a");
/// router.add("b");
/// let owner = router.get("key").unwrap();
/// assert!(owner == "a" || owner == "b");
/// ```
pub struct RendezvousRouter {
    buckets: Vec<String>,
}

impl RendezvousRouter {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }

    /// Score for a (key, bucket) pair; the highest score owns the key.
    ///
    /// The bucket identity seeds the key hash, so each bucket draws an
    /// independent 64-bit score per key.
    #[inline]
    fn score(key: &str, bucket: &str) -> u64 {
        xxh64(key.as_bytes(), xxh64(bucket.as_bytes(), 0))
    }
}

impl Default for RendezvousRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl BucketRouter for RendezvousRouter {
    /// Idempotent: a duplicate identifier would tie with itself on every
    /// score, so it is dropped on entry.
    fn add(&mut self, bucket: &str) {
        if !self.buckets.iter().any(|b| b == bucket) {
            self.buckets.push(bucket.to_owned());
        }
    }

    fn remove(&mut self, bucket: &str) {
        if let Some(idx) = self.buckets.iter().position(|b| b == bucket) {
            self.buckets.swap_remove(idx);
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        self.buckets
            .iter()
            // Tie-break on the identifier itself so list order never matters.
            .max_by_key(|b| (Self::score(key, b), *b))
            .cloned()
    }

    fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_returns_none() {
        let router = RendezvousRouter::new();
        assert_eq!(router.get("key"), None);
    }

    #[test]
    fn single_bucket_owns_everything() {
        let mut router = RendezvousRouter::new();
        router.add("only");
        for i in 0..100 {
            assert_eq!(router.get(&format!("k{i}")).as_deref(), Some("only"));
        }
    }

    #[test]
    fn get_is_deterministic_and_order_independent() {
        let mut forward = RendezvousRouter::new();
        let mut reverse = RendezvousRouter::new();
        let buckets: Vec<String> = (0..12).map(|i| format!("192.168.0.{i}")).collect();
        for b in &buckets {
            forward.add(b);
        }
        for b in buckets.iter().rev() {
            reverse.add(b);
        }
        for i in 0..500 {
            let key = format!("{i:x}");
            assert_eq!(forward.get(&key), reverse.get(&key));
        }
    }

    #[test]
    fn duplicate_add_is_dropped() {
        let mut router = RendezvousRouter::new();
        router.add("a");
        router.add("a");
        assert_eq!(router.bucket_count(), 1);
    }

    #[test]
    fn only_keys_of_the_leaver_move() {
        let mut router = RendezvousRouter::new();
        for i in 0..10 {
            router.add(&format!("192.168.0.{i}"));
        }
        let keys: Vec<String> = (0..2000).map(|i| format!("k{i}")).collect();
        let before: Vec<String> = keys.iter().map(|k| router.get(k).unwrap()).collect();

        router.remove("192.168.0.6");
        for (k, prev) in keys.iter().zip(&before) {
            let now = router.get(k).unwrap();
            if prev != "192.168.0.6" {
                assert_eq!(&now, prev, "key {k} moved although its owner stayed");
            } else {
                assert_ne!(now, "192.168.0.6");
            }
        }
    }
}
