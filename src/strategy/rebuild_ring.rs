//! Rebuild-on-remove ring: models strategies without true removal.
//!
//! Some hashing libraries never supported deleting a member; callers keep the
//! authoritative bucket list themselves and rebuild the structure from
//! scratch whenever a member leaves. This adapter reproduces that pattern on
//! top of [`RingRouter`]: `remove` drops the identifier from a retained list
//! and rebuilds the whole ring from the survivors.
//!
//! The contract only demands the externally observable post-condition — the
//! removed bucket is no longer returned by `get` — not a particular internal
//! mechanism, so rebuild-on-remove is a legitimate strategy. What the harness
//! exposes is its cost: `remove` is O(n × replicas) instead of O(replicas),
//! which shows up directly in the churn timing columns.
//!
//! Because vnode positions depend only on bucket identity and replica index,
//! a rebuilt ring is position-identical to one maintained incrementally; the
//! stability numbers therefore match [`RingRouter`] exactly, and only the
//! churn wall-clock differs.

use crate::strategy::ring::RingRouter;
use crate::traits::BucketRouter;

/// Ring router that rebuilds its entire ring on every removal.
///
/// # Example
///
/// ```
/// use hashbench::strategy::rebuild_ring::RebuildRingRouter;
/// use hashbench::traits::BucketRouter;
///
/// let mut router = RebuildRingRouter::new(100);
/// router.add("a");
/// router.add("b");
/// router.remove("a");
///
/// assert_eq!(router.bucket_count(), 1);
/// assert_eq!(router.get("key").as_deref(), Some("b"));
/// ```
pub struct RebuildRingRouter {
    inner: RingRouter,
    /// Authoritative membership list, in insertion order.
    retained: Vec<String>,
    replicas: usize,
}

impl RebuildRingRouter {
    /// Creates an empty router with `replicas` virtual nodes per bucket.
    ///
    /// # Panics
    ///
    /// Panics if `replicas` is 0.
    pub fn new(replicas: usize) -> Self {
        Self {
            inner: RingRouter::new(replicas),
            retained: Vec::new(),
            replicas,
        }
    }
}

impl BucketRouter for RebuildRingRouter {
    /// Appends to the retained list; the inner ring deduplicates, so a
    /// duplicate add inflates neither the ring nor the logical count.
    fn add(&mut self, bucket: &str) {
        if !self.retained.iter().any(|b| b == bucket) {
            self.retained.push(bucket.to_owned());
        }
        self.inner.add(bucket);
    }

    /// Drops the identifier from the retained list, then rebuilds the ring
    /// from the survivors at the configured replica count.
    fn remove(&mut self, bucket: &str) {
        let Some(idx) = self.retained.iter().position(|b| b == bucket) else {
            return;
        };
        self.retained.remove(idx);

        let mut rebuilt = RingRouter::new(self.replicas);
        for b in &self.retained {
            rebuilt.add(b);
        }
        self.inner = rebuilt;
    }

    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn bucket_count(&self) -> usize {
        self.retained.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_rebuilds_without_the_victim() {
        let mut router = RebuildRingRouter::new(100);
        for i in 0..10 {
            router.add(&format!("192.168.0.{i}"));
        }
        router.remove("192.168.0.5");

        assert_eq!(router.bucket_count(), 9);
        for i in 0..500 {
            let got = router.get(&format!("key-{i}")).unwrap();
            assert_ne!(got, "192.168.0.5");
        }
    }

    #[test]
    fn rebuild_matches_incremental_ring() {
        // Same survivors, same replica count: the rebuilt ring must route
        // identically to a ring that never contained the victim.
        let mut rebuilt = RebuildRingRouter::new(100);
        for i in 0..10 {
            rebuilt.add(&format!("192.168.0.{i}"));
        }
        rebuilt.remove("192.168.0.5");

        let mut reference = RingRouter::new(100);
        for i in 0..10 {
            if i != 5 {
                reference.add(&format!("192.168.0.{i}"));
            }
        }

        for i in 0..1000 {
            let key = format!("{i:x}");
            assert_eq!(rebuilt.get(&key), reference.get(&key));
        }
    }

    #[test]
    fn unknown_remove_does_not_rebuild_or_change_count() {
        let mut router = RebuildRingRouter::new(100);
        router.add("a");
        router.remove("missing");
        assert_eq!(router.bucket_count(), 1);
        assert_eq!(router.get("k").as_deref(), Some("a"));
    }

    #[test]
    fn remove_to_empty_yields_none() {
        let mut router = RebuildRingRouter::new(100);
        router.add("a");
        router.remove("a");
        assert_eq!(router.bucket_count(), 0);
        assert_eq!(router.get("k"), None);
    }
}
