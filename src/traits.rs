//! # Bucket Router Contract
//!
//! This module defines the single capability contract every hashing strategy
//! must satisfy to be plugged into the benchmark harness. The surface is
//! deliberately narrow so that structurally incompatible algorithms (ring
//! lookup in O(log n), modulo lookup in O(1), recursive jump computation,
//! anchor-array walks) can all be measured by one harness without leaking
//! implementation details.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────┐      ┌──────────────────────────────┐
//!   │  Churn-and-Stability Trial   │      │   Concurrent Load Generator  │
//!   │  (harness::protocol)         │      │   (harness::loadgen)         │
//!   └──────────────┬───────────────┘      └──────────────┬───────────────┘
//!                  │                                     │
//!                  │         &mut / & access             │ & access only
//!                  ▼                                     ▼
//!          ┌─────────────────────────────────────────────────────┐
//!          │                dyn BucketRouter                     │
//!          │                                                     │
//!          │  add(&mut, bucket)        remove(&mut, bucket)      │
//!          │  get(&, key) → Option     bucket_count(&) → usize   │
//!          └───┬─────────┬─────────┬─────────┬─────────┬─────────┘
//!              │         │         │         │         │
//!              ▼         ▼         ▼         ▼         ▼
//!           modulo     ring    rendezvous  double    anchor ...
//!                                           jump
//! ```
//!
//! ## Concurrency discipline
//!
//! `get` takes `&self` and the trait requires `Send + Sync`, so the load
//! generator shares one instance across worker threads by reference with no
//! external locking. Membership mutation (`add`/`remove`) takes `&mut self`;
//! the borrow checker therefore enforces the harness rule that churn is never
//! issued concurrently with measurement. An adapter that keeps internal
//! mutable state on the read path (e.g. a shared streaming hasher) owns its
//! own locking.
//!
//! ## Example
//!
//! ```
//! use hashbench::strategy::ring::RingRouter;
//! use hashbench::traits::BucketRouter;
//!
//! let mut router = RingRouter::new(100);
//! router.add("192.168.0.1");
//! router.add("192.168.0.2");
//!
//! // Deterministic for a fixed bucket set.
//! let first = router.get("user:42");
//! assert_eq!(router.get("user:42"), first);
//! assert_eq!(router.bucket_count(), 2);
//!
//! // Empty registry yields the None sentinel, never a panic.
//! router.remove("192.168.0.1");
//! router.remove("192.168.0.2");
//! assert_eq!(router.get("user:42"), None);
//! ```

/// The four-operation capability contract for bucket-assignment strategies.
///
/// # Contract
///
/// - **Determinism**: for a fixed registered bucket set, `get` is idempotent —
///   repeated calls with the same key return the same bucket. The harness
///   verifies this before trusting any strategy's numbers.
/// - **Membership soundness**: `get` returns a bucket that is currently
///   registered, or `None` when the registered set is empty. Never a stale or
///   fabricated identifier.
/// - **Strategy-defined edges**: duplicate `add` and unknown `remove` are not
///   normalized by the harness; each strategy documents its own behavior and
///   must not panic on either.
/// - **Logical count**: `bucket_count` reflects the net effect of all prior
///   `add`/`remove` calls, even for strategies that cannot truly remove and
///   rebuild their structure from a retained list instead.
pub trait BucketRouter: Send + Sync {
    /// Registers a bucket into the routing structure.
    ///
    /// Behavior on a duplicate identifier is strategy-defined: some adapters
    /// deduplicate, the modulo baseline keeps both entries. Either way the
    /// call must not panic.
    fn add(&mut self, bucket: &str);

    /// Deregisters a bucket.
    ///
    /// Keys previously mapped to this bucket must map to a different,
    /// currently registered bucket on the next `get`. Removing an identifier
    /// that was never added is strategy-defined (typically a no-op).
    fn remove(&mut self, bucket: &str);

    /// Returns the currently registered bucket responsible for `key`, or
    /// `None` when no buckets are registered.
    ///
    /// Safe to call concurrently from multiple threads.
    fn get(&self, key: &str) -> Option<String>;

    /// Number of currently registered buckets.
    fn bucket_count(&self) -> usize;
}
