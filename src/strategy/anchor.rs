//! AnchorHash: consistent hashing over a fixed-capacity anchor array.
//!
//! The structure reserves `capacity` integer slots up front. Live slots form
//! the working set; removed slots go onto a reserve stack and remember the
//! working-set size at the moment they were removed. A lookup walks from its
//! initial slot through removal history until it lands on a live slot:
//!
//! ```text
//!   get(key):
//!     b ← rehash(key) mod capacity
//!     while anchor[b] > 0:                 ◃ b was removed
//!       h ← rehash(key) mod anchor[b]      ◃ draw within b's era
//!       while anchor[h] ≥ anchor[b]:       ◃ h removed at/after b
//!         h ← successor[h]
//!       b ← h
//!     return b
//! ```
//!
//! Lookups are O(1) in expectation for a mostly-full anchor, memory is flat
//! (five `u32` arrays), and both adds and removals achieve minimal
//! disruption. The trade-off is the hard capacity: slots beyond `capacity`
//! can never be added, so the adapter sizes the anchor well above any trial's
//! bucket count.
//!
//! Reference: Mendelson et al., "AnchorHash: A Scalable Consistent Hash"
//! (<https://arxiv.org/abs/1812.09674>).

use rustc_hash::FxHashMap;
use xxhash_rust::xxh3::xxh3_64;

use crate::traits::BucketRouter;

/// Default anchor capacity used by the registry; far above the largest trial.
pub const DEFAULT_CAPACITY: u32 = 10_000;

/// Per-key rehash sequence (splitmix64). Deterministic for a given key, with
/// an independent draw per walk iteration.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// The anchor arrays, addressed by slot id.
struct AnchorState {
    /// 0 while the slot is live; otherwise the working-set size at removal.
    anchor: Vec<u32>,
    /// Successor chain followed when a walk hits a removed slot.
    successor: Vec<u32>,
    /// Working-set ordering (W in the paper).
    working: Vec<u32>,
    /// Inverse of `working` (L in the paper).
    last: Vec<u32>,
    /// Reserve stack of removed slots; top is the next slot to hand out.
    reserve: Vec<u32>,
    /// Current working-set size (N in the paper).
    size: u32,
    capacity: u32,
}

impl AnchorState {
    fn new(capacity: u32) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        let identity: Vec<u32> = (0..capacity).collect();
        Self {
            anchor: identity.clone(),
            successor: identity.clone(),
            working: identity.clone(),
            last: identity,
            // Reversed so slot 0 is handed out first.
            reserve: (0..capacity).rev().collect(),
            size: 0,
            capacity,
        }
    }

    fn add_bucket(&mut self) -> Option<u32> {
        let b = self.reserve.pop()?;
        self.anchor[b as usize] = 0;
        let wn = self.working[self.size as usize];
        self.last[wn as usize] = self.size;
        let lb = self.last[b as usize];
        self.working[lb as usize] = b;
        self.successor[b as usize] = b;
        self.size += 1;
        Some(b)
    }

    fn remove_bucket(&mut self, b: u32) {
        self.size -= 1;
        self.anchor[b as usize] = self.size;
        let wn = self.working[self.size as usize];
        let lb = self.last[b as usize];
        self.working[lb as usize] = wn;
        self.last[wn as usize] = lb;
        self.successor[b as usize] = wn;
        self.reserve.push(b);
    }

    /// Precondition: `size > 0`.
    fn get_bucket(&self, key: u64) -> u32 {
        let mut state = key;
        let mut b = (splitmix64(&mut state) % u64::from(self.capacity)) as u32;
        while self.anchor[b as usize] > 0 {
            let era = self.anchor[b as usize];
            let mut h = (splitmix64(&mut state) % u64::from(era)) as u32;
            while self.anchor[h as usize] >= era {
                h = self.successor[h as usize];
            }
            b = h;
        }
        b
    }
}

/// AnchorHash router mapping anchor slot ids to bucket names.
///
/// # Example
///
/// ```
/// use hashbench::strategy::anchor::AnchorRouter;
/// use hashbench::traits::BucketRouter;
///
/// let mut router = AnchorRouter::new(1024);
/// router.add("a");
/// router.add("b");
/// assert_eq!(router.bucket_count(), 2);
/// assert!(router.get("key").is_some());
/// ```
pub struct AnchorRouter {
    state: AnchorState,
    names: FxHashMap<u32, String>,
    ids: FxHashMap<String, u32>,
}

impl AnchorRouter {
    /// Creates an empty router with room for `capacity` buckets total.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: u32) -> Self {
        Self {
            state: AnchorState::new(capacity),
            names: FxHashMap::default(),
            ids: FxHashMap::default(),
        }
    }
}

impl Default for AnchorRouter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl BucketRouter for AnchorRouter {
    /// Idempotent; an add beyond the anchor capacity is ignored (the
    /// fixed-size arrays have no slot to hand out).
    fn add(&mut self, bucket: &str) {
        if self.ids.contains_key(bucket) {
            return;
        }
        if let Some(id) = self.state.add_bucket() {
            self.names.insert(id, bucket.to_owned());
            self.ids.insert(bucket.to_owned(), id);
        }
    }

    fn remove(&mut self, bucket: &str) {
        if let Some(id) = self.ids.remove(bucket) {
            self.state.remove_bucket(id);
            self.names.remove(&id);
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        if self.names.is_empty() {
            return None;
        }
        let id = self.state.get_bucket(xxh3_64(key.as_bytes()));
        self.names.get(&id).cloned()
    }

    fn bucket_count(&self) -> usize {
        self.names.len()
    }
}
