//! Synthetic bucket identities and lookup keys.
//!
//! Buckets are IPv4-like strings; initial population uses the `192.168.0.*`
//! range, scale-up continues the same numbering, and full turnover switches
//! to `192.168.1.*` so every post-turnover identity is fresh. Keys are hex
//! renderings of 64-bit random draws (UUID-like, ephemeral).

use rand::rngs::SmallRng;
use rand::Rng;

/// Subnet used for the initial population and scale-up buckets.
pub const INITIAL_SUBNET: u8 = 0;
/// Subnet used for turnover buckets, guaranteeing fresh identities.
pub const TURNOVER_SUBNET: u8 = 1;

/// Synthetic bucket identity, e.g. `192.168.0.17`.
///
/// `host` is intentionally unbounded (no octet wrap): identities stay
/// distinct at any trial size, and the sequential scheme cannot collide.
pub fn bucket_ip(subnet: u8, host: usize) -> String {
    format!("192.168.{subnet}.{host}")
}

/// The initial bucket population for a trial of size `n`.
pub fn initial_buckets(n: usize) -> Vec<String> {
    (0..n).map(|host| bucket_ip(INITIAL_SUBNET, host)).collect()
}

/// One synthetic lookup key: a hex-rendered random u64.
#[inline]
pub fn hex_key(rng: &mut SmallRng) -> String {
    format!("{:x}", rng.random::<u64>())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn bucket_identities_are_distinct() {
        let buckets = initial_buckets(1500);
        for (i, b) in buckets.iter().enumerate() {
            assert_eq!(b, &format!("192.168.0.{i}"));
        }
        let unique: std::collections::HashSet<_> = buckets.iter().collect();
        assert_eq!(unique.len(), 1500);
    }

    #[test]
    fn turnover_subnet_never_overlaps_initial() {
        let initial = initial_buckets(100);
        for host in 0..100 {
            assert!(!initial.contains(&bucket_ip(TURNOVER_SUBNET, host)));
        }
    }

    #[test]
    fn keys_are_seed_reproducible() {
        let mut a = SmallRng::seed_from_u64(7);
        let mut b = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(hex_key(&mut a), hex_key(&mut b));
        }
    }
}
