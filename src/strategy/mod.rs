//! Bucket-assignment strategies.
//!
//! Each submodule is an independent implementation of the
//! [`BucketRouter`](crate::traits::BucketRouter) contract. The harness never
//! looks past the trait; every structural difference (ring, jump, anchor,
//! linear baseline) stays inside its module.

pub mod anchor;
pub mod double_jump;
pub mod jump;
pub mod modulo;
pub mod rebuild_ring;
pub mod rendezvous;
pub mod ring;
