pub use crate::error::{ConfigError, NonDeterminismError};
pub use crate::harness::config::TrialConfig;
pub use crate::harness::loadgen::{run_load, LoadStats};
pub use crate::harness::protocol::{run_suite, run_trial};
pub use crate::harness::report::{render_suite, TrialOutcome, TrialReport};
pub use crate::harness::scorer::DistributionStats;
pub use crate::registry::{strategy_by_id, StrategyCase, STANDARD_STRATEGIES};
pub use crate::traits::BucketRouter;

pub use crate::strategy::anchor::AnchorRouter;
pub use crate::strategy::double_jump::{DoubleJumpRouter, FxKeyHash, Xxh3KeyHash, Xxh64KeyHash};
pub use crate::strategy::jump::JumpRouter;
pub use crate::strategy::modulo::ModuloRouter;
pub use crate::strategy::rebuild_ring::RebuildRingRouter;
pub use crate::strategy::rendezvous::RendezvousRouter;
pub use crate::strategy::ring::RingRouter;
