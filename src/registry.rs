//! Central registry of benchmarkable strategies.
//!
//! This is the single source of truth for strategy definitions (id, display
//! name, constructor). The trial protocol, the report binary, and the
//! criterion benches all iterate this table, so adding a strategy means
//! touching this file only.

use crate::strategy::anchor::AnchorRouter;
use crate::strategy::double_jump::{DoubleJumpRouter, FxKeyHash, Xxh3KeyHash, Xxh64KeyHash};
use crate::strategy::jump::JumpRouter;
use crate::strategy::modulo::ModuloRouter;
use crate::strategy::rebuild_ring::RebuildRingRouter;
use crate::strategy::rendezvous::RendezvousRouter;
use crate::strategy::ring::RingRouter;
use crate::traits::BucketRouter;

/// One strategy entry: identifier, human-readable name, and a constructor
/// producing a fresh instance (trials never share instances).
#[derive(Clone, Copy)]
pub struct StrategyCase {
    /// Short identifier (e.g. "ring_100").
    pub id: &'static str,
    /// Human-readable display name for reports.
    pub display_name: &'static str,
    /// Builds a fresh, empty instance.
    pub make: fn() -> Box<dyn BucketRouter>,
}

fn make_modulo() -> Box<dyn BucketRouter> {
    Box::new(ModuloRouter::new())
}

fn make_ring_1() -> Box<dyn BucketRouter> {
    Box::new(RingRouter::new(1))
}

fn make_ring_100() -> Box<dyn BucketRouter> {
    Box::new(RingRouter::new(100))
}

fn make_rebuild_ring() -> Box<dyn BucketRouter> {
    Box::new(RebuildRingRouter::new(100))
}

fn make_rendezvous() -> Box<dyn BucketRouter> {
    Box::new(RendezvousRouter::new())
}

fn make_jump() -> Box<dyn BucketRouter> {
    Box::new(JumpRouter::new())
}

fn make_double_jump_fx() -> Box<dyn BucketRouter> {
    Box::new(DoubleJumpRouter::<FxKeyHash>::new())
}

fn make_double_jump_xxh3() -> Box<dyn BucketRouter> {
    Box::new(DoubleJumpRouter::<Xxh3KeyHash>::new())
}

fn make_double_jump_xxh64() -> Box<dyn BucketRouter> {
    Box::new(DoubleJumpRouter::<Xxh64KeyHash>::new())
}

fn make_anchor() -> Box<dyn BucketRouter> {
    Box::new(AnchorRouter::default())
}

/// The standard comparison set: every strategy the report binary and the
/// benches run, in report order.
pub const STANDARD_STRATEGIES: &[StrategyCase] = &[
    StrategyCase {
        id: "modulo",
        display_name: "Modulo (baseline)",
        make: make_modulo,
    },
    StrategyCase {
        id: "ring_1",
        display_name: "Ring (1 vnode)",
        make: make_ring_1,
    },
    StrategyCase {
        id: "ring_100",
        display_name: "Ring (100 vnodes)",
        make: make_ring_100,
    },
    StrategyCase {
        id: "rebuild_ring",
        display_name: "Rebuild Ring (100 vnodes)",
        make: make_rebuild_ring,
    },
    StrategyCase {
        id: "rendezvous",
        display_name: "Rendezvous (HRW)",
        make: make_rendezvous,
    },
    StrategyCase {
        id: "jump",
        display_name: "Jump (swap-remove)",
        make: make_jump,
    },
    StrategyCase {
        id: "double_jump_fx",
        display_name: "Double Jump (Fx)",
        make: make_double_jump_fx,
    },
    StrategyCase {
        id: "double_jump_xxh3",
        display_name: "Double Jump (XXH3)",
        make: make_double_jump_xxh3,
    },
    StrategyCase {
        id: "double_jump_xxh64",
        display_name: "Double Jump (XXH64)",
        make: make_double_jump_xxh64,
    },
    StrategyCase {
        id: "anchor",
        display_name: "Anchor (cap 10k)",
        make: make_anchor,
    },
];

/// Looks up a registry entry by id.
pub fn strategy_by_id(id: &str) -> Option<&'static StrategyCase> {
    STANDARD_STRATEGIES.iter().find(|case| case.id == id)
}
