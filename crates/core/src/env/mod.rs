//! Battle environment: deterministic randomness and balance tables.
//!
//! Actions never own their dependencies. Each execution borrows a
//! [`BattleEnv`] assembled by the caller, which keeps the state machine
//! pure and lets tests substitute scripted oracles.

pub mod rng;
pub mod tables;

pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};
pub use tables::{
    BalanceTables, CombatantTemplate, EnemyScaling, PassiveRules, RageRules, SkillSpec,
    UpgradeRules,
};

/// Borrowed execution environment for one action.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    pub rng: &'a dyn RngOracle,
    pub tables: &'a BalanceTables,
}

impl<'a> BattleEnv<'a> {
    pub fn new(rng: &'a dyn RngOracle, tables: &'a BalanceTables) -> Self {
        Self { rng, tables }
    }
}
