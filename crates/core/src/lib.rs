//! Deterministic battle logic and data types shared across clients.
//!
//! `gauntlet-core` defines the canonical rules (actions, engine, battle
//! state) and exposes pure APIs that can be reused by both the runtime and
//! offline tools. All state mutation flows through
//! [`engine::BattleEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod state;

pub use action::{
    Action, ActionTransition, AdvanceLevelAction, AttackAction, ChooseUpgradeAction,
    ChosenUpgrade, DefendAction, PresentUpgradesAction, SkillError, SkipTurnAction,
    SystemActionError, UpgradeError, UseSkillAction,
};
pub use combat::{SkillReport, StrikeReport};
pub use config::BattleConfig;
pub use engine::{
    ActionReport, BattleEngine, ExecuteError, ExecutionOutcome, TransitionPhase,
    TransitionPhaseError, TurnReport,
};
pub use env::{
    BalanceTables, BattleEnv, CombatantTemplate, EnemyScaling, PassiveRules, PcgRng, RageRules,
    RngOracle, RollContext, SkillSpec, UpgradeRules, compute_seed,
};
pub use state::{
    BattleState, CombatantState, Cooldowns, PassiveKind, PassiveSet, Progression, Side, SkillKind,
    StatRange, StatUpgrade, StatusEffect, StatusEffects, StatusKind, TurnPhase, TurnState,
    UpgradeChoice, UpgradeOffer,
};
