//! Async orchestration for the deterministic battle simulation.
//!
//! This crate wires the pure [`gauntlet_core`] engine into a tokio runtime:
//! a single simulation worker owns the authoritative [`BattleState`],
//! scheduled commands pace the enemy's automatic actions, and a topic-based
//! event bus streams everything that happens to subscribers. Consumers embed
//! [`BattleRuntime`] and interact through cloneable [`RuntimeHandle`]s.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`scheduler`] and [`worker`] keep background plumbing internal
//!
//! [`BattleState`]: gauntlet_core::BattleState

pub mod api;
pub mod events;
pub mod runtime;

mod scheduler;
mod worker;

pub use api::{
    BasicAttackAi, EnemyProvider, Result, RuntimeError, RuntimeHandle, ScriptedProvider,
};
pub use events::{BattleEvent, EventBus, Topic};
pub use runtime::{BattleRuntime, RuntimeBuilder, RuntimeConfig, Timings};
