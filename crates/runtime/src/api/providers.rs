//! Asynchronous abstraction for sourcing the enemy's intent.
//!
//! Runtime users plug in [`EnemyProvider`] implementations so the battle
//! can run against the stock attacker, scripted fixtures, or smarter
//! policies.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use gauntlet_core::{Action, BattleState, Side};

/// Decides the enemy's action when its turn comes up.
///
/// The provider sees a read-only snapshot of the battle; the worker
/// executes whatever it returns through the normal engine gates, so a
/// misbehaving provider can be rejected but never corrupt state.
#[async_trait]
pub trait EnemyProvider: Send + Sync {
    async fn decide(&self, state: &BattleState) -> Action;
}

/// The canonical enemy: always attacks.
pub struct BasicAttackAi;

#[async_trait]
impl EnemyProvider for BasicAttackAi {
    async fn decide(&self, _state: &BattleState) -> Action {
        Action::attack(Side::Enemy)
    }
}

/// Replays a fixed queue of actions, then falls back to attacking.
///
/// Testing fixture, also useful for demos and replays.
pub struct ScriptedProvider {
    queue: Mutex<VecDeque<Action>>,
}

impl ScriptedProvider {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            queue: Mutex::new(actions.into_iter().collect()),
        }
    }
}

#[async_trait]
impl EnemyProvider for ScriptedProvider {
    async fn decide(&self, _state: &BattleState) -> Action {
        self.queue
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Action::attack(Side::Enemy))
    }
}
