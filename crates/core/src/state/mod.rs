//! Authoritative battle state representation.
//!
//! This module owns the data structures that describe the two combatants,
//! turn bookkeeping, and level progression. Runtime layers clone or query
//! this state but mutate it exclusively through the engine.
pub mod combatant;
pub mod passives;
pub mod progression;
pub mod skills;
pub mod status;
pub mod turn;

pub use combatant::{CombatantState, StatRange};
pub use passives::{PassiveKind, PassiveSet};
pub use progression::{Progression, StatUpgrade, UpgradeChoice, UpgradeOffer};
pub use skills::{Cooldowns, SkillKind};
pub use status::{StatusEffect, StatusEffects, StatusKind};
pub use turn::{Side, TurnPhase, TurnState};

use crate::config::BattleConfig;
use crate::env::BalanceTables;

/// Canonical snapshot of the deterministic battle state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at session start and never modified. Combined with
    /// `turn.nonce` to derive a unique seed for each random event.
    pub seed: u64,

    /// The human-controlled combatant. Persists across levels.
    pub player: CombatantState,
    /// The current opponent. Rebuilt from the scaling table on each level.
    pub enemy: CombatantState,
    /// Turn bookkeeping including the current phase.
    pub turn: TurnState,
    /// Gauntlet level and any open upgrade offer.
    pub progression: Progression,
}

impl BattleState {
    /// Creates a fresh session at the configured starting level.
    pub fn new(config: &BattleConfig, tables: &BalanceTables, seed: u64) -> Self {
        let level = config.starting_level;
        Self {
            seed,
            player: CombatantState::from_template(&tables.player),
            enemy: CombatantState::from_template(&tables.enemy.template_at(level)),
            turn: TurnState::new(),
            progression: Progression::new(level),
        }
    }

    /// Combatant on the given side.
    pub fn combatant(&self, side: Side) -> &CombatantState {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    /// Mutable combatant on the given side.
    pub fn combatant_mut(&mut self, side: Side) -> &mut CombatantState {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Splits the pair into `(attacker, defender)` for the given attacker.
    pub fn pair_mut(&mut self, attacker: Side) -> (&mut CombatantState, &mut CombatantState) {
        match attacker {
            Side::Player => (&mut self.player, &mut self.enemy),
            Side::Enemy => (&mut self.enemy, &mut self.player),
        }
    }

    /// True once either side has fallen.
    pub fn any_side_defeated(&self) -> bool {
        self.player.is_defeated() || self.enemy.is_defeated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_starts_on_the_player_turn() {
        let tables = BalanceTables::default();
        let state = BattleState::new(&BattleConfig::new(), &tables, 7);

        assert_eq!(state.turn.phase, TurnPhase::PlayerTurn);
        assert_eq!(state.turn.round, 1);
        assert_eq!(state.turn.nonce, 0);
        assert_eq!(state.player.hp, tables.player.max_hp);
        assert_eq!(state.enemy.hp, tables.enemy.template_at(1).max_hp);
        assert_eq!(state.progression.level, 1);
        assert!(state.progression.offer.is_none());
    }

    #[test]
    fn pair_mut_orients_on_the_attacker() {
        let tables = BalanceTables::default();
        let mut state = BattleState::new(&BattleConfig::new(), &tables, 7);
        state.player.hp = 42;

        let (attacker, defender) = state.pair_mut(Side::Enemy);
        assert_eq!(defender.hp, 42);
        attacker.hp = 13;
        assert_eq!(state.enemy.hp, 13);
    }
}
