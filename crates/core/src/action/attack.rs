//! Basic attack: the bread-and-butter strike either side can make.

use std::convert::Infallible;

use crate::action::ActionTransition;
use crate::combat::report::StrikeReport;
use crate::combat::strike;
use crate::env::{BattleEnv, RollContext, compute_seed};
use crate::state::{BattleState, PassiveKind, Side};

/// A basic attack by `actor` against the opposing side.
///
/// Always legal on the actor's turn. Resolution order is fixed: damage,
/// LifeSteal, Thorns, rage gains, then the defender's guard is consumed.
/// Rage accrues on both sides of a basic attack; skills never grant any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub actor: Side,
}

impl ActionTransition for AttackAction {
    type Error = Infallible;
    type Outcome = StrikeReport;

    fn apply(
        &self,
        state: &mut BattleState,
        env: &BattleEnv<'_>,
    ) -> Result<Self::Outcome, Self::Error> {
        let seed = state.seed;
        let nonce = state.turn.nonce;
        let actor = self.actor.as_index();

        let attack_seed = compute_seed(seed, nonce, actor, RollContext::AttackRoll);
        let defense_seed = compute_seed(seed, nonce, actor, RollContext::DefenseRoll);
        let crit_seed = compute_seed(seed, nonce, actor, RollContext::CritCheck);

        let tables = env.tables;
        let (attacker, defender) = state.pair_mut(self.actor);

        let attack = strike::attack_value(env.rng, attack_seed, attacker.attack, strike::BASIC_POWER);
        let defense =
            strike::defense_value(env.rng, defense_seed, defender.defense, defender.defending);
        let mut damage = strike::mitigate(attack, 0, defense);

        let crit = strike::percent_check(env.rng, crit_seed, attacker.crit_chance);
        if crit {
            damage = strike::crit_damage(damage, attacker.crit_multiplier);
        }

        defender.take_damage(damage);

        let lifesteal = if attacker.passives.has(PassiveKind::LifeSteal) {
            attacker.heal(strike::lifesteal_amount(damage, tables.passives.lifesteal_percent))
        } else {
            0
        };

        let thorns = if defender.passives.has(PassiveKind::Thorns) {
            attacker.take_damage(tables.passives.thorns_reflect);
            tables.passives.thorns_reflect
        } else {
            0
        };

        let attacker_rage_gain =
            attacker.gain_rage(strike::attacker_rage_gain(&tables.rage, damage));
        let defender_rage_gain =
            defender.gain_rage(strike::defender_rage_gain(&tables.rage, damage));

        // The guard is spent by the strike it mitigated, whether or not it
        // mattered.
        defender.defending = false;

        Ok(StrikeReport {
            attacker: self.actor,
            damage,
            crit,
            lifesteal,
            thorns,
            attacker_rage_gain,
            defender_rage_gain,
            defender_hp_after: defender.hp,
        })
    }
}
