//! Rage-fueled skills: Heavy Strike and Reckless Attack.

use crate::action::ActionTransition;
use crate::action::error::SkillError;
use crate::combat::report::SkillReport;
use crate::combat::strike;
use crate::env::{BattleEnv, RollContext, compute_seed};
use crate::state::{BattleState, SkillKind, Side, StatusKind};

/// A skill use by the player against the enemy.
///
/// Validation order is part of the contract: the rage balance is checked
/// first, then the cooldown, then the HP sacrifice floor. Costs are only
/// deducted once every check has passed, so a rejection leaves the state
/// untouched.
///
/// Skills never crit, never trigger passives, and generate no rage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseSkillAction {
    pub skill: SkillKind,
}

impl ActionTransition for UseSkillAction {
    type Error = SkillError;
    type Outcome = SkillReport;

    fn pre_validate(&self, state: &BattleState, env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        let spec = env.tables.skill(self.skill);
        let player = &state.player;

        if player.rage < spec.rage_cost {
            return Err(SkillError::InsufficientRage {
                needed: spec.rage_cost,
                have: player.rage,
            });
        }

        let remaining = player.cooldowns.remaining(self.skill);
        if remaining > 0 {
            return Err(SkillError::OnCooldown {
                skill: self.skill,
                remaining,
            });
        }

        if spec.hp_cost_percent > 0 {
            let cost = strike::hp_cost(player.hp, spec.hp_cost_percent);
            if player.hp <= cost {
                return Err(SkillError::InsufficientHealth {
                    needed: cost,
                    have: player.hp,
                });
            }
        }

        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        env: &BattleEnv<'_>,
    ) -> Result<Self::Outcome, Self::Error> {
        let spec = *env.tables.skill(self.skill);
        let seed = state.seed;
        let nonce = state.turn.nonce;
        let actor = Side::Player.as_index();

        let attack_seed = compute_seed(seed, nonce, actor, RollContext::AttackRoll);
        let defense_seed = compute_seed(seed, nonce, actor, RollContext::DefenseRoll);
        let stun_seed = compute_seed(seed, nonce, actor, RollContext::StunCheck);

        let (player, enemy) = state.pair_mut(Side::Player);

        player.spend_rage(spec.rage_cost);
        player.cooldowns.set(self.skill, spec.cooldown);

        // The sacrifice comes out of current HP before the strike and is
        // stacked onto the damage total.
        let hp_cost = if spec.hp_cost_percent > 0 {
            strike::hp_cost(player.hp, spec.hp_cost_percent)
        } else {
            0
        };
        player.take_damage(hp_cost);

        let attack = strike::attack_value(env.rng, attack_seed, player.attack, spec.power);
        let defense =
            strike::defense_value(env.rng, defense_seed, enemy.defense, enemy.defending);
        let damage = strike::mitigate(attack, hp_cost, defense);
        enemy.take_damage(damage);

        let stunned =
            spec.stun_chance > 0 && strike::percent_check(env.rng, stun_seed, spec.stun_chance);
        if stunned {
            enemy.statuses.add(StatusKind::Stun, spec.stun_duration);
        }

        enemy.defending = false;

        Ok(SkillReport {
            skill: self.skill,
            damage,
            hp_cost,
            stunned,
            target_hp_after: enemy.hp,
        })
    }
}
