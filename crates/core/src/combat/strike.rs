//! Strike resolution formulas.
//!
//! All arithmetic is integer-only with flooring division so every
//! platform resolves a strike identically. Functions here are pure;
//! actions own the sequencing and the state writes.

use crate::env::{RageRules, RngOracle};
use crate::state::StatRange;

/// Power percent of a basic attack. Skills carry their own power in the
/// balance tables.
pub const BASIC_POWER: u32 = 100;

/// Attack contribution of a strike: a roll within the attacker's range,
/// scaled by the move's power percent and floored.
pub fn attack_value(rng: &dyn RngOracle, seed: u64, attack: StatRange, power: u32) -> u32 {
    rng.range(seed, attack.min, attack.max) * power / 100
}

/// Mitigation contribution of a strike: a roll within the defender's
/// range, doubled while the defender holds a guard.
pub fn defense_value(rng: &dyn RngOracle, seed: u64, defense: StatRange, defending: bool) -> u32 {
    let roll = rng.range(seed, defense.min, defense.max);
    if defending { roll * 2 } else { roll }
}

/// Pre-crit damage. `bonus` is flat damage stacked on the attack value
/// (the reckless HP sacrifice). A landed strike always deals at least 1.
pub fn mitigate(attack_value: u32, bonus: u32, defense_value: u32) -> u32 {
    (attack_value + bonus).saturating_sub(defense_value).max(1)
}

/// Percent check on a d100: succeeds when the roll lands at or under
/// `chance`. Used for crit and stun procs.
pub fn percent_check(rng: &dyn RngOracle, seed: u64, chance: u32) -> bool {
    rng.roll_d100(seed) <= chance
}

/// Applies the crit multiplier, integer percent, floored.
pub fn crit_damage(damage: u32, multiplier: u32) -> u32 {
    damage * multiplier / 100
}

/// LifeSteal healing for the given damage, floored.
pub fn lifesteal_amount(damage: u32, percent: u32) -> u32 {
    damage * percent / 100
}

/// Self-inflicted HP cost as a percent of current HP, floored.
pub fn hp_cost(current_hp: u32, percent: u32) -> u32 {
    current_hp * percent / 100
}

/// Rage generated by landing a basic attack, in milli-points.
pub fn attacker_rage_gain(rules: &RageRules, damage: u32) -> u32 {
    rules.attacker_base + damage * rules.attacker_per_damage
}

/// Rage generated by being hit with a basic attack, in milli-points.
pub fn defender_rage_gain(rules: &RageRules, damage: u32) -> u32 {
    rules.defender_base + damage * rules.defender_per_damage
}
