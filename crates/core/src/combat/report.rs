//! Resolved-strike summaries surfaced to callers.
//!
//! Reports record the deltas that were actually applied, after clamping.
//! A lifesteal heal at full HP reports the clamped amount, and rage gains
//! report zero for a combatant with no rage capacity.

use crate::state::{Side, SkillKind};

/// Outcome of one basic attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeReport {
    pub attacker: Side,
    /// Damage dealt to the defender, after mitigation and crit.
    pub damage: u32,
    pub crit: bool,
    /// HP actually restored to the attacker by LifeSteal.
    pub lifesteal: u32,
    /// Damage reflected onto the attacker by Thorns.
    pub thorns: u32,
    /// Rage actually gained by the attacker, in milli-points.
    pub attacker_rage_gain: u32,
    /// Rage actually gained by the defender, in milli-points.
    pub defender_rage_gain: u32,
    pub defender_hp_after: u32,
}

/// Outcome of one skill use by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillReport {
    pub skill: SkillKind,
    /// Damage dealt to the enemy, after mitigation.
    pub damage: u32,
    /// HP the player sacrificed up front. Zero for skills without a cost.
    pub hp_cost: u32,
    /// Whether a stun proc landed on the enemy.
    pub stunned: bool,
    pub target_hp_after: u32,
}
