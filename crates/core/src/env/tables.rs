//! Balance tables: combatant templates, skill specs, and progression rules.
//!
//! Everything numeric about the game lives here so the combat and
//! progression code stays formula-only. The `Default` impl carries the
//! canonical tuning.

use crate::config::BattleConfig;
use crate::state::{SkillKind, StatRange, StatUpgrade};

/// Stats used to build a fresh combatant at full health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantTemplate {
    pub max_hp: u32,
    /// Rage capacity in milli-points. Zero for combatants that never
    /// build rage.
    pub max_rage: u32,
    pub attack: StatRange,
    pub defense: StatRange,
    /// Integer percent.
    pub crit_chance: u32,
    /// Integer percent.
    pub crit_multiplier: u32,
}

/// Balance parameters for one skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSpec {
    /// Rage cost in milli-points.
    pub rage_cost: u32,
    /// Cooldown in player turns, started on use.
    pub cooldown: u8,
    /// Attack roll multiplier as an integer percent.
    pub power: u32,
    /// Stun proc chance as an integer percent; zero disables the proc.
    pub stun_chance: u32,
    /// Stun duration in enemy turns when the proc lands.
    pub stun_duration: u8,
    /// Self-inflicted cost as an integer percent of current HP, floored;
    /// the cost is also added to the damage total. Zero disables it.
    pub hp_cost_percent: u32,
}

impl SkillSpec {
    pub const fn new(
        rage_cost: u32,
        cooldown: u8,
        power: u32,
        stun_chance: u32,
        stun_duration: u8,
        hp_cost_percent: u32,
    ) -> Self {
        Self {
            rage_cost,
            cooldown,
            power,
            stun_chance,
            stun_duration,
            hp_cost_percent,
        }
    }
}

/// Rage gains from basic attacks, in milli-points.
///
/// Skills never generate rage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RageRules {
    /// Flat gain for landing a basic attack.
    pub attacker_base: u32,
    /// Additional gain per point of damage dealt.
    pub attacker_per_damage: u32,
    /// Flat gain for being hit by a basic attack.
    pub defender_base: u32,
    /// Additional gain per point of damage taken.
    pub defender_per_damage: u32,
}

/// Passive ability parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveRules {
    /// Fraction of damage dealt healed by LifeSteal, integer percent.
    pub lifesteal_percent: u32,
    /// Flat damage reflected by Thorns.
    pub thorns_reflect: u32,
}

/// Enemy stat growth per gauntlet level.
///
/// Level 1 uses the base values; each further level adds the per-level
/// increments once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyScaling {
    pub base_hp: u32,
    pub hp_per_level: u32,
    pub base_attack: StatRange,
    pub attack_per_level: u32,
    pub base_defense: StatRange,
    pub defense_per_level: u32,
    pub crit_chance: u32,
    pub crit_multiplier: u32,
}

impl EnemyScaling {
    /// Template for the enemy at the given level.
    pub fn template_at(&self, level: u32) -> CombatantTemplate {
        let bonus = level.saturating_sub(1);
        let mut attack = self.base_attack;
        attack.raise(bonus * self.attack_per_level);
        let mut defense = self.base_defense;
        defense.raise(bonus * self.defense_per_level);

        CombatantTemplate {
            max_hp: self.base_hp + bonus * self.hp_per_level,
            max_rage: 0,
            attack,
            defense,
            crit_chance: self.crit_chance,
            crit_multiplier: self.crit_multiplier,
        }
    }
}

/// Numeric bonuses granted by the stat upgrades.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeRules {
    pub max_hp_bonus: u32,
    pub attack_bonus: u32,
    pub defense_bonus: u32,
    /// Crit chance bonus in integer percent, applied up to the cap of 100.
    pub crit_chance_bonus: u32,
}

impl UpgradeRules {
    /// Bonus amount for a given stat upgrade.
    pub fn bonus(&self, upgrade: StatUpgrade) -> u32 {
        match upgrade {
            StatUpgrade::MaxHp => self.max_hp_bonus,
            StatUpgrade::Attack => self.attack_bonus,
            StatUpgrade::Defense => self.defense_bonus,
            StatUpgrade::CritChance => self.crit_chance_bonus,
        }
    }
}

/// Complete balance table set for one battle session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BalanceTables {
    pub player: CombatantTemplate,
    pub enemy: EnemyScaling,
    pub heavy_strike: SkillSpec,
    pub reckless_attack: SkillSpec,
    pub rage: RageRules,
    pub passives: PassiveRules,
    pub upgrades: UpgradeRules,
}

impl BalanceTables {
    /// Spec for a skill.
    pub fn skill(&self, kind: SkillKind) -> &SkillSpec {
        match kind {
            SkillKind::HeavyStrike => &self.heavy_strike,
            SkillKind::RecklessAttack => &self.reckless_attack,
        }
    }
}

impl Default for BalanceTables {
    fn default() -> Self {
        Self {
            player: CombatantTemplate {
                max_hp: 100,
                max_rage: 100 * BattleConfig::RAGE_UNIT,
                attack: StatRange::new(10, 15),
                defense: StatRange::new(5, 8),
                crit_chance: 10,
                crit_multiplier: 150,
            },
            enemy: EnemyScaling {
                base_hp: 100,
                hp_per_level: 20,
                base_attack: StatRange::new(8, 11),
                attack_per_level: 2,
                base_defense: StatRange::new(3, 6),
                defense_per_level: 1,
                crit_chance: 10,
                crit_multiplier: 150,
            },
            heavy_strike: SkillSpec::new(5 * BattleConfig::RAGE_UNIT, 4, 125, 70, 3, 0),
            reckless_attack: SkillSpec::new(8 * BattleConfig::RAGE_UNIT, 4, 150, 0, 0, 20),
            rage: RageRules {
                attacker_base: BattleConfig::RAGE_UNIT,
                attacker_per_damage: 25,
                defender_base: BattleConfig::RAGE_UNIT,
                defender_per_damage: 50,
            },
            passives: PassiveRules {
                lifesteal_percent: 10,
                thorns_reflect: 5,
            },
            upgrades: UpgradeRules {
                max_hp_bonus: 10,
                attack_bonus: 2,
                defense_bonus: 2,
                crit_chance_bonus: 5,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_scaling_matches_the_growth_table() {
        let tables = BalanceTables::default();

        let level_1 = tables.enemy.template_at(1);
        assert_eq!(level_1.max_hp, 100);
        assert_eq!(level_1.attack, StatRange::new(8, 11));
        assert_eq!(level_1.defense, StatRange::new(3, 6));

        let level_4 = tables.enemy.template_at(4);
        assert_eq!(level_4.max_hp, 160);
        assert_eq!(level_4.attack, StatRange::new(14, 17));
        assert_eq!(level_4.defense, StatRange::new(6, 9));
    }

    #[test]
    fn skill_lookup_matches_kind() {
        let tables = BalanceTables::default();
        assert_eq!(tables.skill(SkillKind::HeavyStrike).power, 125);
        assert_eq!(tables.skill(SkillKind::RecklessAttack).power, 150);
        assert_eq!(tables.skill(SkillKind::RecklessAttack).hp_cost_percent, 20);
    }
}
