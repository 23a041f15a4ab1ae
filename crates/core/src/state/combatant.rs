//! Per-combatant state: health, rage, stat ranges, and modifiers.

use crate::env::CombatantTemplate;
use crate::state::passives::PassiveSet;
use crate::state::skills::Cooldowns;
use crate::state::status::StatusEffects;

/// Inclusive roll range for a combat stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatRange {
    pub min: u32,
    pub max: u32,
}

impl StatRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Raises both ends of the range, keeping its width.
    pub fn raise(&mut self, amount: u32) {
        self.min += amount;
        self.max += amount;
    }
}

/// Full state of one combatant.
///
/// The model is symmetric: both sides carry rage, cooldowns, and passives
/// even though the enemy template zeroes its rage capacity and the enemy
/// never learns passives. Clamping keeps the asymmetry out of the combat
/// code.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    /// Current health. Zero means defeated.
    pub hp: u32,
    pub max_hp: u32,
    /// Current rage in milli-points (see [`BattleConfig::RAGE_UNIT`]).
    ///
    /// [`BattleConfig::RAGE_UNIT`]: crate::config::BattleConfig::RAGE_UNIT
    pub rage: u32,
    pub max_rage: u32,
    pub attack: StatRange,
    pub defense: StatRange,
    /// Critical hit chance as an integer percent, checked on a d100.
    pub crit_chance: u32,
    /// Critical damage multiplier as an integer percent.
    pub crit_multiplier: u32,
    /// Doubles the defense roll of the next incoming strike.
    pub defending: bool,
    pub statuses: StatusEffects,
    pub passives: PassiveSet,
    pub cooldowns: Cooldowns,
}

impl CombatantState {
    /// Builds a fresh combatant at full health with no rage.
    pub fn from_template(template: &CombatantTemplate) -> Self {
        Self {
            hp: template.max_hp,
            max_hp: template.max_hp,
            rage: 0,
            max_rage: template.max_rage,
            attack: template.attack,
            defense: template.defense,
            crit_chance: template.crit_chance,
            crit_multiplier: template.crit_multiplier,
            defending: false,
            statuses: StatusEffects::empty(),
            passives: PassiveSet::default(),
            cooldowns: Cooldowns::new(),
        }
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Applies damage, flooring health at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Restores health, clamped to the maximum. Returns the amount
    /// actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    /// Adds rage in milli-points, clamped to the maximum. Returns the
    /// amount actually gained.
    ///
    /// Combatants with zero rage capacity (the enemy template) silently
    /// clamp every gain away.
    pub fn gain_rage(&mut self, milli: u32) -> u32 {
        let before = self.rage;
        self.rage = (self.rage + milli).min(self.max_rage);
        self.rage - before
    }

    /// Deducts rage. Callers validate the balance beforehand.
    pub fn spend_rage(&mut self, milli: u32) {
        self.rage = self.rage.saturating_sub(milli);
    }

    /// Raises the health cap without healing.
    pub fn raise_max_hp(&mut self, amount: u32) {
        self.max_hp += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> CombatantTemplate {
        CombatantTemplate {
            max_hp: 100,
            max_rage: 100_000,
            attack: StatRange::new(10, 15),
            defense: StatRange::new(5, 8),
            crit_chance: 10,
            crit_multiplier: 150,
        }
    }

    #[test]
    fn from_template_starts_full_health_no_rage() {
        let combatant = CombatantState::from_template(&template());
        assert_eq!(combatant.hp, 100);
        assert_eq!(combatant.rage, 0);
        assert!(!combatant.defending);
        assert!(combatant.statuses.is_empty());
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut combatant = CombatantState::from_template(&template());
        combatant.take_damage(250);
        assert_eq!(combatant.hp, 0);
        assert!(combatant.is_defeated());
    }

    #[test]
    fn heal_clamps_to_max_and_reports_the_applied_amount() {
        let mut combatant = CombatantState::from_template(&template());
        combatant.take_damage(30);
        assert_eq!(combatant.heal(1000), 30);
        assert_eq!(combatant.hp, combatant.max_hp);
    }

    #[test]
    fn rage_clamps_to_capacity() {
        let mut combatant = CombatantState::from_template(&template());
        combatant.gain_rage(150_000);
        assert_eq!(combatant.rage, 100_000);

        combatant.spend_rage(40_000);
        assert_eq!(combatant.rage, 60_000);
    }

    #[test]
    fn zero_capacity_swallows_rage() {
        let mut tpl = template();
        tpl.max_rage = 0;
        let mut combatant = CombatantState::from_template(&tpl);
        assert_eq!(combatant.gain_rage(5_000), 0);
        assert_eq!(combatant.rage, 0);
    }

    #[test]
    fn raise_max_hp_does_not_heal() {
        let mut combatant = CombatantState::from_template(&template());
        combatant.take_damage(40);
        combatant.raise_max_hp(10);
        assert_eq!(combatant.max_hp, 110);
        assert_eq!(combatant.hp, 60);
    }
}
