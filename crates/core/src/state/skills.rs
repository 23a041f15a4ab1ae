//! Skill identifiers and per-skill cooldown tracking.

/// Active skills the player can spend rage on.
///
/// Balance numbers (cost, cooldown, power) live in the environment's
/// [`SkillSpec`](crate::env::SkillSpec) table, not here.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillKind {
    /// Heavy blow with a chance to stun the target.
    HeavyStrike,
    /// Sacrifices health for a large damage bonus.
    RecklessAttack,
}

impl SkillKind {
    /// Total number of skills.
    pub const COUNT: usize = 2;

    /// All skills in menu order.
    pub const fn all() -> [SkillKind; Self::COUNT] {
        [SkillKind::HeavyStrike, SkillKind::RecklessAttack]
    }

    #[inline]
    pub const fn as_index(self) -> usize {
        match self {
            SkillKind::HeavyStrike => 0,
            SkillKind::RecklessAttack => 1,
        }
    }
}

/// Remaining cooldown turns per skill.
///
/// A skill is usable at zero. Cooldowns tick down once per completed
/// player turn, including the turn the skill was used on, and they are
/// deliberately left untouched by level transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldowns {
    turns: [u8; SkillKind::COUNT],
}

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining turns before the skill is usable again.
    pub fn remaining(&self, skill: SkillKind) -> u8 {
        self.turns[skill.as_index()]
    }

    pub fn is_ready(&self, skill: SkillKind) -> bool {
        self.remaining(skill) == 0
    }

    /// Starts the cooldown for a skill.
    pub fn set(&mut self, skill: SkillKind, turns: u8) {
        self.turns[skill.as_index()] = turns;
    }

    /// Decrements every running cooldown by one turn, flooring at zero.
    pub fn tick_down(&mut self) {
        for turns in self.turns.iter_mut() {
            *turns = turns.saturating_sub(1);
        }
    }

    /// Iterates `(skill, remaining)` pairs in menu order.
    pub fn iter(&self) -> impl Iterator<Item = (SkillKind, u8)> + '_ {
        SkillKind::all()
            .into_iter()
            .map(|skill| (skill, self.remaining(skill)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_tick_to_zero() {
        let mut cooldowns = Cooldowns::new();
        cooldowns.set(SkillKind::HeavyStrike, 4);
        assert!(!cooldowns.is_ready(SkillKind::HeavyStrike));
        assert!(cooldowns.is_ready(SkillKind::RecklessAttack));

        for expected in [3, 2, 1, 0] {
            cooldowns.tick_down();
            assert_eq!(cooldowns.remaining(SkillKind::HeavyStrike), expected);
        }

        // Flooring: further ticks stay at zero.
        cooldowns.tick_down();
        assert_eq!(cooldowns.remaining(SkillKind::HeavyStrike), 0);
    }
}
