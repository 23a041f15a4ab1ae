//! Passive abilities learned through the level-up draft.
//!
//! Passives modify basic-attack resolution only; skills never trigger them.

use bitflags::bitflags;

/// Passive ability identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PassiveKind {
    /// Basic attacks heal the attacker for a fraction of damage dealt.
    LifeSteal,
    /// Attackers take flat reflected damage when striking this combatant.
    Thorns,
}

impl PassiveKind {
    /// Total number of passives in the draft pool.
    pub const COUNT: usize = 2;

    /// All passives in draw order.
    pub const fn all() -> [PassiveKind; Self::COUNT] {
        [PassiveKind::LifeSteal, PassiveKind::Thorns]
    }

    const fn flag(self) -> PassiveSet {
        match self {
            PassiveKind::LifeSteal => PassiveSet::LIFE_STEAL,
            PassiveKind::Thorns => PassiveSet::THORNS,
        }
    }
}

bitflags! {
    /// Set of learned passives.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PassiveSet: u8 {
        const LIFE_STEAL = 1 << 0;
        const THORNS = 1 << 1;
    }
}

impl PassiveSet {
    /// Checks whether a passive has been learned.
    pub fn has(&self, kind: PassiveKind) -> bool {
        self.contains(kind.flag())
    }

    /// Marks a passive as learned.
    pub fn learn(&mut self, kind: PassiveKind) {
        self.insert(kind.flag());
    }

    /// Passives still available in the draft pool, in draw order.
    pub fn unlearned(&self) -> impl Iterator<Item = PassiveKind> + '_ {
        PassiveKind::all().into_iter().filter(|k| !self.has(*k))
    }

    /// Iterates learned passives in pool order.
    pub fn learned(&self) -> impl Iterator<Item = PassiveKind> + '_ {
        PassiveKind::all().into_iter().filter(|k| self.has(*k))
    }
}
