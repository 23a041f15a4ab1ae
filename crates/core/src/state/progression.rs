//! Level progression and the between-level upgrade draft.

use crate::state::passives::PassiveKind;

/// Stat upgrades in the draft pool.
///
/// The numeric bonuses live in the environment's upgrade table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatUpgrade {
    /// Raises max HP without healing.
    MaxHp,
    /// Raises both ends of the attack range.
    Attack,
    /// Raises both ends of the defense range.
    Defense,
    /// Raises crit chance, capped at 100 percent.
    CritChance,
}

impl StatUpgrade {
    /// Total number of stat upgrades in the pool.
    pub const COUNT: usize = 4;

    /// All stat upgrades in draw order.
    pub const fn all() -> [StatUpgrade; Self::COUNT] {
        [
            StatUpgrade::MaxHp,
            StatUpgrade::Attack,
            StatUpgrade::Defense,
            StatUpgrade::CritChance,
        ]
    }
}

/// A selection in the upgrade draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpgradeChoice {
    /// One of the two offered stat upgrades, by slot index.
    Stat(u8),
    /// The offered passive, when one was drawn.
    Passive,
}

/// The upgrade offer presented after a victory.
///
/// Two distinct stat upgrades are always offered; a passive is offered only
/// while unlearned ones remain. At most one stat and one passive can be
/// taken per offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeOffer {
    pub stats: [StatUpgrade; 2],
    pub passive: Option<PassiveKind>,
    /// The stat slot already taken from this offer, if any.
    pub stat_taken: Option<StatUpgrade>,
    /// Whether the offered passive was taken.
    pub passive_taken: bool,
}

impl UpgradeOffer {
    pub fn new(stats: [StatUpgrade; 2], passive: Option<PassiveKind>) -> Self {
        Self {
            stats,
            passive,
            stat_taken: None,
            passive_taken: false,
        }
    }

    /// Whether anything has been taken yet. Advancing requires at least
    /// one selection.
    pub fn any_taken(&self) -> bool {
        self.stat_taken.is_some() || self.passive_taken
    }
}

/// Gauntlet progress across battles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progression {
    /// Current gauntlet level, starting at the configured level.
    pub level: u32,
    /// Open upgrade offer while the phase is `LevelTransition`.
    /// `None` until the draft is presented and again after advancing.
    pub offer: Option<UpgradeOffer>,
}

impl Progression {
    pub fn new(starting_level: u32) -> Self {
        Self {
            level: starting_level,
            offer: None,
        }
    }
}
