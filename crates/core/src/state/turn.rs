//! Turn ownership and battle phase tracking.

/// Identifies one of the two combatants.
///
/// Also used as the turn owner tag and as the actor index when deriving
/// per-roll RNG seeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// The other combatant.
    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    /// Stable index for RNG seed derivation.
    #[inline]
    pub const fn as_index(self) -> u32 {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }
}

/// Coarse battle phase.
///
/// Combat actions are only executable in the matching `*Turn` phase.
/// `LevelTransition` accepts the upgrade-draft actions, `GameOver` accepts
/// nothing (a reset builds a fresh state instead).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    /// Waiting on a player action.
    PlayerTurn,
    /// Waiting on the enemy action (or a stun skip).
    EnemyTurn,
    /// Enemy defeated; the upgrade draft is open.
    LevelTransition,
    /// Player defeated; only a reset leaves this phase.
    GameOver,
}

impl TurnPhase {
    /// The side whose combat action is currently accepted, if any.
    #[inline]
    pub const fn acting_side(self) -> Option<Side> {
        match self {
            TurnPhase::PlayerTurn => Some(Side::Player),
            TurnPhase::EnemyTurn => Some(Side::Enemy),
            TurnPhase::LevelTransition | TurnPhase::GameOver => None,
        }
    }

    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, TurnPhase::GameOver)
    }
}

/// Turn bookkeeping for one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Current phase; gates which actions the engine will accept.
    pub phase: TurnPhase,
    /// Completed player+enemy exchanges, starting at 1. Display only.
    pub round: u32,
    /// Number of successfully executed actions. Feeds RNG seed derivation,
    /// so it only advances on committed actions, never on rejections.
    pub nonce: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            phase: TurnPhase::PlayerTurn,
            round: 1,
            nonce: 0,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
