//! Action domain: everything that can happen to a battle, as data.
//!
//! Each concrete action implements [`ActionTransition`], a three-phase
//! contract of pre-validation, state mutation, and post-validation. The
//! engine is the only caller; runtime layers construct [`Action`] values
//! and hand them over.
//!
//! # Module Structure
//!
//! - `transition`: the three-phase [`ActionTransition`] trait
//! - `error`: rejection types surfaced to players
//! - `attack` / `defend` / `skill`: combat actions
//! - `level`: the between-level upgrade draft
//! - `system`: runtime-issued turn management

pub mod attack;
pub mod defend;
pub mod error;
pub mod level;
pub mod skill;
pub mod system;
pub mod transition;

pub use attack::AttackAction;
pub use defend::DefendAction;
pub use error::{SkillError, SystemActionError, UpgradeError};
pub use level::{AdvanceLevelAction, ChooseUpgradeAction, ChosenUpgrade, PresentUpgradesAction};
pub use skill::UseSkillAction;
pub use system::SkipTurnAction;
pub use transition::ActionTransition;

use crate::state::{Side, SkillKind, UpgradeChoice};

/// Top-level action enum dispatched by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Basic attack by either side.
    Attack(AttackAction),
    /// Defensive stance by either side.
    Defend(DefendAction),
    /// Player skill use.
    UseSkill(UseSkillAction),
    /// Runtime-issued pass for a stunned enemy.
    SkipTurn(SkipTurnAction),
    /// Draws the between-level upgrade offer.
    PresentUpgrades(PresentUpgradesAction),
    /// Takes one pick from the open offer.
    ChooseUpgrade(ChooseUpgradeAction),
    /// Closes the draft and starts the next battle.
    AdvanceLevel(AdvanceLevelAction),
}

impl Action {
    pub fn attack(actor: Side) -> Self {
        Self::Attack(AttackAction { actor })
    }

    pub fn defend(actor: Side) -> Self {
        Self::Defend(DefendAction { actor })
    }

    pub fn use_skill(skill: SkillKind) -> Self {
        Self::UseSkill(UseSkillAction { skill })
    }

    pub fn skip_turn() -> Self {
        Self::SkipTurn(SkipTurnAction)
    }

    pub fn present_upgrades() -> Self {
        Self::PresentUpgrades(PresentUpgradesAction)
    }

    pub fn choose_upgrade(choice: UpgradeChoice) -> Self {
        Self::ChooseUpgrade(ChooseUpgradeAction { choice })
    }

    pub fn advance_level() -> Self {
        Self::AdvanceLevel(AdvanceLevelAction)
    }

    /// The side whose turn this action spends, if it spends one.
    ///
    /// Skills belong to the player; turn skips and draft actions carry
    /// no acting side of their own.
    pub fn actor(&self) -> Option<Side> {
        match self {
            Action::Attack(action) => Some(action.actor),
            Action::Defend(action) => Some(action.actor),
            Action::UseSkill(_) => Some(Side::Player),
            Action::SkipTurn(_) | Action::PresentUpgrades(_) => None,
            Action::ChooseUpgrade(_) | Action::AdvanceLevel(_) => None,
        }
    }

    /// Whether executing this action ends the current turn.
    pub fn ends_turn(&self) -> bool {
        matches!(
            self,
            Action::Attack(_) | Action::Defend(_) | Action::UseSkill(_) | Action::SkipTurn(_)
        )
    }
}
