//! Action validation errors.
//!
//! Every variant maps to a rejection a player can trigger; the runtime
//! surfaces them as rejection events and the client renders them as log
//! lines. Rejections never mutate state.

use crate::state::{SkillKind, TurnPhase};

// ============================================================================
// Skill Errors
// ============================================================================

/// Rejections raised while validating a skill use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillError {
    /// The skill's cooldown has not elapsed.
    #[error("{skill} is on cooldown for {remaining} more turns")]
    OnCooldown { skill: SkillKind, remaining: u8 },

    /// The actor's rage balance cannot cover the cost (milli-points).
    #[error("insufficient rage: need {needed}, have {have}")]
    InsufficientRage { needed: u32, have: u32 },

    /// The actor cannot survive the skill's HP sacrifice.
    #[error("insufficient health: need more than {needed}, have {have}")]
    InsufficientHealth { needed: u32, have: u32 },
}

// ============================================================================
// Upgrade Errors
// ============================================================================

/// Rejections raised while resolving upgrade picks between levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpgradeError {
    /// No upgrade offer is currently open.
    #[error("no upgrade offer is open")]
    NoOfferOpen,

    /// A stat upgrade was already chosen from this offer.
    #[error("a stat upgrade was already chosen")]
    StatAlreadyChosen,

    /// The passive from this offer was already taken.
    #[error("the passive was already taken")]
    PassiveAlreadyChosen,

    /// The offer carries no passive (all passives already learned).
    #[error("no passive was offered")]
    NoPassiveOffered,

    /// Stat slot index outside the offer.
    #[error("invalid upgrade slot {slot}")]
    InvalidSlot { slot: u8 },

    /// Advancing requires at least one pick from the offer.
    #[error("choose at least one upgrade before advancing")]
    NothingChosen,
}

// ============================================================================
// System Action Errors
// ============================================================================

/// Rejections raised by turn-management actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SystemActionError {
    /// The action only applies during a specific phase.
    #[error("expected phase {expected}, battle is in {actual}")]
    WrongPhase {
        expected: TurnPhase,
        actual: TurnPhase,
    },

    /// An upgrade offer was already drawn for this transition.
    #[error("an upgrade offer was already presented")]
    OfferAlreadyPresented,
}
