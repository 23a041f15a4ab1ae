//! Error types for the action execution pipeline.

use crate::action::{
    ActionTransition, AdvanceLevelAction, AttackAction, ChooseUpgradeAction, DefendAction,
    PresentUpgradesAction, SkipTurnAction, UseSkillAction,
};
use crate::state::{Side, TurnPhase};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the battle engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("attack failed: {0}")]
    Attack(TransitionPhaseError<<AttackAction as ActionTransition>::Error>),

    #[error("defend failed: {0}")]
    Defend(TransitionPhaseError<<DefendAction as ActionTransition>::Error>),

    #[error("skill failed: {0}")]
    UseSkill(TransitionPhaseError<<UseSkillAction as ActionTransition>::Error>),

    #[error("turn skip failed: {0}")]
    SkipTurn(TransitionPhaseError<<SkipTurnAction as ActionTransition>::Error>),

    #[error("upgrade draw failed: {0}")]
    PresentUpgrades(TransitionPhaseError<<PresentUpgradesAction as ActionTransition>::Error>),

    #[error("upgrade pick failed: {0}")]
    ChooseUpgrade(TransitionPhaseError<<ChooseUpgradeAction as ActionTransition>::Error>),

    #[error("level advance failed: {0}")]
    AdvanceLevel(TransitionPhaseError<<AdvanceLevelAction as ActionTransition>::Error>),

    #[error("battle is already over")]
    BattleOver,

    #[error("battle is between levels")]
    BetweenLevels,

    #[error("out of turn: {actor} cannot act during {phase}")]
    OutOfTurn { actor: Side, phase: TurnPhase },
}
