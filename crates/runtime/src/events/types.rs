//! Event types published by the simulation worker.

use serde::{Deserialize, Serialize};

use gauntlet_core::engine::ActionReport;
use gauntlet_core::{Action, ChosenUpgrade, TurnPhase, UpgradeOffer};

use super::bus::Topic;

/// Everything the runtime narrates about a battle session.
///
/// Combat events fire for every executed or rejected action, turn events
/// track where control rests, and progression events cover session
/// lifecycle and the between-level draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BattleEvent {
    /// A fresh battle state was installed, at startup or after a restart.
    SessionStarted { seed: u64, level: u32 },

    /// An action executed successfully.
    ActionResolved {
        action: Action,
        report: ActionReport,
    },

    /// An action was rejected; the state did not change.
    ActionRejected { action: Action, reason: String },

    /// Turn bookkeeping ran after a turn-spending action.
    TurnPassed { phase: TurnPhase, round: u32 },

    /// The enemy fell; the upgrade draft is about to open.
    Victory { level: u32 },

    /// The player fell; only a restart continues from here.
    Defeat { level: u32 },

    /// The upgrade draft was drawn and is open for picks.
    UpgradesOffered { offer: UpgradeOffer },

    /// A pick was taken from the open offer.
    UpgradeChosen { choice: ChosenUpgrade },

    /// The next level's battle began.
    LevelStarted { level: u32 },
}

impl BattleEvent {
    /// The topic this event is published on.
    pub fn topic(&self) -> Topic {
        match self {
            BattleEvent::ActionResolved { .. } | BattleEvent::ActionRejected { .. } => {
                Topic::Combat
            }
            BattleEvent::TurnPassed { .. } => Topic::Turn,
            BattleEvent::SessionStarted { .. }
            | BattleEvent::Victory { .. }
            | BattleEvent::Defeat { .. }
            | BattleEvent::UpgradesOffered { .. }
            | BattleEvent::UpgradeChosen { .. }
            | BattleEvent::LevelStarted { .. } => Topic::Progression,
        }
    }
}
