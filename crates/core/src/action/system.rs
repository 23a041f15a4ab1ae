//! Turn-management actions issued by the runtime rather than a player.

use crate::action::ActionTransition;
use crate::action::error::SystemActionError;
use crate::env::BattleEnv;
use crate::state::{BattleState, TurnPhase};

/// Passes the enemy turn without acting.
///
/// Issued by the runtime when the enemy entered its turn stunned. The
/// action itself changes nothing; the turn flip it triggers does the
/// bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkipTurnAction;

impl ActionTransition for SkipTurnAction {
    type Error = SystemActionError;
    type Outcome = ();

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        if state.turn.phase != TurnPhase::EnemyTurn {
            return Err(SystemActionError::WrongPhase {
                expected: TurnPhase::EnemyTurn,
                actual: state.turn.phase,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        _state: &mut BattleState,
        _env: &BattleEnv<'_>,
    ) -> Result<Self::Outcome, Self::Error> {
        Ok(())
    }
}
