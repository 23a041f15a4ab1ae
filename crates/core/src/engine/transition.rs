//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionTransition, ChosenUpgrade};
use crate::env::BattleEnv;
use crate::state::BattleState;

use super::ActionReport;
use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the battle state and return the outcome
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut BattleState,
    env: &BattleEnv<'_>,
) -> Result<T::Outcome, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let outcome = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(outcome)
}

/// Routes an action to its transition and wraps the outcome in an
/// [`ActionReport`]. Internal implementation behind
/// [`BattleEngine::execute`](super::BattleEngine::execute).
pub(super) fn execute_transition(
    action: &Action,
    state: &mut BattleState,
    env: &BattleEnv<'_>,
) -> Result<ActionReport, ExecuteError> {
    match action {
        Action::Attack(transition) => {
            let strike = drive_transition(transition, state, env).map_err(ExecuteError::Attack)?;
            Ok(ActionReport::Attack(strike))
        }
        Action::Defend(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Defend)?;
            Ok(ActionReport::Defend {
                actor: transition.actor,
            })
        }
        Action::UseSkill(transition) => {
            let skill = drive_transition(transition, state, env).map_err(ExecuteError::UseSkill)?;
            Ok(ActionReport::Skill(skill))
        }
        Action::SkipTurn(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::SkipTurn)?;
            Ok(ActionReport::TurnSkipped)
        }
        Action::PresentUpgrades(transition) => {
            let offer =
                drive_transition(transition, state, env).map_err(ExecuteError::PresentUpgrades)?;
            Ok(ActionReport::OfferPresented { offer })
        }
        Action::ChooseUpgrade(transition) => {
            let chosen =
                drive_transition(transition, state, env).map_err(ExecuteError::ChooseUpgrade)?;
            Ok(match chosen {
                ChosenUpgrade::Stat(upgrade) => ActionReport::StatChosen { upgrade },
                ChosenUpgrade::Passive(passive) => ActionReport::PassiveChosen { passive },
            })
        }
        Action::AdvanceLevel(transition) => {
            let level =
                drive_transition(transition, state, env).map_err(ExecuteError::AdvanceLevel)?;
            Ok(ActionReport::LevelAdvanced { level })
        }
    }
}
