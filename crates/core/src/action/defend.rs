//! Defensive stance: trade the turn for doubled mitigation.

use std::convert::Infallible;

use crate::action::ActionTransition;
use crate::env::BattleEnv;
use crate::state::{BattleState, Side};

/// Raises the actor's guard, doubling the defense roll of the next strike
/// that lands on them.
///
/// The guard is not a buff with a duration. It persists until a strike
/// consumes it, even across enemy turns skipped to stun.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefendAction {
    pub actor: Side,
}

impl ActionTransition for DefendAction {
    type Error = Infallible;
    type Outcome = ();

    fn apply(
        &self,
        state: &mut BattleState,
        _env: &BattleEnv<'_>,
    ) -> Result<Self::Outcome, Self::Error> {
        state.combatant_mut(self.actor).defending = true;
        Ok(())
    }
}
