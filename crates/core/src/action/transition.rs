use crate::env::BattleEnv;
use crate::state::BattleState;

/// Defines how a concrete action variant mutates battle state.
///
/// Execution runs in three phases. `pre_validate` checks every
/// precondition against the untouched state, `apply` mutates, and
/// `post_validate` asserts the invariants that must hold afterwards.
/// A rejection in `pre_validate` therefore leaves the state bit-for-bit
/// unchanged; no transition mutates before its checks pass.
///
/// All hooks receive read-only access to deterministic environment facts
/// via [`BattleEnv`] and must stay free of outside effects.
pub trait ActionTransition {
    type Error;
    type Outcome;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the battle state directly.
    /// Implementations may assume `pre_validate` has already passed.
    fn apply(
        &self,
        state: &mut BattleState,
        env: &BattleEnv<'_>,
    ) -> Result<Self::Outcome, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}
