//! Action execution pipeline and turn flow.
//!
//! The [`BattleEngine`] is the authoritative reducer for [`BattleState`].
//! It gates actions against the turn phase, drives the transition
//! pipeline, and runs the end-of-turn bookkeeping. Runtime layers never
//! mutate state except through [`BattleEngine::execute`].

mod errors;
mod transition;
mod turns;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::Action;
use crate::combat::{SkillReport, StrikeReport};
use crate::env::BattleEnv;
use crate::state::{
    BattleState, PassiveKind, Side, StatUpgrade, TurnPhase, UpgradeOffer,
};

/// What an executed action did, in domain terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionReport {
    Attack(StrikeReport),
    Defend { actor: Side },
    Skill(SkillReport),
    TurnSkipped,
    OfferPresented { offer: UpgradeOffer },
    StatChosen { upgrade: StatUpgrade },
    PassiveChosen { passive: PassiveKind },
    LevelAdvanced { level: u32 },
}

/// Turn bookkeeping that followed a turn-spending action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    /// Phase after the flip. Terminal phases mean the battle or level
    /// ended on this action.
    pub phase: TurnPhase,
    pub round: u32,
    /// Whether the enemy entered its turn stunned. The runtime answers
    /// this with a turn skip instead of an enemy action.
    pub enemy_stunned: bool,
}

/// Complete outcome of action execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Action-specific result.
    pub report: ActionReport,
    /// Turn flip that followed, for actions that spend a turn.
    pub turn: Option<TurnReport>,
}

/// Battle engine that manages action execution and turn flow.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate, then apply, then post_validate. A rejection at any phase
/// surfaces as an [`ExecuteError`] and the nonce does not advance, so a
/// rejected action is invisible to the RNG stream.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
}

impl<'a> BattleEngine<'a> {
    /// Creates an engine borrowing the given state.
    pub fn new(state: &'a mut BattleState) -> Self {
        Self { state }
    }

    /// Executes an action by routing it through the transition pipeline.
    ///
    /// Turn-spending actions are gated on the phase first: nothing
    /// executes on a finished battle, combat stops between levels, and an
    /// actor can only act on their own turn. After a successful turn-
    /// spending action the end-of-turn sequence runs unconditionally.
    pub fn execute(
        &mut self,
        env: BattleEnv<'_>,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        self.validate_turn(action)?;

        let report = transition::execute_transition(action, self.state, &env)?;

        // Increment nonce after successful execution
        self.state.turn.nonce += 1;

        let turn = action.ends_turn().then(|| self.advance_turn());

        Ok(ExecutionOutcome { report, turn })
    }

    /// Validates the action against the current turn phase.
    fn validate_turn(&self, action: &Action) -> Result<(), ExecuteError> {
        let phase = self.state.turn.phase;

        if phase == TurnPhase::GameOver {
            return Err(ExecuteError::BattleOver);
        }

        if action.ends_turn() {
            if phase == TurnPhase::LevelTransition {
                return Err(ExecuteError::BetweenLevels);
            }
            if let Some(actor) = action.actor() {
                if phase.acting_side() != Some(actor) {
                    return Err(ExecuteError::OutOfTurn { actor, phase });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::SkillError;
    use crate::config::BattleConfig;
    use crate::env::{BalanceTables, PcgRng, RngOracle};
    use crate::state::{SkillKind, StatusKind, UpgradeChoice};

    /// Pins every roll to its minimum and every percent check to success.
    struct AlwaysLow;

    impl RngOracle for AlwaysLow {
        fn next_u32(&self, _seed: u64) -> u32 {
            0
        }
    }

    fn setup() -> (BattleState, BalanceTables) {
        let tables = BalanceTables::default();
        let state = BattleState::new(&BattleConfig::new(), &tables, 2024);
        (state, tables)
    }

    #[test]
    fn attack_flips_the_turn_and_advances_the_nonce() {
        let (mut state, tables) = setup();
        let rng = PcgRng;

        let outcome = BattleEngine::new(&mut state)
            .execute(BattleEnv::new(&rng, &tables), &Action::attack(Side::Player))
            .unwrap();

        assert!(matches!(outcome.report, ActionReport::Attack(_)));
        let turn = outcome.turn.unwrap();
        assert_eq!(turn.phase, TurnPhase::EnemyTurn);
        assert_eq!(turn.round, 1);
        assert!(!turn.enemy_stunned);
        assert_eq!(state.turn.nonce, 1);
    }

    #[test]
    fn a_full_round_returns_to_the_player() {
        let (mut state, tables) = setup();
        let rng = PcgRng;
        let env = BattleEnv::new(&rng, &tables);

        BattleEngine::new(&mut state)
            .execute(env, &Action::attack(Side::Player))
            .unwrap();
        let outcome = BattleEngine::new(&mut state)
            .execute(env, &Action::attack(Side::Enemy))
            .unwrap();

        let turn = outcome.turn.unwrap();
        assert_eq!(turn.phase, TurnPhase::PlayerTurn);
        assert_eq!(turn.round, 2);
        assert_eq!(state.turn.nonce, 2);
    }

    #[test]
    fn acting_out_of_turn_is_rejected_without_side_effects() {
        let (mut state, tables) = setup();
        let snapshot = state.clone();
        let rng = PcgRng;

        let err = BattleEngine::new(&mut state)
            .execute(BattleEnv::new(&rng, &tables), &Action::attack(Side::Enemy))
            .unwrap_err();

        assert_eq!(
            err,
            ExecuteError::OutOfTurn {
                actor: Side::Enemy,
                phase: TurnPhase::PlayerTurn,
            }
        );
        assert_eq!(state, snapshot);
    }

    #[test]
    fn skill_rejection_rolls_back_nothing_and_keeps_the_nonce() {
        let (mut state, tables) = setup();
        let snapshot = state.clone();
        let rng = PcgRng;

        let err = BattleEngine::new(&mut state)
            .execute(
                BattleEnv::new(&rng, &tables),
                &Action::use_skill(SkillKind::HeavyStrike),
            )
            .unwrap_err();

        match err {
            ExecuteError::UseSkill(inner) => {
                assert_eq!(inner.phase, TransitionPhase::PreValidate);
                assert_eq!(
                    inner.error,
                    SkillError::InsufficientRage { needed: 5_000, have: 0 }
                );
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(state, snapshot);
        assert_eq!(state.turn.nonce, 0);
    }

    #[test]
    fn killing_blow_enters_the_transition_without_ticking_cooldowns() {
        let (mut state, tables) = setup();
        state.player.rage = 5_000;
        state.enemy.hp = 1;
        let rng = AlwaysLow;

        let outcome = BattleEngine::new(&mut state)
            .execute(
                BattleEnv::new(&rng, &tables),
                &Action::use_skill(SkillKind::HeavyStrike),
            )
            .unwrap();

        let turn = outcome.turn.unwrap();
        assert_eq!(turn.phase, TurnPhase::LevelTransition);
        // The frozen cooldown carries into the next battle at full length.
        assert_eq!(state.player.cooldowns.remaining(SkillKind::HeavyStrike), 4);
    }

    #[test]
    fn double_knockout_is_a_defeat() {
        let (mut state, tables) = setup();
        state.player.hp = 3;
        state.enemy.hp = 1;
        state.enemy.passives.learn(PassiveKind::Thorns);
        let rng = PcgRng;

        let outcome = BattleEngine::new(&mut state)
            .execute(BattleEnv::new(&rng, &tables), &Action::attack(Side::Player))
            .unwrap();

        assert_eq!(state.player.hp, 0);
        assert_eq!(state.enemy.hp, 0);
        assert_eq!(outcome.turn.unwrap().phase, TurnPhase::GameOver);
    }

    #[test]
    fn stun_skips_three_enemy_turns() {
        let (mut state, tables) = setup();
        state.player.rage = 5_000;
        // Pad the pools so the battle cannot end during the exchange.
        state.player.hp = 1_000;
        state.player.max_hp = 1_000;
        state.enemy.hp = 1_000;
        state.enemy.max_hp = 1_000;
        let rng = AlwaysLow;
        let env = BattleEnv::new(&rng, &tables);

        let outcome = BattleEngine::new(&mut state)
            .execute(env, &Action::use_skill(SkillKind::HeavyStrike))
            .unwrap();
        assert!(outcome.turn.unwrap().enemy_stunned);

        for _ in 0..2 {
            BattleEngine::new(&mut state)
                .execute(env, &Action::skip_turn())
                .unwrap();
            let outcome = BattleEngine::new(&mut state)
                .execute(env, &Action::attack(Side::Player))
                .unwrap();
            assert!(outcome.turn.unwrap().enemy_stunned);
        }

        BattleEngine::new(&mut state)
            .execute(env, &Action::skip_turn())
            .unwrap();
        let outcome = BattleEngine::new(&mut state)
            .execute(env, &Action::attack(Side::Player))
            .unwrap();

        // Third skip exhausted the stun; the enemy may act again.
        assert!(!outcome.turn.unwrap().enemy_stunned);
        assert!(!state.enemy.statuses.has(StatusKind::Stun));
    }

    #[test]
    fn combat_is_blocked_between_levels() {
        let (mut state, tables) = setup();
        state.enemy.hp = 1;
        let rng = PcgRng;
        let env = BattleEnv::new(&rng, &tables);

        BattleEngine::new(&mut state)
            .execute(env, &Action::attack(Side::Player))
            .unwrap();
        assert_eq!(state.turn.phase, TurnPhase::LevelTransition);

        let err = BattleEngine::new(&mut state)
            .execute(env, &Action::attack(Side::Player))
            .unwrap_err();
        assert_eq!(err, ExecuteError::BetweenLevels);
    }

    #[test]
    fn nothing_executes_after_defeat() {
        let (mut state, tables) = setup();
        state.turn.phase = TurnPhase::GameOver;
        let rng = PcgRng;
        let env = BattleEnv::new(&rng, &tables);

        for action in [
            Action::attack(Side::Player),
            Action::defend(Side::Player),
            Action::present_upgrades(),
            Action::advance_level(),
        ] {
            let err = BattleEngine::new(&mut state).execute(env, &action).unwrap_err();
            assert_eq!(err, ExecuteError::BattleOver);
        }
    }

    #[test]
    fn upgrade_flow_runs_through_the_engine() {
        let (mut state, tables) = setup();
        state.enemy.hp = 1;
        let rng = PcgRng;
        let env = BattleEnv::new(&rng, &tables);

        BattleEngine::new(&mut state)
            .execute(env, &Action::attack(Side::Player))
            .unwrap();

        let outcome = BattleEngine::new(&mut state)
            .execute(env, &Action::present_upgrades())
            .unwrap();
        let ActionReport::OfferPresented { offer } = outcome.report else {
            panic!("expected an offer");
        };
        assert!(outcome.turn.is_none());

        let outcome = BattleEngine::new(&mut state)
            .execute(env, &Action::choose_upgrade(UpgradeChoice::Stat(0)))
            .unwrap();
        assert_eq!(
            outcome.report,
            ActionReport::StatChosen { upgrade: offer.stats[0] }
        );

        let outcome = BattleEngine::new(&mut state)
            .execute(env, &Action::advance_level())
            .unwrap();
        assert_eq!(outcome.report, ActionReport::LevelAdvanced { level: 2 });
        assert_eq!(state.turn.phase, TurnPhase::PlayerTurn);
        assert_eq!(state.enemy.max_hp, 120);
    }

    #[test]
    fn same_seed_and_script_produce_identical_states() {
        let tables = BalanceTables::default();
        let config = BattleConfig::new();
        let mut a = BattleState::new(&config, &tables, 77);
        let mut b = BattleState::new(&config, &tables, 77);
        let rng = PcgRng;
        let env = BattleEnv::new(&rng, &tables);

        let script = [
            Action::attack(Side::Player),
            Action::attack(Side::Enemy),
            Action::defend(Side::Player),
            Action::attack(Side::Enemy),
            Action::attack(Side::Player),
        ];

        for action in &script {
            let oa = BattleEngine::new(&mut a).execute(env, action).unwrap();
            let ob = BattleEngine::new(&mut b).execute(env, action).unwrap();
            assert_eq!(oa, ob);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let tables = BalanceTables::default();
        let config = BattleConfig::new();
        let mut a = BattleState::new(&config, &tables, 1);
        let mut b = BattleState::new(&config, &tables, 2);
        // Deep pools keep both battles running for the whole comparison.
        for state in [&mut a, &mut b] {
            state.player.hp = 10_000;
            state.player.max_hp = 10_000;
            state.enemy.hp = 10_000;
            state.enemy.max_hp = 10_000;
        }
        let rng = PcgRng;
        let env = BattleEnv::new(&rng, &tables);

        let mut diverged = false;
        for _ in 0..6 {
            for actor in [Side::Player, Side::Enemy] {
                let oa = BattleEngine::new(&mut a)
                    .execute(env, &Action::attack(actor))
                    .unwrap();
                let ob = BattleEngine::new(&mut b)
                    .execute(env, &Action::attack(actor))
                    .unwrap();
                diverged |= oa != ob;
            }
        }
        assert!(diverged, "six rounds with different seeds never diverged");
    }
}
