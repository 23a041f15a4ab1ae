//! Simulation worker that owns the authoritative [`BattleState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::api::RuntimeHandle),
//! executes actions via [`BattleEngine`], and publishes [`BattleEvent`]
//! notifications. The worker is the single writer: handles and scheduled
//! timers all funnel through its command queue.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use gauntlet_core::engine::{ExecuteError, TransitionPhase};
use gauntlet_core::{
    Action, BalanceTables, BattleConfig, BattleEngine, BattleEnv, BattleState, ExecutionOutcome,
    RngOracle, TurnPhase,
};

use crate::api::{EnemyProvider, Result, RuntimeError};
use crate::events::{BattleEvent, EventBus};
use crate::scheduler::{ScheduleToken, ScheduledKind, TurnScheduler};

/// Commands processed by the simulation worker.
pub(crate) enum Command {
    /// Execute an action against the current state.
    ///
    /// Gameplay rejections still reply `Ok(())`; they surface as
    /// [`BattleEvent::ActionRejected`] on the event bus.
    Execute {
        action: Action,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the current battle state (read-only clone).
    Query { reply: oneshot::Sender<BattleState> },
    /// Cancel pending timers and rebuild the battle at level one.
    Reset {
        seed: Option<u64>,
        reply: oneshot::Sender<Result<()>>,
    },
    /// A scheduled delay elapsed.
    Fire {
        token: ScheduleToken,
        kind: ScheduledKind,
    },
    /// Stop the worker loop.
    Shutdown,
}

/// Background task that processes gameplay commands.
pub(crate) struct SimulationWorker {
    state: BattleState,
    config: BattleConfig,
    tables: BalanceTables,
    rng: Box<dyn RngOracle>,
    provider: Arc<dyn EnemyProvider>,
    scheduler: TurnScheduler,
    command_rx: mpsc::Receiver<Command>,
    events: EventBus,
}

impl SimulationWorker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        state: BattleState,
        config: BattleConfig,
        tables: BalanceTables,
        rng: Box<dyn RngOracle>,
        provider: Arc<dyn EnemyProvider>,
        scheduler: TurnScheduler,
        command_rx: mpsc::Receiver<Command>,
        events: EventBus,
    ) -> Self {
        Self {
            state,
            config,
            tables,
            rng,
            provider,
            scheduler,
            command_rx,
            events,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        info!(
            target: "runtime::worker",
            seed = self.state.seed,
            level = self.state.progression.level,
            "session started"
        );
        self.publish_session_started();

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                Command::Execute { action, reply } => {
                    let result = self.execute_action(action);
                    let _ = reply.send(result);
                }
                Command::Query { reply } => {
                    let _ = reply.send(self.state.clone());
                }
                Command::Reset { seed, reply } => {
                    self.reset(seed);
                    let _ = reply.send(Ok(()));
                }
                Command::Fire { token, kind } => {
                    self.handle_fire(token, kind).await;
                }
                Command::Shutdown => break,
            }
        }
    }

    /// Executes an action against a cloned state and commits on success,
    /// so a mid-apply failure can never leave a half-mutated battle.
    fn execute_action(&mut self, action: Action) -> Result<()> {
        let env = BattleEnv::new(self.rng.as_ref(), &self.tables);
        let mut staged = self.state.clone();

        match BattleEngine::new(&mut staged).execute(env, &action) {
            Ok(outcome) => {
                self.state = staged;
                self.publish_outcome(action, outcome);
                Ok(())
            }
            Err(error) => self.handle_execute_error(action, &error),
        }
    }

    /// Classifies an execution failure. Phase gates and pre-validate
    /// failures are ordinary player rejections; anything deeper in the
    /// pipeline is an engine fault and surfaces as an error to the caller.
    fn handle_execute_error(&self, action: Action, error: &ExecuteError) -> Result<()> {
        let rejection = matches!(
            transition_phase(error),
            None | Some(TransitionPhase::PreValidate)
        );

        self.events.publish(BattleEvent::ActionRejected {
            action,
            reason: error.to_string(),
        });

        if rejection {
            debug!(
                target: "runtime::worker",
                action = ?action,
                error = %error,
                "action rejected"
            );
            Ok(())
        } else {
            error!(
                target: "runtime::worker",
                action = ?action,
                error = %error,
                "action execution failed"
            );
            Err(RuntimeError::EngineFailure(error.to_string()))
        }
    }

    /// Publishes everything an executed action produced and schedules the
    /// follow-up the turn report asks for.
    fn publish_outcome(&mut self, action: Action, outcome: ExecutionOutcome) {
        use gauntlet_core::action::ChosenUpgrade;
        use gauntlet_core::engine::ActionReport;

        self.events.publish(BattleEvent::ActionResolved {
            action,
            report: outcome.report,
        });

        match outcome.report {
            ActionReport::OfferPresented { offer } => {
                self.events.publish(BattleEvent::UpgradesOffered { offer });
            }
            ActionReport::StatChosen { upgrade } => {
                self.events.publish(BattleEvent::UpgradeChosen {
                    choice: ChosenUpgrade::Stat(upgrade),
                });
            }
            ActionReport::PassiveChosen { passive } => {
                self.events.publish(BattleEvent::UpgradeChosen {
                    choice: ChosenUpgrade::Passive(passive),
                });
            }
            ActionReport::LevelAdvanced { level } => {
                info!(target: "runtime::worker", level, "level started");
                self.events.publish(BattleEvent::LevelStarted { level });
            }
            _ => {}
        }

        let Some(turn) = outcome.turn else {
            return;
        };

        self.events.publish(BattleEvent::TurnPassed {
            phase: turn.phase,
            round: turn.round,
        });

        match turn.phase {
            TurnPhase::EnemyTurn => {
                self.scheduler.schedule(if turn.enemy_stunned {
                    ScheduledKind::StunSkip
                } else {
                    ScheduledKind::EnemyAction
                });
            }
            TurnPhase::LevelTransition => {
                let level = self.state.progression.level;
                info!(target: "runtime::worker", level, "enemy defeated");
                self.events.publish(BattleEvent::Victory { level });
                self.scheduler.schedule(ScheduledKind::LevelUp);
            }
            TurnPhase::GameOver => {
                let level = self.state.progression.level;
                info!(target: "runtime::worker", level, "player defeated");
                self.events.publish(BattleEvent::Defeat { level });
            }
            TurnPhase::PlayerTurn => {}
        }
    }

    async fn handle_fire(&mut self, token: ScheduleToken, kind: ScheduledKind) {
        if !self.scheduler.is_current(token) {
            debug!(
                target: "runtime::scheduler",
                ?kind,
                epoch = token.epoch,
                "dropping stale scheduled command"
            );
            return;
        }

        let action = match kind {
            ScheduledKind::EnemyAction => self.provider.decide(&self.state).await,
            ScheduledKind::StunSkip => Action::skip_turn(),
            ScheduledKind::LevelUp => Action::present_upgrades(),
        };

        let _ = self.execute_action(action);
    }

    fn reset(&mut self, seed: Option<u64>) {
        self.scheduler.cancel_all();

        let seed = seed.unwrap_or_else(|| next_session_seed(self.state.seed));
        self.state = BattleState::new(&self.config, &self.tables, seed);

        info!(target: "runtime::worker", seed, "session reset");
        self.publish_session_started();
    }

    fn publish_session_started(&self) {
        self.events.publish(BattleEvent::SessionStarted {
            seed: self.state.seed,
            level: self.state.progression.level,
        });
    }
}

/// The phase an execution error failed in, when it came from the
/// transition pipeline. Phase-gate rejections carry no phase.
fn transition_phase(error: &ExecuteError) -> Option<TransitionPhase> {
    match error {
        ExecuteError::Attack(e) => Some(e.phase),
        ExecuteError::Defend(e) => Some(e.phase),
        ExecuteError::UseSkill(e) => Some(e.phase),
        ExecuteError::SkipTurn(e) => Some(e.phase),
        ExecuteError::PresentUpgrades(e) => Some(e.phase),
        ExecuteError::ChooseUpgrade(e) => Some(e.phase),
        ExecuteError::AdvanceLevel(e) => Some(e.phase),
        ExecuteError::BattleOver
        | ExecuteError::BetweenLevels
        | ExecuteError::OutOfTurn { .. } => None,
    }
}

/// Derives the next session's seed from the previous one.
///
/// SplitMix64 step, so back-to-back restarts walk a well-distributed
/// sequence while staying reproducible from the first seed.
fn next_session_seed(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}
