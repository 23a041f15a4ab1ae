//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event
//! channels, and exposes a builder-based API for clients to drive the
//! battle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use gauntlet_core::{BalanceTables, BattleConfig, BattleState, PcgRng, RngOracle};

use crate::api::{BasicAttackAi, EnemyProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::scheduler::TurnScheduler;
use crate::worker::{Command, SimulationWorker};

/// Pacing delays for the battle's automatic beats.
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    /// Delay before the enemy's automatic action.
    pub enemy_action: Duration,
    /// Delay before a stunned enemy's turn is skipped.
    pub stun_skip: Duration,
    /// Delay before the upgrade draft opens after a victory.
    pub level_up: Duration,
}

impl Timings {
    /// Zero delays, for tests that drive the battle as fast as possible.
    pub const fn instant() -> Self {
        Self {
            enemy_action: Duration::ZERO,
            stun_skip: Duration::ZERO,
            level_up: Duration::ZERO,
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            enemy_action: Duration::from_millis(1000),
            stun_skip: Duration::from_millis(1000),
            level_up: Duration::from_millis(1500),
        }
    }
}

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    /// Seed for the first session. Restarts derive follow-up seeds.
    pub seed: u64,
    pub timings: Timings,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            seed: 0,
            timings: Timings::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates the battle simulation.
///
/// Design: the runtime owns the worker and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable facade for clients.
pub struct BattleRuntime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl BattleRuntime {
    /// Create a new runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime.
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully.
    pub async fn shutdown(self) -> Result<()> {
        self.handle.shutdown().await?;
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`BattleRuntime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    tables: BalanceTables,
    initial_state: Option<BattleState>,
    rng: Option<Box<dyn RngOracle>>,
    provider: Option<Arc<dyn EnemyProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            tables: BalanceTables::default(),
            initial_state: None,
            rng: None,
            provider: None,
        }
    }

    /// Override runtime configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the seed for the first session.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Override pacing delays.
    pub fn timings(mut self, timings: Timings) -> Self {
        self.config.timings = timings;
        self
    }

    /// Override the balance tables.
    pub fn tables(mut self, tables: BalanceTables) -> Self {
        self.tables = tables;
        self
    }

    /// Provide an initial battle state instead of building a fresh one.
    ///
    /// Mainly for tests and tooling that need a battle in a specific
    /// position.
    pub fn initial_state(mut self, state: BattleState) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Substitute the RNG oracle (default: [`PcgRng`]).
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Substitute the enemy decision provider (default: [`BasicAttackAi`]).
    pub fn enemy_provider(mut self, provider: impl EnemyProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Build the runtime and spawn its worker.
    pub fn build(self) -> BattleRuntime {
        let initial_state = self.initial_state.unwrap_or_else(|| {
            BattleState::new(&self.config.battle, &self.tables, self.config.seed)
        });
        let rng = self.rng.unwrap_or_else(|| Box::new(PcgRng));
        let provider = self.provider.unwrap_or_else(|| Arc::new(BasicAttackAi));

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size);
        let events = EventBus::with_capacity(self.config.event_buffer_size);

        let scheduler = TurnScheduler::new(command_tx.clone(), self.config.timings);
        let handle = RuntimeHandle::new(command_tx, events.clone());

        let worker = SimulationWorker::new(
            initial_state,
            self.config.battle,
            self.tables,
            rng,
            provider,
            scheduler,
            command_rx,
            events,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        BattleRuntime {
            handle,
            worker_handle,
        }
    }
}
