//! Cloneable facade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides the channel plumbing and offers async helpers
//! for every player-facing command plus event subscriptions.

use tokio::sync::{broadcast, mpsc, oneshot};

use gauntlet_core::{Action, BattleState, Side, SkillKind, UpgradeChoice};

use super::errors::{Result, RuntimeError};
use crate::events::{BattleEvent, EventBus, Topic};
use crate::worker::Command;

/// Client-facing handle to interact with the runtime.
///
/// Gameplay rejections (acting out of turn, insufficient rage, a skill on
/// cooldown) are not errors here: the command helpers reply `Ok(())` and
/// the rejection arrives as a [`BattleEvent::ActionRejected`] on the
/// [`Topic::Combat`] stream. Errors mean the worker itself is gone.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    events: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, events: EventBus) -> Self {
        Self { command_tx, events }
    }

    /// Basic attack against the enemy.
    pub async fn attack(&self) -> Result<()> {
        self.execute(Action::attack(Side::Player)).await
    }

    /// Defensive stance for the next incoming strike.
    pub async fn defend(&self) -> Result<()> {
        self.execute(Action::defend(Side::Player)).await
    }

    /// Spend rage on a skill.
    pub async fn use_skill(&self, skill: SkillKind) -> Result<()> {
        self.execute(Action::use_skill(skill)).await
    }

    /// Take the stat upgrade in the given offer slot.
    pub async fn choose_stat(&self, slot: u8) -> Result<()> {
        self.execute(Action::choose_upgrade(UpgradeChoice::Stat(slot)))
            .await
    }

    /// Take the offered passive.
    pub async fn choose_passive(&self) -> Result<()> {
        self.execute(Action::choose_upgrade(UpgradeChoice::Passive))
            .await
    }

    /// Close the draft and start the next level.
    pub async fn advance_level(&self) -> Result<()> {
        self.execute(Action::advance_level()).await
    }

    /// Execute an arbitrary action for the current turn.
    pub async fn execute(&self, action: Action) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Execute {
                action,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Abandon the current session and start a fresh one.
    ///
    /// Cancels every pending scheduled action; a derived seed keeps the
    /// restart reproducible from the original one.
    pub async fn restart(&self) -> Result<()> {
        self.reset(None).await
    }

    /// Start a fresh session with an explicit seed.
    pub async fn restart_with_seed(&self, seed: u64) -> Result<()> {
        self.reset(Some(seed)).await
    }

    async fn reset(&self, seed: Option<u64>) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Reset {
                seed,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the current battle state (read-only snapshot).
    pub async fn query_state(&self) -> Result<BattleState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Query { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<BattleEvent> {
        self.events.subscribe(topic)
    }

    /// Subscribe to multiple topics at once.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<BattleEvent>> {
        self.events.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage.
    pub fn event_bus(&self) -> &EventBus {
        &self.events
    }

    pub(crate) async fn shutdown(&self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
