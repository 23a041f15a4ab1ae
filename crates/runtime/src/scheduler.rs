//! Delayed-command scheduler with epoch-based cancellation.
//!
//! The battle paces itself with fixed delays: the enemy acts about a
//! second after the player, stun skips take the same beat, and the
//! upgrade draft opens after a short pause. Each delay is a spawned sleep
//! that sends a [`Command::Fire`] back into the worker queue, stamped with
//! the scheduler's current epoch. A reset bumps the epoch, so a timer that
//! was already in flight when the battle was rebuilt arrives stale and is
//! dropped instead of acting on the new state.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::runtime::Timings;
use crate::worker::Command;

/// What a scheduled delay does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScheduledKind {
    /// Ask the enemy provider for its action.
    EnemyAction,
    /// Skip the stunned enemy's turn.
    StunSkip,
    /// Draw and present the upgrade offer.
    LevelUp,
}

/// Identifies one scheduled command and the epoch it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ScheduleToken {
    pub epoch: u64,
    pub seq: u64,
}

/// Worker-owned queue of pending delayed commands.
pub(crate) struct TurnScheduler {
    command_tx: mpsc::Sender<Command>,
    timings: Timings,
    epoch: u64,
    seq: u64,
    tasks: Vec<JoinHandle<()>>,
}

impl TurnScheduler {
    pub fn new(command_tx: mpsc::Sender<Command>, timings: Timings) -> Self {
        Self {
            command_tx,
            timings,
            epoch: 0,
            seq: 0,
            tasks: Vec::new(),
        }
    }

    /// Schedules a command to fire after its configured delay.
    pub fn schedule(&mut self, kind: ScheduledKind) {
        self.seq += 1;
        let token = ScheduleToken {
            epoch: self.epoch,
            seq: self.seq,
        };
        let delay = match kind {
            ScheduledKind::EnemyAction => self.timings.enemy_action,
            ScheduledKind::StunSkip => self.timings.stun_skip,
            ScheduledKind::LevelUp => self.timings.level_up,
        };

        debug!(
            target: "runtime::scheduler",
            ?kind,
            ?delay,
            epoch = token.epoch,
            seq = token.seq,
            "scheduling delayed command"
        );

        self.tasks.retain(|task| !task.is_finished());
        let command_tx = self.command_tx.clone();
        self.tasks.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = command_tx.send(Command::Fire { token, kind }).await;
        }));
    }

    /// Whether a fired token belongs to the current epoch.
    pub fn is_current(&self, token: ScheduleToken) -> bool {
        token.epoch == self.epoch
    }

    /// Invalidates every pending command, aborting live sleeps.
    ///
    /// A command that already left its sleep and sits in the queue is
    /// caught by the epoch check instead.
    pub fn cancel_all(&mut self) {
        self.epoch += 1;
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}
