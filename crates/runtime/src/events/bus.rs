//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, broadcast};

use super::types::BattleEvent;

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Action resolutions and rejections.
    Combat,
    /// Turn ownership changes.
    Turn,
    /// Session lifecycle, victory/defeat, and the upgrade draft.
    Progression,
}

impl Topic {
    /// All topics, for pre-creating channels and bulk subscriptions.
    pub const fn all() -> [Topic; 3] {
        [Topic::Combat, Topic::Turn, Topic::Progression]
    }
}

/// Topic-based event bus.
///
/// Consumers subscribe to specific topics and only receive the events
/// published there. Publishing is best-effort: events to topics without
/// subscribers are dropped silently.
pub struct EventBus {
    channels: Arc<RwLock<HashMap<Topic, broadcast::Sender<BattleEvent>>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic.
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with the given capacity per topic.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut channels = HashMap::new();
        for topic in Topic::all() {
            channels.insert(topic, broadcast::channel(capacity).0);
        }

        Self {
            channels: Arc::new(RwLock::new(channels)),
        }
    }

    /// Publishes an event to its corresponding topic.
    pub fn publish(&self, event: BattleEvent) {
        let topic = event.topic();

        // try_read avoids blocking in async context; publishing is
        // best-effort, so a contended lock just drops the event.
        match self.channels.try_read() {
            Ok(channels) => {
                if let Some(tx) = channels.get(&topic)
                    && tx.send(event).is_err()
                {
                    tracing::trace!("no subscribers for topic {:?}", topic);
                }
            }
            Err(_) => {
                tracing::debug!("failed to acquire event bus lock for topic {:?}", topic);
            }
        }
    }

    /// Subscribes to a specific topic.
    ///
    /// Returns a receiver that only sees events published on that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<BattleEvent> {
        let channels = self
            .channels
            .try_read()
            .expect("failed to acquire read lock on event channels");
        channels
            .get(&topic)
            .expect("topic channel not initialized")
            .subscribe()
    }

    /// Subscribes to multiple topics at once.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<BattleEvent>> {
        let channels = self
            .channels
            .try_read()
            .expect("failed to acquire read lock on event channels");
        topics
            .iter()
            .map(|&topic| {
                let rx = channels
                    .get(&topic)
                    .expect("topic channel not initialized")
                    .subscribe();
                (topic, rx)
            })
            .collect()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
