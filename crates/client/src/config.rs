//! Client configuration loaded from environment variables.

use std::env;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use gauntlet_runtime::Timings;

/// Line-client configuration.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Fixed session seed; when unset, one is drawn from the clock.
    pub seed: Option<u64>,
    pub messages: MessageConfig,
    pub delays: DelayConfig,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GAUNTLET_SEED` - Fixed session seed for reproducible battles
    /// - `GAUNTLET_MESSAGE_CAPACITY` - Message log capacity (default: 100)
    /// - `GAUNTLET_ENEMY_DELAY_MS` - Delay before the enemy acts (default: 1000)
    /// - `GAUNTLET_STUN_DELAY_MS` - Delay before a stun skip (default: 1000)
    /// - `GAUNTLET_LEVEL_DELAY_MS` - Delay before the upgrade draft (default: 1500)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.seed = read_env::<u64>("GAUNTLET_SEED");

        if let Some(capacity) = read_env::<usize>("GAUNTLET_MESSAGE_CAPACITY") {
            config.messages.capacity = capacity.max(1);
        }

        if let Some(ms) = read_env::<u64>("GAUNTLET_ENEMY_DELAY_MS") {
            config.delays.enemy_action_ms = ms;
        }
        if let Some(ms) = read_env::<u64>("GAUNTLET_STUN_DELAY_MS") {
            config.delays.stun_skip_ms = ms;
        }
        if let Some(ms) = read_env::<u64>("GAUNTLET_LEVEL_DELAY_MS") {
            config.delays.level_up_ms = ms;
        }

        config
    }

    /// The seed to start with: the configured one, or one drawn from the
    /// clock so casual sessions differ.
    pub fn session_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default()
        })
    }

    /// Pacing delays as runtime timings.
    pub fn timings(&self) -> Timings {
        Timings {
            enemy_action: Duration::from_millis(self.delays.enemy_action_ms),
            stun_skip: Duration::from_millis(self.delays.stun_skip_ms),
            level_up: Duration::from_millis(self.delays.level_up_ms),
        }
    }
}

/// Message log configuration.
#[derive(Clone, Debug)]
pub struct MessageConfig {
    pub capacity: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}

/// Pacing delay overrides in milliseconds.
#[derive(Clone, Debug)]
pub struct DelayConfig {
    pub enemy_action_ms: u64,
    pub stun_skip_ms: u64,
    pub level_up_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            enemy_action_ms: 1000,
            stun_skip_ms: 1000,
            level_up_ms: 1500,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
