//! Topic-based event system for battle notifications.
//!
//! Everything the simulation worker does is narrated through
//! [`BattleEvent`]s published on the [`EventBus`]. Subscribers pick the
//! [`Topic`]s they care about instead of filtering one firehose.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::BattleEvent;
