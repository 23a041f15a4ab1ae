//! Unified error types surfaced by the runtime API.
//!
//! These cover worker coordination failures only. Gameplay rejections are
//! not errors at this layer; they surface as
//! [`BattleEvent::ActionRejected`](crate::events::BattleEvent::ActionRejected)
//! on the event bus.
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    /// The engine failed past pre-validation. The staged state was
    /// discarded, so the battle itself is still consistent.
    #[error("engine failure while executing an action: {0}")]
    EngineFailure(String),
}
