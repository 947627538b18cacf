//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, session rules, and command
//! providers so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use battle_core::{SessionError, StartError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("player command provider not set")]
    ProviderNotSet,

    #[error("player command channel closed")]
    PlayerChannelClosed,

    #[error("scripted commands exhausted")]
    ScriptExhausted,

    #[error("battle worker command channel closed")]
    CommandChannelClosed,

    #[error("battle worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("battle worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires an ability catalog before building")]
    MissingCatalog,

    #[error("runtime requires a stage before building")]
    MissingStage,

    #[error("failed to start the battle session")]
    Start(#[source] StartError),

    #[error(transparent)]
    Session(#[from] SessionError),
}
