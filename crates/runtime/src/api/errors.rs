//! Unified error types surfaced by the runtime API.
//!
//! Wraps rejected commands, worker coordination failures, and rules errors so
//! clients can bubble them up with consistent context. Collaborator failures
//! are not returned here; they move the session into
//! [`SessionStatus::Error`](crate::SessionStatus::Error) instead.
use thiserror::Error;
use tokio::sync::oneshot;

use quest_core::{GameError, RewardError, ToolError};

use crate::session::SessionStatus;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{command} is not allowed while the session is {status}")]
    InvalidStatus {
        command: &'static str,
        status: SessionStatus,
    },

    #[error("no session is running")]
    NoSession,

    #[error("campaign has no scenarios")]
    EmptyCampaign,

    #[error("invalid runtime configuration: {0}")]
    InvalidConfig(&'static str),

    #[error(transparent)]
    Reward(#[from] RewardError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// Stable identifier for logs and client messages.
    pub fn code(&self) -> &'static str {
        match self {
            RuntimeError::InvalidStatus { .. } => "RUNTIME_INVALID_STATUS",
            RuntimeError::NoSession => "RUNTIME_NO_SESSION",
            RuntimeError::EmptyCampaign => "RUNTIME_EMPTY_CAMPAIGN",
            RuntimeError::InvalidConfig(_) => "RUNTIME_INVALID_CONFIG",
            RuntimeError::Reward(err) => err.error_code(),
            RuntimeError::Tool(err) => err.error_code(),
            RuntimeError::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            RuntimeError::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            RuntimeError::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
        }
    }
}
