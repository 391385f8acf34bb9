//! Rejections raised by world operations.
//!
//! None of these corrupt state: a rejected input leaves the world exactly as
//! it was.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Position, RewardKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("movement is suspended while a dialogue is open or resolving")]
    Suspended,

    #[error("the session is over")]
    GameOver,

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is blocked")]
    Blocked { destination: Position },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::GameOver => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::Suspended => "MOVE_SUSPENDED",
            MoveError::GameOver => "MOVE_GAME_OVER",
            MoveError::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            MoveError::Blocked { .. } => "MOVE_BLOCKED",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InteractionError {
    #[error("the session is over")]
    GameOver,

    #[error("no NPC is in range")]
    NoCandidate,

    #[error("no dialogue is open")]
    NotInDialogue,

    #[error("no resolution is pending")]
    NotResolving,

    #[error("a resolution is already in progress")]
    Resolving,

    #[error("option {index} does not exist (scenario has {available})")]
    InvalidOption { index: usize, available: usize },
}

impl GameError for InteractionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            InteractionError::NoCandidate | InteractionError::Resolving => {
                ErrorSeverity::Recoverable
            }
            InteractionError::GameOver
            | InteractionError::NotInDialogue
            | InteractionError::NotResolving
            | InteractionError::InvalidOption { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            InteractionError::GameOver => "INTERACT_GAME_OVER",
            InteractionError::NoCandidate => "INTERACT_NO_CANDIDATE",
            InteractionError::NotInDialogue => "INTERACT_NOT_IN_DIALOGUE",
            InteractionError::NotResolving => "INTERACT_NOT_RESOLVING",
            InteractionError::Resolving => "INTERACT_RESOLVING",
            InteractionError::InvalidOption { .. } => "INTERACT_INVALID_OPTION",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    #[error("the session is over")]
    GameOver,

    #[error("tools cannot be used while a dialogue is open or resolving")]
    Suspended,

    #[error("no tool is armed")]
    NoActiveTool,

    #[error("{0} has no area effect")]
    NoEffect(RewardKind),
}

impl GameError for ToolError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ToolError::Suspended | ToolError::NoActiveTool => ErrorSeverity::Recoverable,
            ToolError::GameOver | ToolError::NoEffect(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ToolError::GameOver => "TOOL_GAME_OVER",
            ToolError::Suspended => "TOOL_SUSPENDED",
            ToolError::NoActiveTool => "TOOL_NONE_ARMED",
            ToolError::NoEffect(_) => "TOOL_NO_EFFECT",
        }
    }
}
