//! Common error infrastructure for quest-core.
//!
//! Domain-specific errors (e.g., `MoveError`, `InteractionError`) are defined
//! next to the operations that raise them. The shared pieces here let hosts
//! classify any of them uniformly.
//!
//! Most rejections are expected during normal play (walking into a tree,
//! pressing interact with nobody around). Hosts that want the reference
//! "silent no-op" behaviour go through [`crate::World::handle`], which logs
//! and discards these errors.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the input was fine but the world said no (blocked tile, no NPC nearby)
/// - **Validation**: the caller asked for something that cannot exist (bad option index)
/// - **Internal**: state inconsistency that indicates a bug
/// - **Fatal**: the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all quest-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Give every variant a stable, upper-snake-case `error_code`
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
