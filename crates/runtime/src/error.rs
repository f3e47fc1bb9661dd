//! Runtime error types.

use encounter_core::CommandError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors surfaced by the runtime layer.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The encounter task is gone (finished or replaced).
    #[error("no encounter is running")]
    EncounterNotRunning,

    /// The encounter was cancelled before producing a result, usually
    /// because a new encounter was started over it.
    #[error("encounter was cancelled")]
    Cancelled,

    /// The core rejected a command.
    #[error(transparent)]
    Command(#[from] CommandError),
}
