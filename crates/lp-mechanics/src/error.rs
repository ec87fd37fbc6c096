//! Error types for the lock-picking engine.

/// Errors that can occur while preparing or running a check.
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    /// Even a natural 20 lands in the critical-failure band, so the loop
    /// would never make a single step.
    #[error(
        "no progress possible with {modifier:+} against DC {dc} (even a natural 20 stays a critical failure)"
    )]
    InfeasibleConfiguration {
        /// The total check modifier that was tested.
        modifier: i32,
        /// The difficulty class of the lock.
        dc: i32,
    },

    /// An inline `@Check[...]` tag could not be turned into a check.
    #[error("invalid request check: {0}")]
    InvalidRequestCheckSpec(String),

    /// No actor was selected to make the check.
    #[error("no actor selected: select a token or open a character sheet")]
    MissingActor,

    /// The actor has no modifier for the requested statistic.
    #[error("no modifier available for '{0}'")]
    MissingModifierSource(String),

    /// A lock preset name was not recognised.
    #[error("unknown lock preset: {0}")]
    UnknownPreset(String),

    /// A lock configuration document is malformed.
    #[error("invalid lock configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for lock-picking operations.
pub type LockResult<T> = Result<T, LockError>;
