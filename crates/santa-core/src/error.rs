//! Assignment error types.

use thiserror::Error;

/// Errors from roster validation and assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    /// Roster was rejected before any random draw.
    #[error("invalid roster: {reason}")]
    InvalidRoster {
        /// Description of the roster problem.
        reason: String,
    },

    /// No participant could be given a target within the configured limits.
    #[error("unsatisfiable constraints: could not place {participant} after {attempts} attempt(s)")]
    UnsatisfiableConstraints {
        /// Name of the participant that could not be placed.
        participant: String,
        /// Number of greedy passes run, plus one if the matching ran.
        attempts: u32,
        /// Whether an exhaustive matching proved no assignment exists.
        exhaustive: bool,
    },

    /// Assigner configuration cannot produce any assignment.
    #[error("invalid assigner configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration problem.
        reason: String,
    },

    /// OS entropy was unavailable for an unseeded run.
    #[error("entropy unavailable: {reason}")]
    Entropy {
        /// Underlying OS error.
        reason: String,
    },
}

impl AssignError {
    /// Returns true if running again with another seed might succeed.
    ///
    /// Only greedy failures without an exhaustive matching qualify. Roster
    /// and configuration errors, and proven infeasibility, are permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::UnsatisfiableConstraints { exhaustive, .. } => !exhaustive,
            Self::Entropy { .. } => true,
            Self::InvalidRoster { .. } | Self::InvalidConfig { .. } => false,
        }
    }

    pub(crate) fn invalid_roster(reason: impl Into<String>) -> Self {
        Self::InvalidRoster { reason: reason.into() }
    }
}
