//! Runner error types.

use std::fmt;

use santa_core::{AssignError, ConfigError};

/// Errors that end a run.
#[derive(Debug)]
pub enum RunError {
    /// Config file could not be loaded
    Config(ConfigError),

    /// No valid assignment
    Assign(AssignError),

    /// Some participants were not notified
    Delivery {
        /// Participants whose message was not delivered
        undelivered: Vec<String>,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {}", err),
            Self::Assign(err) => write!(f, "assignment error: {}", err),
            Self::Delivery { undelivered } => {
                write!(f, "delivery incomplete, not notified: {}", undelivered.join(", "))
            },
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Assign(err) => Some(err),
            Self::Delivery { .. } => None,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<AssignError> for RunError {
    fn from(err: AssignError) -> Self {
        Self::Assign(err)
    }
}
