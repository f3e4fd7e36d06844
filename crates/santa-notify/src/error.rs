//! Notification error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from composing or delivering messages.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport refused the sender's credential.
    #[error("authentication failed for {sender}: {reason}")]
    Auth {
        /// Sender address that failed to authenticate.
        sender: String,
        /// Description of the failure.
        reason: String,
    },

    /// Transport refused one message.
    #[error("delivery to {recipient} rejected: {reason}")]
    Rejected {
        /// Recipient address.
        recipient: String,
        /// Description of the rejection.
        reason: String,
    },

    /// Writing a message to disk failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Participant has no target in the assignment.
    #[error("{participant} has no assigned target")]
    Unassigned {
        /// Participant name.
        participant: String,
    },
}
