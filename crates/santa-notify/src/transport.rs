//! Message transports.
//!
//! A transport authenticates once as the sender and then accepts messages
//! one at a time. Each `send` is independent and blocking. Endpoints and
//! credentials are always injected by the caller.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use santa_core::SenderIdentity;

use crate::{error::NotifyError, message::Message};

/// Secret used to authenticate the sender.
///
/// # Security
///
/// - **Debug Redaction**: The `Debug` impl never prints the secret.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    secret: Option<String>,
}

impl Credential {
    /// Wrap a secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: Some(secret.into()) }
    }

    /// No credential; accepted only by transports that need none.
    pub fn none() -> Self {
        Self { secret: None }
    }

    /// The secret, for transports that must present it.
    pub fn expose(&self) -> Option<&str> {
        self.secret.as_deref()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Credential")
            .field(&self.secret.as_ref().map(|s| format!("<redacted {} bytes>", s.len())))
            .finish()
    }
}

/// Something that can deliver messages.
pub trait Transport {
    /// Authenticate as `sender`. Called once before any `send`.
    fn authenticate(
        &mut self,
        sender: &SenderIdentity,
        credential: &Credential,
    ) -> Result<(), NotifyError>;

    /// Deliver one message.
    fn send(&mut self, message: &Message) -> Result<(), NotifyError>;
}

/// In-memory transport that records every delivered message.
///
/// Used for dry runs and tests. It can be told to reject particular
/// recipients or to require a specific credential.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    sent: Vec<Message>,
    reject: HashSet<String>,
    required_secret: Option<String>,
    authenticated: bool,
}

impl MemoryTransport {
    /// Create a transport that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every message addressed to `recipient`.
    #[must_use]
    pub fn rejecting(mut self, recipient: impl Into<String>) -> Self {
        self.reject.insert(recipient.into());
        self
    }

    /// Only authenticate senders presenting `secret`.
    #[must_use]
    pub fn requiring_secret(mut self, secret: impl Into<String>) -> Self {
        self.required_secret = Some(secret.into());
        self
    }

    /// Messages delivered so far, in order.
    pub fn sent(&self) -> &[Message] {
        &self.sent
    }
}

impl Transport for MemoryTransport {
    fn authenticate(
        &mut self,
        sender: &SenderIdentity,
        credential: &Credential,
    ) -> Result<(), NotifyError> {
        if let Some(required) = &self.required_secret {
            if credential.expose() != Some(required.as_str()) {
                return Err(NotifyError::Auth {
                    sender: sender.email.clone(),
                    reason: "credential rejected".to_string(),
                });
            }
        }
        self.authenticated = true;
        Ok(())
    }

    fn send(&mut self, message: &Message) -> Result<(), NotifyError> {
        if !self.authenticated {
            return Err(NotifyError::Rejected {
                recipient: message.to.clone(),
                reason: "not authenticated".to_string(),
            });
        }
        if self.reject.contains(&message.to) {
            return Err(NotifyError::Rejected {
                recipient: message.to.clone(),
                reason: "recipient refused".to_string(),
            });
        }
        self.sent.push(message.clone());
        Ok(())
    }
}

/// Transport that writes each message to a file in a directory.
///
/// Files are named `NNN-<recipient>.eml` in send order and contain the
/// headers, a blank line, then the HTML body.
#[derive(Debug)]
pub struct OutboxTransport {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl OutboxTransport {
    /// Write messages into `dir`, created on authentication if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), written: Vec::new() }
    }

    /// Outbox directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn file_name(&self, recipient: &str) -> String {
        let safe: String = recipient
            .chars()
            .map(|c| match c {
                c if c.is_ascii_alphanumeric() => c,
                '.' | '-' | '_' | '@' => c,
                _ => '_',
            })
            .collect();
        format!("{:03}-{safe}.eml", self.written.len() + 1)
    }
}

impl Transport for OutboxTransport {
    fn authenticate(
        &mut self,
        _sender: &SenderIdentity,
        _credential: &Credential,
    ) -> Result<(), NotifyError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|source| NotifyError::Io { path: self.dir.clone(), source })
    }

    fn send(&mut self, message: &Message) -> Result<(), NotifyError> {
        let path = self.dir.join(self.file_name(&message.to));
        let contents = format!(
            "From: {}\nTo: {}\nSubject: {}\nContent-Type: text/html; charset=utf-8\n\n{}",
            header_value(&message.from),
            header_value(&message.to),
            header_value(&message.subject),
            message.html
        );

        std::fs::write(&path, contents)
            .map_err(|source| NotifyError::Io { path: path.clone(), source })?;
        tracing::debug!(path = %path.display(), "message written to outbox");
        self.written.push(path);
        Ok(())
    }
}

/// Fold line breaks so a value can never start a header of its own.
fn header_value(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}
