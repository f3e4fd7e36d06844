//! Run configuration loaded from a JSON roster file.
//!
//! The file format matches the classic `people.json` layout:
//!
//! ```json
//! {
//!   "sender_email": "santa@example.com",
//!   "people": [
//!     { "name": "Dave", "email": "dave@example.com", "exclude": ["Anna"] }
//!   ]
//! }
//! ```
//!
//! Unknown fields are ignored, so older files carrying per-person `santa` or
//! `santee` bookkeeping still load. Those fields are never read.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    error::AssignError,
    roster::{Participant, Roster},
};

/// Subject used when the file does not provide one.
pub const DEFAULT_SUBJECT: &str = "Secret Santa!";

/// Errors from loading a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON or misses required fields.
    ///
    /// A participant record without a `name` or `email` field lands here
    /// rather than in [`AssignError::InvalidRoster`], since it fails before a
    /// roster exists. Present but blank values are roster errors.
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Sender address is blank.
    #[error("sender_email must not be empty")]
    MissingSender,

    /// A value written into message headers contains a line break.
    #[error("{field} must not contain line breaks")]
    LineBreak {
        /// Which value, e.g. `subject` or `email of Anna`.
        field: String,
    },

    /// Roster failed validation.
    #[error(transparent)]
    Roster(#[from] AssignError),
}

/// Identity messages are sent from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    /// Sending address, also the authenticated origin.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
}

impl SenderIdentity {
    /// Render as a mailbox, `Name <email>` or the bare address.
    pub fn mailbox(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} <{}>", self.email),
            None => self.email.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRunConfig {
    sender_email: String,
    #[serde(default)]
    sender_name: Option<String>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    group_name: Option<String>,
    people: Vec<Participant>,
}

/// Validated configuration for one run. Read-only once loaded.
#[derive(Debug, Clone)]
pub struct RunConfig {
    sender: SenderIdentity,
    subject: Option<String>,
    group_name: Option<String>,
    roster: Roster,
}

impl RunConfig {
    /// Build a configuration directly from its parts.
    pub fn new(sender: SenderIdentity, roster: Roster) -> Result<Self, ConfigError> {
        if sender.email.trim().is_empty() {
            return Err(ConfigError::MissingSender);
        }
        single_line("sender_email", &sender.email)?;
        if let Some(name) = &sender.name {
            single_line("sender_name", name)?;
        }
        for participant in &roster {
            single_line(&format!("email of {}", participant.name), &participant.email)?;
        }
        Ok(Self { sender, subject: None, group_name: None, roster })
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawRunConfig = serde_json::from_str(json)?;
        let roster = Roster::new(raw.people)?;
        let sender = SenderIdentity {
            email: raw.sender_email,
            name: raw.sender_name.filter(|n| !n.trim().is_empty()),
        };

        let mut config = Self::new(sender, roster)?;
        if let Some(subject) = &raw.subject {
            single_line("subject", subject)?;
        }
        config.subject = raw.subject.filter(|s| !s.trim().is_empty());
        config.group_name = raw.group_name.filter(|g| !g.trim().is_empty());
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

        let config = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            participants = config.roster.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Override the message subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the group name shown in message headings.
    #[must_use]
    pub fn with_group_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = Some(group_name.into());
        self
    }

    /// Sender identity.
    pub fn sender(&self) -> &SenderIdentity {
        &self.sender
    }

    /// Message subject, falling back to [`DEFAULT_SUBJECT`].
    pub fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or(DEFAULT_SUBJECT)
    }

    /// Group name, if configured.
    pub fn group_name(&self) -> Option<&str> {
        self.group_name.as_deref()
    }

    /// Validated roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

/// Header values must stay on one line.
fn single_line(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.contains(['\r', '\n']) {
        return Err(ConfigError::LineBreak { field: field.to_string() });
    }
    Ok(())
}
