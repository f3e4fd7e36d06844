//! Participants and validated rosters.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::AssignError;

/// One member of the group being matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique name within the roster.
    pub name: String,
    /// Contact address shared with the whole group.
    pub email: String,
    /// Names this participant must not be assigned as their target.
    #[serde(default)]
    pub exclude: BTreeSet<String>,
}

impl Participant {
    /// Create a participant with no exclusions.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into(), exclude: BTreeSet::new() }
    }

    /// Add names to the exclusion set.
    #[must_use]
    pub fn excluding<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether `name` is forbidden as this participant's target.
    pub fn excludes(&self, name: &str) -> bool {
        self.exclude.contains(name)
    }
}

/// Ordered, validated collection of participants for one run.
///
/// # Invariants
///
/// - Non-empty
/// - Names are non-blank and unique
/// - Every participant has a non-blank email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Validate and wrap a list of participants, preserving order.
    ///
    /// Exclusions naming people outside the roster are accepted; they can
    /// never match a candidate.
    ///
    /// # Errors
    ///
    /// Returns `AssignError::InvalidRoster` if the list is empty, a name or
    /// email is blank, or two participants share a name.
    pub fn new(participants: Vec<Participant>) -> Result<Self, AssignError> {
        if participants.is_empty() {
            return Err(AssignError::invalid_roster("roster is empty"));
        }

        let mut names = HashSet::with_capacity(participants.len());
        for (position, participant) in participants.iter().enumerate() {
            if participant.name.trim().is_empty() {
                return Err(AssignError::invalid_roster(format!(
                    "participant #{} has no name",
                    position + 1
                )));
            }
            if participant.email.trim().is_empty() {
                return Err(AssignError::invalid_roster(format!(
                    "{} has no email address",
                    participant.name
                )));
            }
            if !names.insert(participant.name.as_str()) {
                return Err(AssignError::invalid_roster(format!(
                    "duplicate participant name: {}",
                    participant.name
                )));
            }
        }

        for participant in &participants {
            for excluded in participant.exclude.iter().filter(|n| !names.contains(n.as_str())) {
                tracing::debug!(
                    participant = %participant.name,
                    excluded = %excluded,
                    "exclusion names someone outside the roster"
                );
            }
        }

        Ok(Self { participants })
    }

    /// Participants in roster order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Iterate participants in roster order.
    pub fn iter(&self) -> std::slice::Iter<'_, Participant> {
        self.participants.iter()
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Always false for a validated roster.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Look up a participant by name.
    pub fn get(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Participant;
    type IntoIter = std::slice::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
