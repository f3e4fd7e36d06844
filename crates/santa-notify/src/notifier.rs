//! Delivery orchestration and reporting.
//!
//! The notifier only ever borrows the assignment, so a failed delivery can
//! never alter it. Every participant ends up with an explicit outcome; a run
//! is delivered only if every outcome is `Delivered`.

use santa_core::{Assignment, RunConfig};

use crate::{
    message::compose,
    transport::{Credential, Transport},
};

/// Policy for handling send failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryPolicy {
    /// Log the failure and continue with the next participant.
    #[default]
    BestEffort,

    /// Stop at the first failure; everyone after it is skipped.
    AbortOnFirstFailure,
}

/// What happened to one participant's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Transport accepted the message.
    Delivered,
    /// Composition or transport failed.
    Failed {
        /// Error description.
        reason: String,
    },
    /// Not attempted because an earlier failure aborted the run.
    Skipped,
}

/// Outcome for one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryEntry {
    /// Participant name.
    pub participant: String,
    /// Address the message was for.
    pub email: String,
    /// Result.
    pub outcome: DeliveryOutcome,
}

/// Per-participant delivery results, in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeliveryReport {
    entries: Vec<DeliveryEntry>,
}

impl DeliveryReport {
    /// All entries in roster order.
    pub fn entries(&self) -> &[DeliveryEntry] {
        &self.entries
    }

    /// True only if every participant's message was delivered.
    pub fn all_delivered(&self) -> bool {
        self.entries.iter().all(|e| e.outcome == DeliveryOutcome::Delivered)
    }

    /// Number of delivered messages.
    pub fn delivered_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome == DeliveryOutcome::Delivered).count()
    }

    /// Entries that failed or were skipped.
    pub fn failures(&self) -> impl Iterator<Item = &DeliveryEntry> {
        self.entries.iter().filter(|e| e.outcome != DeliveryOutcome::Delivered)
    }
}

/// Sends each participant their assignment through a transport.
#[derive(Debug)]
pub struct Notifier<T: Transport> {
    transport: T,
    credential: Credential,
    policy: DeliveryPolicy,
}

impl<T: Transport> Notifier<T> {
    /// Create a notifier with the default best-effort policy.
    pub fn new(transport: T, credential: Credential) -> Self {
        Self { transport, credential, policy: DeliveryPolicy::default() }
    }

    /// Use a different failure policy.
    #[must_use]
    pub fn with_policy(mut self, policy: DeliveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the notifier and return the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Authenticate once, then send one message per participant in roster
    /// order.
    ///
    /// If authentication fails, every participant is reported `Failed` and
    /// nothing is sent.
    pub fn notify(&mut self, config: &RunConfig, assignment: &Assignment) -> DeliveryReport {
        let roster = config.roster();
        let mut entries = Vec::with_capacity(roster.len());

        if let Err(e) = self.transport.authenticate(config.sender(), &self.credential) {
            tracing::error!("authentication failed: {}", e);
            let reason = e.to_string();
            entries.extend(roster.iter().map(|p| DeliveryEntry {
                participant: p.name.clone(),
                email: p.email.clone(),
                outcome: DeliveryOutcome::Failed { reason: reason.clone() },
            }));
            return DeliveryReport { entries };
        }

        let mut aborted = false;
        for participant in roster {
            let outcome = if aborted {
                DeliveryOutcome::Skipped
            } else {
                let sent = compose(config, assignment, participant)
                    .and_then(|message| self.transport.send(&message));
                match sent {
                    Ok(()) => {
                        tracing::info!(recipient = %participant.email, "assignment delivered");
                        DeliveryOutcome::Delivered
                    },
                    Err(e) => {
                        tracing::warn!(recipient = %participant.email, "delivery failed: {}", e);
                        aborted = self.policy == DeliveryPolicy::AbortOnFirstFailure;
                        DeliveryOutcome::Failed { reason: e.to_string() }
                    },
                }
            };

            entries.push(DeliveryEntry {
                participant: participant.name.clone(),
                email: participant.email.clone(),
                outcome,
            });
        }

        DeliveryReport { entries }
    }
}
