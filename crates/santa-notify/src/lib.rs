//! Secret Santa notifier.
//!
//! Delivers a finished [`santa_core::Assignment`] to every participant: one
//! message each, naming their target and listing the whole group's contact
//! addresses.
//!
//! # Components
//!
//! - [`compose`]: builds the HTML and plain-text message for one participant
//! - [`Transport`]: delivery backend ([`MemoryTransport`], [`OutboxTransport`])
//! - [`Notifier`]: authenticates once, sends in roster order, applies a
//!   [`DeliveryPolicy`], and returns a [`DeliveryReport`]

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod message;
mod notifier;
mod transport;

pub use error::NotifyError;
pub use message::{Message, compose};
pub use notifier::{DeliveryEntry, DeliveryOutcome, DeliveryPolicy, DeliveryReport, Notifier};
pub use transport::{Credential, MemoryTransport, OutboxTransport, Transport};
