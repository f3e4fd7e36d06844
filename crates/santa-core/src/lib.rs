//! Secret Santa core.
//!
//! Pure assignment logic for gift exchanges: every participant is given
//! exactly one target from the same roster, no target appears twice, and no
//! participant is given someone on their exclusion list.
//!
//! ## Architecture
//!
//! ```text
//! santa-core
//!   ├─ RunConfig      (JSON roster file, sender identity)
//!   ├─ Roster         (validated, ordered participants)
//!   ├─ Environment    (seeded randomness, SeededEnv)
//!   ├─ assign         (greedy retry passes + matching fallback)
//!   └─ Assignment     (immutable result)
//! ```
//!
//! The crate performs no I/O beyond reading the config file. Delivery of the
//! result lives in `santa-notify`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assign;
mod assignment;
pub mod config;
pub mod env;
mod error;
mod matching;
mod roster;

pub use assign::{AssignConfig, assign, assign_with_seed};
pub use assignment::{AssignStats, Assignment, Pairing};
pub use config::{ConfigError, RunConfig, SenderIdentity};
pub use env::{Environment, SeededEnv};
pub use error::AssignError;
pub use roster::{Participant, Roster};
