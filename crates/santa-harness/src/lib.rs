//! Test harness for Secret Santa assignment.
//!
//! # Model-Based Testing
//!
//! The `model` module is a brute-force reference that decides feasibility
//! and validates assignments without any randomness. Property tests generate
//! rosters with `strategies`, run the real assigner, and compare its outcome
//! against the model:
//!
//! ```text
//! proptest generates: Roster
//!                        │
//!           ┌────────────┼────────────┐
//!           ▼            ▼            ▼
//!      ModelRoster    assign()     Compare
//!      (oracle)       (seeded)     outcomes
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod strategies;

pub use model::{MAX_MODEL_SIZE, ModelRoster, Violation};
