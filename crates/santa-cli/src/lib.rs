//! Secret Santa runner.
//!
//! Wires the pieces together for one run:
//!
//! ```text
//! people.json ─► RunConfig ─► assign(SeededEnv) ─► Assignment
//!             ─► Notifier ─► Transport
//! ```
//!
//! The seed is always logged, so any run (seeded or not) can be replayed
//! with `--seed`. The assignment itself is only logged at `debug`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;

use std::path::PathBuf;

pub use error::RunError;
use santa_core::{AssignConfig, Assignment, RunConfig, SeededEnv, assign, env::resolve_seed};
use santa_notify::{
    Credential, DeliveryPolicy, DeliveryReport, MemoryTransport, Notifier, OutboxTransport,
    Transport,
};

/// Everything a run needs, as resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the JSON roster file
    pub config_path: PathBuf,
    /// Seed for the assignment; drawn from OS entropy when `None`
    pub seed: Option<u64>,
    /// Assigner tuning
    pub assign: AssignConfig,
    /// Directory to write messages into; dry run when `None`
    pub outbox: Option<PathBuf>,
    /// What to do when a send fails
    pub policy: DeliveryPolicy,
    /// Sender credential handed to the transport
    pub credential: Credential,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("people.json"),
            seed: None,
            assign: AssignConfig::default(),
            outbox: None,
            policy: DeliveryPolicy::default(),
            credential: Credential::none(),
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Seed the assignment was drawn with
    pub seed: u64,
    /// The drawn assignment; replaying `seed` reproduces it
    pub assignment: Assignment,
    /// Per-participant delivery results
    pub report: DeliveryReport,
}

/// Load the roster, assign targets, and notify every participant.
///
/// # Errors
///
/// Returns `RunError::Config` or `RunError::Assign` before anything is sent,
/// and `RunError::Delivery` if any participant was not notified.
pub fn run(runner: &RunnerConfig) -> Result<RunSummary, RunError> {
    let config = RunConfig::load(&runner.config_path)?;
    tracing::info!(
        participants = config.roster().len(),
        sender = %config.sender().email,
        "roster loaded"
    );

    let seed = resolve_seed(runner.seed)?;
    tracing::info!(seed, "assigning targets (replay with --seed {})", seed);

    let env = SeededEnv::new(seed);
    let assignment = assign(config.roster(), &env, &runner.assign)?;
    for pairing in assignment.pairings() {
        tracing::debug!(giver = %pairing.giver, target = %pairing.target, "pairing");
    }

    let report = match &runner.outbox {
        Some(dir) => {
            tracing::info!(outbox = %dir.display(), "writing messages to outbox");
            deliver(OutboxTransport::new(dir), runner, &config, &assignment)
        },
        None => {
            tracing::info!("dry run: messages composed but not sent");
            deliver(MemoryTransport::new(), runner, &config, &assignment)
        },
    };

    if !report.all_delivered() {
        let undelivered = report.failures().map(|e| e.participant.clone()).collect();
        return Err(RunError::Delivery { undelivered });
    }

    let stats = assignment.stats();
    tracing::info!(
        delivered = report.delivered_count(),
        passes = stats.passes,
        used_matching = stats.used_matching,
        "all participants notified"
    );
    Ok(RunSummary { seed, assignment, report })
}

fn deliver<T: Transport>(
    transport: T,
    runner: &RunnerConfig,
    config: &RunConfig,
    assignment: &Assignment,
) -> DeliveryReport {
    let mut notifier =
        Notifier::new(transport, runner.credential.clone()).with_policy(runner.policy);
    notifier.notify(config, assignment)
}
