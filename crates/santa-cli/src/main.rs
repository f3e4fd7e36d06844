//! Secret Santa binary.
//!
//! # Usage
//!
//! ```bash
//! # Dry run: assign and compose, send nothing
//! secret-santa --config people.json
//!
//! # Reproducible run, messages written to a directory
//! secret-santa --config people.json --seed 2026 --outbox outbox/
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use santa_cli::{RunnerConfig, run};
use santa_core::AssignConfig;
use santa_notify::{Credential, DeliveryPolicy};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// What to do when one message fails
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    /// Keep sending to everyone else
    BestEffort,
    /// Stop at the first failure
    Abort,
}

impl From<Policy> for DeliveryPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::BestEffort => Self::BestEffort,
            Policy::Abort => Self::AbortOnFirstFailure,
        }
    }
}

/// Secret Santa assignment and notification
#[derive(Parser, Debug)]
#[command(name = "secret-santa")]
#[command(about = "Draw Secret Santa targets and notify every participant")]
#[command(version)]
struct Args {
    /// Path to the roster file (JSON)
    #[arg(short, long, default_value = "people.json")]
    config: PathBuf,

    /// Seed for reproducible draws (OS entropy when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum random draws per participant in one pass
    #[arg(long, default_value = "1000")]
    max_draws: u32,

    /// Maximum greedy passes before falling back
    #[arg(long, default_value = "64")]
    max_passes: u32,

    /// Allow a participant to draw themselves
    #[arg(long)]
    allow_self: bool,

    /// Fail instead of using the constructive matching fallback
    #[arg(long)]
    no_fallback: bool,

    /// Write messages into this directory instead of a dry run
    #[arg(short, long)]
    outbox: Option<PathBuf>,

    /// Failure policy for deliveries
    #[arg(long, value_enum, default_value = "best-effort")]
    policy: Policy,

    /// Sender credential for the transport
    #[arg(long, env = "SANTA_SENDER_CREDENTIAL", hide_env_values = true)]
    credential: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let runner = RunnerConfig {
        config_path: args.config,
        seed: args.seed,
        assign: AssignConfig {
            max_draws_per_participant: args.max_draws,
            max_passes: args.max_passes,
            allow_self_assignment: args.allow_self,
            fallback_to_matching: !args.no_fallback,
        },
        outbox: args.outbox,
        policy: args.policy.into(),
        credential: args.credential.map_or_else(Credential::none, Credential::new),
    };

    run(&runner)?;

    Ok(())
}
