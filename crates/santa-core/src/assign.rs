//! Assigner
//!
//! Turns a validated roster into a complete assignment.
//!
//! ## Algorithm
//!
//! 1. Greedy pass: participants in roster order draw uniform indices into
//!    the roster until the candidate is unclaimed and allowed. Each
//!    participant gets at most `max_draws_per_participant` draws. A
//!    participant with no allowed unclaimed candidate left ends the pass
//!    immediately.
//! 2. A failed pass starts over with an empty claimed set, up to
//!    `max_passes` times. The generator is not reset, so retries stay
//!    deterministic for a given seed.
//! 3. If every pass fails and `fallback_to_matching` is set, a randomized
//!    bipartite matching builds the assignment constructively. It fails only
//!    when no assignment exists.
//!
//! Never returns a partial assignment. The roster is only read; the claimed
//! set is local to each pass.

use crate::{
    assignment::{AssignStats, Assignment, Pairing},
    env::{Environment, SeededEnv},
    error::AssignError,
    matching,
    roster::Roster,
};

/// Tuning knobs for the assigner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignConfig {
    /// Retry ceiling: draws allowed per participant in one pass.
    pub max_draws_per_participant: u32,
    /// Greedy passes before giving up or falling back.
    pub max_passes: u32,
    /// Whether a participant may be assigned to themselves.
    pub allow_self_assignment: bool,
    /// Run the constructive matching after every pass failed.
    pub fallback_to_matching: bool,
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            max_draws_per_participant: 1000,
            max_passes: 64,
            allow_self_assignment: false,
            fallback_to_matching: true,
        }
    }
}

impl AssignConfig {
    fn validate(&self) -> Result<(), AssignError> {
        if self.fallback_to_matching {
            return Ok(());
        }
        if self.max_passes == 0 {
            return Err(AssignError::InvalidConfig {
                reason: "max_passes is 0 and matching fallback is disabled".to_string(),
            });
        }
        if self.max_draws_per_participant == 0 {
            return Err(AssignError::InvalidConfig {
                reason: "max_draws_per_participant is 0 and matching fallback is disabled"
                    .to_string(),
            });
        }
        Ok(())
    }
}

/// Precomputed giver/target compatibility, by roster index.
#[derive(Debug, Clone)]
pub(crate) struct Constraints {
    n: usize,
    allowed: Vec<bool>,
}

impl Constraints {
    pub(crate) fn new(roster: &Roster, allow_self_assignment: bool) -> Self {
        let people = roster.participants();
        let n = people.len();
        let mut allowed = Vec::with_capacity(n * n);
        for (g, giver) in people.iter().enumerate() {
            for (t, target) in people.iter().enumerate() {
                let is_self = g == t;
                allowed.push((allow_self_assignment || !is_self) && !giver.excludes(&target.name));
            }
        }
        Self { n, allowed }
    }

    pub(crate) fn len(&self) -> usize {
        self.n
    }

    pub(crate) fn allows(&self, giver: usize, target: usize) -> bool {
        self.allowed[giver * self.n + target]
    }
}

/// Why a greedy pass stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stuck {
    /// Every allowed target was already claimed.
    DeadEnd { giver: usize },
    /// Retry ceiling reached while allowed targets remained.
    CeilingExceeded { giver: usize },
}

impl Stuck {
    fn giver(self) -> usize {
        match self {
            Self::DeadEnd { giver } | Self::CeilingExceeded { giver } => giver,
        }
    }
}

/// Assign every participant a target using the given environment.
///
/// # Errors
///
/// Returns `AssignError::InvalidConfig` if the configuration cannot produce
/// any assignment, and `AssignError::UnsatisfiableConstraints` naming the
/// participant that could not be placed.
pub fn assign<E: Environment>(
    roster: &Roster,
    env: &E,
    config: &AssignConfig,
) -> Result<Assignment, AssignError> {
    config.validate()?;

    let constraints = Constraints::new(roster, config.allow_self_assignment);
    let mut stats = AssignStats::default();
    let mut last_stuck = None;

    for pass in 1..=config.max_passes {
        stats.passes = pass;
        match greedy_pass(&constraints, env, config.max_draws_per_participant, &mut stats.draws) {
            Ok(targets) => {
                tracing::info!(
                    participants = roster.len(),
                    passes = stats.passes,
                    draws = stats.draws,
                    "assignment complete"
                );
                return Ok(build(roster, &targets, stats));
            },
            Err(stuck) => {
                tracing::debug!(
                    pass,
                    participant = %roster.participants()[stuck.giver()].name,
                    ?stuck,
                    "greedy pass failed"
                );
                last_stuck = Some(stuck);
            },
        }
    }

    if config.fallback_to_matching {
        tracing::warn!(passes = stats.passes, "greedy passes exhausted, falling back to matching");
        return match matching::perfect_matching(&constraints, env) {
            Ok(targets) => {
                stats.used_matching = true;
                tracing::info!(
                    participants = roster.len(),
                    passes = stats.passes,
                    draws = stats.draws,
                    "assignment complete via matching"
                );
                Ok(build(roster, &targets, stats))
            },
            Err(giver) => Err(AssignError::UnsatisfiableConstraints {
                participant: roster.participants()[giver].name.clone(),
                attempts: stats.passes + 1,
                exhaustive: true,
            }),
        };
    }

    // validate() guarantees at least one pass ran without the fallback
    let giver = last_stuck.map_or(0, Stuck::giver);
    Err(AssignError::UnsatisfiableConstraints {
        participant: roster.participants()[giver].name.clone(),
        attempts: stats.passes,
        exhaustive: false,
    })
}

/// Assign with a caller-supplied seed, or a fresh OS entropy seed.
///
/// The same roster, configuration and seed always produce the same
/// assignment. Unseeded runs log the drawn seed so they can be replayed.
pub fn assign_with_seed(
    roster: &Roster,
    seed: Option<u64>,
    config: &AssignConfig,
) -> Result<Assignment, AssignError> {
    let env = match seed {
        Some(seed) => SeededEnv::new(seed),
        None => {
            let env = SeededEnv::from_entropy()?;
            tracing::info!(seed = env.seed(), "no seed supplied, drew one from OS entropy");
            env
        },
    };
    assign(roster, &env, config)
}

/// One sweep over the roster in order.
fn greedy_pass<E: Environment>(
    constraints: &Constraints,
    env: &E,
    max_draws: u32,
    draws: &mut u64,
) -> Result<Vec<usize>, Stuck> {
    let n = constraints.len();
    let mut claimed = vec![false; n];
    let mut targets = Vec::with_capacity(n);

    for giver in 0..n {
        let reachable = (0..n).any(|t| !claimed[t] && constraints.allows(giver, t));
        if !reachable {
            return Err(Stuck::DeadEnd { giver });
        }

        let mut placed = None;
        for _ in 0..max_draws {
            *draws += 1;
            let candidate = env.random_index(n);
            if !claimed[candidate] && constraints.allows(giver, candidate) {
                placed = Some(candidate);
                break;
            }
        }

        let Some(target) = placed else {
            return Err(Stuck::CeilingExceeded { giver });
        };
        claimed[target] = true;
        targets.push(target);
    }

    Ok(targets)
}

fn build(roster: &Roster, targets: &[usize], stats: AssignStats) -> Assignment {
    let people = roster.participants();
    let pairings = people
        .iter()
        .zip(targets)
        .map(|(giver, &target)| Pairing {
            giver: giver.name.clone(),
            target: people[target].name.clone(),
        })
        .collect();
    Assignment::new(pairings, stats)
}
