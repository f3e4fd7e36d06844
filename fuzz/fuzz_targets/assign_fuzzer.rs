//! Fuzz target for the assigner
//!
//! Ensure arbitrary rosters and budgets always terminate with either a valid
//! assignment or a typed error.
//!
//! # Strategy
//!
//! - Exclusion matrices: arbitrary giver/target bitmaps, including
//!   self-exclusion and fully excluded rows
//! - Budgets: tiny retry ceilings and pass counts, fallback on or off
//! - Seeds: arbitrary `u64`
//!
//! # Invariants
//!
//! - `Ok` assignments are bijective and respect every exclusion
//! - Self-assignment only appears when allowed
//! - Exhaustive failures only happen when no assignment exists
//! - NEVER panic or hang

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use santa_core::{AssignConfig, AssignError, Participant, Roster, assign_with_seed};

/// Rosters stay small enough for an exhaustive cross-check.
const MAX_PEOPLE: usize = 7;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    seed: u64,
    people: u8,
    exclusions: Vec<u8>,
    max_draws: u8,
    max_passes: u8,
    allow_self: bool,
    fallback: bool,
}

fn feasible(excluded: &[Vec<bool>], allow_self: bool, giver: usize, used: &mut [bool]) -> bool {
    if giver == used.len() {
        return true;
    }
    for target in 0..used.len() {
        let allowed = (allow_self || giver != target) && !excluded[giver][target];
        if allowed && !used[target] {
            used[target] = true;
            if feasible(excluded, allow_self, giver + 1, used) {
                return true;
            }
            used[target] = false;
        }
    }
    false
}

fuzz_target!(|input: FuzzInput| {
    let n = usize::from(input.people) % MAX_PEOPLE + 1;

    let excluded: Vec<Vec<bool>> = (0..n)
        .map(|g| {
            let row = input.exclusions.get(g).copied().unwrap_or(0);
            (0..n).map(|t| row & (1 << t) != 0).collect()
        })
        .collect();

    let people = (0..n)
        .map(|g| {
            let names = (0..n).filter(|&t| excluded[g][t]).map(|t| format!("P{t}"));
            Participant::new(format!("P{g}"), format!("p{g}@example.com")).excluding(names)
        })
        .collect();
    let roster = Roster::new(people).expect("generated roster is valid");

    let config = AssignConfig {
        max_draws_per_participant: u32::from(input.max_draws),
        max_passes: u32::from(input.max_passes % 8),
        allow_self_assignment: input.allow_self,
        fallback_to_matching: input.fallback,
    };

    let is_feasible = feasible(&excluded, input.allow_self, 0, &mut vec![false; n]);

    match assign_with_seed(&roster, Some(input.seed), &config) {
        Ok(assignment) => {
            assert!(is_feasible, "assigned an infeasible roster");
            let mut targeted = vec![false; n];
            for (g, pairing) in assignment.pairings().iter().enumerate() {
                let t: usize = pairing.target[1..].parse().expect("generated name");
                assert!(!targeted[t], "target drawn twice");
                targeted[t] = true;
                assert!(!excluded[g][t], "excluded target drawn");
                assert!(input.allow_self || g != t, "self-assignment drawn");
            }
        },
        Err(AssignError::UnsatisfiableConstraints { exhaustive: true, .. }) => {
            assert!(!is_feasible, "matching gave up on a feasible roster");
        },
        Err(AssignError::UnsatisfiableConstraints { exhaustive: false, .. })
        | Err(AssignError::InvalidConfig { .. }) => {},
        Err(other) => panic!("unexpected error: {other}"),
    }
});
