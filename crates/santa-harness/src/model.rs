//! Reference model for assignment testing.
//!
//! The model answers two questions by brute force, with no randomness:
//!
//! - Is there any valid assignment for this roster?
//! - Is a given assignment valid for this roster?
//!
//! It enumerates every permutation, so it is only usable for small rosters
//! (see [`MAX_MODEL_SIZE`]). That is enough to serve as an oracle for
//! property tests of the real assigner.

use std::collections::HashMap;

use santa_core::{Assignment, Roster};
use thiserror::Error;

/// Largest roster the model will enumerate (8! = 40320 permutations).
pub const MAX_MODEL_SIZE: usize = 8;

/// A broken assignment invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Assignment size differs from the roster size.
    #[error("assignment has {actual} pairings for {expected} participants")]
    WrongSize {
        /// Roster size.
        expected: usize,
        /// Pairings in the assignment.
        actual: usize,
    },

    /// A roster member has no pairing as a giver.
    #[error("{0} has no target")]
    MissingGiver(String),

    /// A name that is not in the roster appears.
    #[error("{0} is not in the roster")]
    UnknownName(String),

    /// A participant is targeted more than once.
    #[error("{0} is targeted more than once")]
    DuplicateTarget(String),

    /// A giver received someone on their exclusion list.
    #[error("{giver} was assigned excluded target {target}")]
    Excluded {
        /// Giver.
        giver: String,
        /// Excluded target.
        target: String,
    },

    /// A giver received themselves while self-assignment was disallowed.
    #[error("{0} was assigned to themselves")]
    SelfAssigned(String),
}

/// Brute-force oracle over one roster.
#[derive(Debug, Clone)]
pub struct ModelRoster<'a> {
    roster: &'a Roster,
    allow_self_assignment: bool,
}

impl<'a> ModelRoster<'a> {
    /// Wrap a roster with the self-assignment rule the assigner will use.
    pub fn new(roster: &'a Roster, allow_self_assignment: bool) -> Self {
        Self { roster, allow_self_assignment }
    }

    fn allows(&self, giver: usize, target: usize) -> bool {
        let people = self.roster.participants();
        (self.allow_self_assignment || giver != target)
            && !people[giver].excludes(&people[target].name)
    }

    /// Whether at least one valid assignment exists.
    ///
    /// Returns `None` when the roster is larger than [`MAX_MODEL_SIZE`].
    pub fn is_feasible(&self) -> Option<bool> {
        let n = self.roster.len();
        if n > MAX_MODEL_SIZE {
            return None;
        }
        let mut used = vec![false; n];
        Some(self.search(0, &mut used))
    }

    fn search(&self, giver: usize, used: &mut [bool]) -> bool {
        if giver == used.len() {
            return true;
        }
        for target in 0..used.len() {
            if !used[target] && self.allows(giver, target) {
                used[target] = true;
                let found = self.search(giver + 1, used);
                used[target] = false;
                if found {
                    return true;
                }
            }
        }
        false
    }

    /// Count every valid assignment.
    ///
    /// Returns `None` when the roster is larger than [`MAX_MODEL_SIZE`].
    pub fn count_assignments(&self) -> Option<u64> {
        let n = self.roster.len();
        if n > MAX_MODEL_SIZE {
            return None;
        }
        let mut used = vec![false; n];
        Some(self.count(0, &mut used))
    }

    fn count(&self, giver: usize, used: &mut [bool]) -> u64 {
        if giver == used.len() {
            return 1;
        }
        let mut total = 0;
        for target in 0..used.len() {
            if !used[target] && self.allows(giver, target) {
                used[target] = true;
                total += self.count(giver + 1, used);
                used[target] = false;
            }
        }
        total
    }

    /// Check bijectivity, exclusion and the self-assignment rule.
    pub fn check(&self, assignment: &Assignment) -> Result<(), Violation> {
        let people = self.roster.participants();
        if assignment.len() != people.len() {
            return Err(Violation::WrongSize { expected: people.len(), actual: assignment.len() });
        }

        let index: HashMap<&str, usize> =
            people.iter().enumerate().map(|(i, p)| (p.name.as_str(), i)).collect();
        let mut targeted = vec![false; people.len()];

        for participant in people {
            let target = assignment
                .target_of(&participant.name)
                .ok_or_else(|| Violation::MissingGiver(participant.name.clone()))?;
            let &t = index.get(target).ok_or_else(|| Violation::UnknownName(target.to_string()))?;

            if targeted[t] {
                return Err(Violation::DuplicateTarget(target.to_string()));
            }
            targeted[t] = true;

            if participant.excludes(target) {
                return Err(Violation::Excluded {
                    giver: participant.name.clone(),
                    target: target.to_string(),
                });
            }
            if !self.allow_self_assignment && participant.name == target {
                return Err(Violation::SelfAssigned(participant.name.clone()));
            }
        }

        Ok(())
    }
}
