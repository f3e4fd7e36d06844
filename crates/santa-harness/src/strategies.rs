//! Proptest strategies for rosters.
//!
//! Participants are named `P0`, `P1`, ... in roster order, with addresses
//! `p0@example.com` and so on. Exclusions are drawn as a random giver/target
//! matrix, so densities range from "nobody excludes anyone" to rosters no
//! assignment can satisfy.
//!
//! # Usage
//!
//! ```no_run
//! use proptest::prelude::*;
//! use santa_harness::strategies;
//!
//! proptest! {
//!     #[test]
//!     fn my_property(roster in strategies::arb_roster(2..=6)) {
//!         // test invariant with a randomly generated roster
//!     }
//! }
//! ```

use std::ops::RangeInclusive;

use proptest::{collection::vec, prelude::*};
use santa_core::{Participant, Roster};

/// Name of the participant at roster position `index`.
pub fn participant_name(index: usize) -> String {
    format!("P{index}")
}

/// Build a roster from an exclusion matrix, `excluded[g][t]` meaning
/// participant `g` must not give to participant `t`.
///
/// # Panics
///
/// Panics if `excluded` is empty, since an empty roster is invalid.
#[allow(clippy::expect_used)]
pub fn roster_from_matrix(excluded: &[Vec<bool>]) -> Roster {
    let people = excluded
        .iter()
        .enumerate()
        .map(|(g, row)| {
            let names = row
                .iter()
                .enumerate()
                .filter(|&(_, &ex)| ex)
                .map(|(t, _)| participant_name(t));
            Participant::new(participant_name(g), format!("p{g}@example.com")).excluding(names)
        })
        .collect();

    Roster::new(people).expect("generated names are unique and non-empty")
}

/// Rosters with sizes in `sizes` and sparse exclusions (about one in five
/// pairs excluded), which are usually feasible.
pub fn arb_roster(sizes: RangeInclusive<usize>) -> impl Strategy<Value = Roster> {
    arb_roster_with_density(sizes, 0.2)
}

/// Rosters with dense exclusions (about half of all pairs excluded), which
/// are often infeasible.
pub fn arb_dense_roster(sizes: RangeInclusive<usize>) -> impl Strategy<Value = Roster> {
    arb_roster_with_density(sizes, 0.5)
}

/// Rosters whose exclusion matrix marks each pair with probability
/// `density`.
pub fn arb_roster_with_density(
    sizes: RangeInclusive<usize>,
    density: f64,
) -> impl Strategy<Value = Roster> {
    sizes
        .prop_flat_map(move |n| vec(vec(prop::bool::weighted(density), n), n))
        .prop_map(|matrix| roster_from_matrix(&matrix))
}

/// Rosters that also exclude a few names from outside the roster.
#[allow(clippy::expect_used)]
pub fn arb_roster_with_strangers(sizes: RangeInclusive<usize>) -> impl Strategy<Value = Roster> {
    (arb_roster(sizes), vec("[A-Z][a-z]{2,6}", 0..4)).prop_map(|(roster, strangers)| {
        let people = roster
            .participants()
            .iter()
            .cloned()
            .map(|p| p.excluding(strangers.iter().map(|s| format!("Outsider {s}"))))
            .collect();

        Roster::new(people).expect("adding exclusions keeps the roster valid")
    })
}
