//! Constructive fallback: randomized bipartite matching.
//!
//! Givers on one side, targets on the other, an edge wherever the
//! constraints allow the pair. Kuhn's augmenting-path search either finds a
//! perfect matching or stops at a giver for whom no augmenting path exists,
//! which proves (by Hall's theorem) that no assignment exists at all.
//!
//! Candidate lists are shuffled with the run's environment so the fallback
//! still varies with the seed. The result is not uniformly distributed over
//! all valid assignments.

use rand::seq::SliceRandom;

use crate::{
    assign::Constraints,
    env::{EnvRng, Environment},
};

/// Find a target index for every giver, or the index of a giver that cannot
/// be placed by any assignment.
pub(crate) fn perfect_matching<E: Environment>(
    constraints: &Constraints,
    env: &E,
) -> Result<Vec<usize>, usize> {
    let n = constraints.len();
    let mut rng = EnvRng::new(env);

    let candidates: Vec<Vec<usize>> = (0..n)
        .map(|giver| {
            let mut allowed: Vec<usize> =
                (0..n).filter(|&target| constraints.allows(giver, target)).collect();
            allowed.shuffle(&mut rng);
            allowed
        })
        .collect();

    // owner[target] = giver currently matched to it
    let mut owner: Vec<Option<usize>> = vec![None; n];
    for giver in 0..n {
        let mut visited = vec![false; n];
        if !augment(giver, &candidates, &mut owner, &mut visited) {
            return Err(giver);
        }
    }

    let mut targets = vec![0; n];
    for (target, giver) in owner.iter().enumerate() {
        if let Some(giver) = giver {
            targets[*giver] = target;
        }
    }
    Ok(targets)
}

fn augment(
    giver: usize,
    candidates: &[Vec<usize>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &target in &candidates[giver] {
        if visited[target] {
            continue;
        }
        visited[target] = true;

        let free = match owner[target] {
            None => true,
            Some(current) => augment(current, candidates, owner, visited),
        };
        if free {
            owner[target] = Some(giver);
            return true;
        }
    }
    false
}
