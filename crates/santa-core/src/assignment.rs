//! The completed, validated assignment.

/// One giver and the person they buy for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pairing {
    /// Participant giving the gift.
    pub giver: String,
    /// Participant receiving it.
    pub target: String,
}

/// How the assignment was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssignStats {
    /// Greedy passes run, including the successful one.
    pub passes: u32,
    /// Random draws made across all passes.
    pub draws: u64,
    /// Whether the constructive matching produced the result.
    pub used_matching: bool,
}

/// Mapping from every participant to exactly one target.
///
/// # Invariants
///
/// - Bijectivity: every roster name appears once as a giver and once as a
///   target
/// - Exclusion: no target is in its giver's exclusion set
///
/// Immutable once built; only the assigner constructs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pairings: Vec<Pairing>,
    stats: AssignStats,
}

impl Assignment {
    pub(crate) fn new(pairings: Vec<Pairing>, stats: AssignStats) -> Self {
        Self { pairings, stats }
    }

    /// Pairings in roster order of the giver.
    pub fn pairings(&self) -> &[Pairing] {
        &self.pairings
    }

    /// Target assigned to `giver`, if `giver` is in the roster.
    pub fn target_of(&self, giver: &str) -> Option<&str> {
        self.pairings.iter().find(|p| p.giver == giver).map(|p| p.target.as_str())
    }

    /// Targets in roster order of their givers.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.pairings.iter().map(|p| p.target.as_str())
    }

    /// Number of pairings (equal to the roster size).
    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    /// Always false for an assignment built from a validated roster.
    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }

    /// Statistics about the run that produced this assignment.
    pub fn stats(&self) -> AssignStats {
        self.stats
    }
}
