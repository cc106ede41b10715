//! Algorithm selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The algorithms [`TspSolver`](super::TspSolver) can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Exhaustive search, synthesizing geodesic edges on incomplete graphs.
    Backtracking,
    /// Exhaustive search with cost pruning over recorded edges.
    BranchAndBound,
    /// Bitmask dynamic programming.
    HeldKarp,
    /// Greedy walk with geodesic fallback.
    NearestNeighbor,
    /// Greedy walk over recorded edges only.
    RealWorld,
    /// Prim spanning tree walked in preorder.
    MstApproximation,
    /// Random tour improved by variable-depth edge exchange.
    LinKernighan,
}

impl Algorithm {
    /// Every algorithm, exact ones first.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Backtracking,
        Algorithm::BranchAndBound,
        Algorithm::HeldKarp,
        Algorithm::NearestNeighbor,
        Algorithm::RealWorld,
        Algorithm::MstApproximation,
        Algorithm::LinKernighan,
    ];

    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Backtracking => "backtracking",
            Algorithm::BranchAndBound => "branch-and-bound",
            Algorithm::HeldKarp => "held-karp",
            Algorithm::NearestNeighbor => "nearest-neighbor",
            Algorithm::RealWorld => "real-world",
            Algorithm::MstApproximation => "mst",
            Algorithm::LinKernighan => "lin-kernighan",
        }
    }

    /// `true` for algorithms that always return an optimal tour.
    pub fn is_exact(self) -> bool {
        matches!(
            self,
            Algorithm::Backtracking | Algorithm::BranchAndBound | Algorithm::HeldKarp
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Accepts kebab-case or snake_case names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "backtracking" => Ok(Algorithm::Backtracking),
            "branch-and-bound" | "branch-bound" => Ok(Algorithm::BranchAndBound),
            "held-karp" => Ok(Algorithm::HeldKarp),
            "nearest-neighbor" | "nearest-neighbour" => Ok(Algorithm::NearestNeighbor),
            "real-world" => Ok(Algorithm::RealWorld),
            "mst" | "mst-approximation" | "triangular-approximation" => {
                Ok(Algorithm::MstApproximation)
            }
            "lin-kernighan" => Ok(Algorithm::LinKernighan),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}
