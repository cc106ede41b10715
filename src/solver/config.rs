//! Solver configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::exact::HELD_KARP_VERTEX_CEILING;

/// Tuning knobs shared by every algorithm.
///
/// Only the fields an algorithm reads matter to it; the rest are ignored.
///
/// # Examples
///
/// ```
/// use u_tsp::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_seed(42)
///     .with_lk_max_depth(8)
///     .with_lk_breadth(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Random seed for the Lin-Kernighan initial tour.
    pub seed: Option<u64>,

    /// Deepest trail position explored by Lin-Kernighan.
    pub lk_max_depth: usize,

    /// Candidate edges tried at each odd trail position.
    pub lk_breadth: usize,

    /// Once an improvement is known, it is committed as soon as the search
    /// backtracks to this depth or shallower.
    pub lk_backtrack_depth: usize,

    /// Maximum number of improvement passes. 0 = no limit.
    pub lk_max_passes: usize,

    /// Largest graph Held-Karp accepts.
    pub held_karp_max_vertices: usize,

    /// Exhaustive solvers log a warning above this many vertices.
    pub exact_vertex_warning: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: None,
            lk_max_depth: 10,
            lk_breadth: 5,
            lk_backtrack_depth: 2,
            lk_max_passes: 0,
            held_karp_max_vertices: 20,
            exact_vertex_warning: 15,
        }
    }
}

impl SolverConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_lk_max_depth(mut self, depth: usize) -> Self {
        self.lk_max_depth = depth;
        self
    }

    pub fn with_lk_breadth(mut self, breadth: usize) -> Self {
        self.lk_breadth = breadth;
        self
    }

    pub fn with_lk_backtrack_depth(mut self, depth: usize) -> Self {
        self.lk_backtrack_depth = depth;
        self
    }

    pub fn with_lk_max_passes(mut self, passes: usize) -> Self {
        self.lk_max_passes = passes;
        self
    }

    pub fn with_held_karp_max_vertices(mut self, n: usize) -> Self {
        self.held_karp_max_vertices = n;
        self
    }

    pub fn with_exact_vertex_warning(mut self, n: usize) -> Self {
        self.exact_vertex_warning = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.lk_max_depth < 3 {
            return Err(Error::InvalidConfig(format!(
                "lk_max_depth must be at least 3, got {}",
                self.lk_max_depth
            )));
        }
        if self.lk_breadth == 0 {
            return Err(Error::InvalidConfig("lk_breadth must be positive".into()));
        }
        if self.lk_backtrack_depth >= self.lk_max_depth {
            return Err(Error::InvalidConfig(format!(
                "lk_backtrack_depth ({}) must be less than lk_max_depth ({})",
                self.lk_backtrack_depth, self.lk_max_depth
            )));
        }
        if !(1..=HELD_KARP_VERTEX_CEILING).contains(&self.held_karp_max_vertices) {
            return Err(Error::InvalidConfig(format!(
                "held_karp_max_vertices must be in 1..={HELD_KARP_VERTEX_CEILING}, got {}",
                self.held_karp_max_vertices
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.lk_max_depth, 10);
        assert_eq!(config.lk_breadth, 5);
        assert_eq!(config.lk_backtrack_depth, 2);
        assert_eq!(config.held_karp_max_vertices, 20);
        assert_eq!(config.exact_vertex_warning, 15);
    }

    #[test]
    fn test_validate_ok() {
        assert!(SolverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_shallow_depth() {
        let config = SolverConfig::default().with_lk_max_depth(2);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_zero_breadth() {
        let config = SolverConfig::default().with_lk_breadth(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_backtrack_depth() {
        let config = SolverConfig::default()
            .with_lk_max_depth(4)
            .with_lk_backtrack_depth(4);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_held_karp_limit() {
        assert!(SolverConfig::default()
            .with_held_karp_max_vertices(0)
            .validate()
            .is_err());
        assert!(SolverConfig::default()
            .with_held_karp_max_vertices(31)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_held_karp_table_size() {
        assert!(SolverConfig::default()
            .with_held_karp_max_vertices(HELD_KARP_VERTEX_CEILING)
            .validate()
            .is_ok());
        let err = SolverConfig::default()
            .with_held_karp_max_vertices(30)
            .validate()
            .expect_err("tables too large");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_serde_defaults_missing_fields() {
        let config: SolverConfig =
            serde_json::from_str(r#"{"seed": 7, "lk_breadth": 3}"#).expect("valid json");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.lk_breadth, 3);
        assert_eq!(config.lk_max_depth, 10);

        let json = serde_json::to_string(&config).expect("serializable");
        let back: SolverConfig = serde_json::from_str(&json).expect("valid json");
        assert_eq!(back, config);
    }
}
