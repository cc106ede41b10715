//! Solver facade: dispatch, timing, and reporting.

use log::{debug, info, warn};

use super::{Algorithm, SolverConfig, Stopwatch};
use crate::constructive::{mst_approximation, nearest_neighbor, real_world};
use crate::error::Result;
use crate::evaluation::TourValidator;
use crate::exact::{backtracking, branch_and_bound, held_karp};
use crate::local_search::lin_kernighan;
use crate::models::{Graph, Tour, TourResult};

/// Runs TSP algorithms over an owned graph.
///
/// The graph may grow between calls: solvers that fall back to geodesic
/// distance add the edges they synthesize, and later runs reuse them.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Graph;
/// use u_tsp::solver::{Algorithm, TspSolver};
///
/// let mut g = Graph::new();
/// for (id, label) in ["A", "B", "C", "D"].iter().enumerate() {
///     g.add_vertex(id, *label, None).unwrap();
/// }
/// for (a, b, d) in [(0, 1, 10.0), (0, 2, 15.0), (0, 3, 20.0),
///                   (1, 2, 35.0), (1, 3, 25.0), (2, 3, 30.0)] {
///     g.add_edge(a, b, d).unwrap();
///     g.add_edge(b, a, d).unwrap();
/// }
///
/// let mut solver = TspSolver::new(g);
/// let result = solver.solve(Algorithm::BranchAndBound, 0).unwrap();
/// assert!((result.distance() - 80.0).abs() < 1e-10);
/// assert_eq!(result.tour().len(), 4);
///
/// let named = solver.solve_named("nearest-neighbor", 0).unwrap();
/// assert!(named.is_solution());
/// ```
#[derive(Debug, Clone)]
pub struct TspSolver {
    graph: Graph,
    config: SolverConfig,
}

impl TspSolver {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            config: SolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Releases the graph, including any edges synthesized along the way.
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Runs `algorithm` from the vertex with external id `start_id`.
    ///
    /// A graph with no Hamiltonian cycle yields an empty result, not an
    /// error.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the
    ///   configuration does not validate.
    /// - [`Error::VertexNotFound`](crate::Error::VertexNotFound) if no vertex
    ///   has id `start_id`.
    /// - [`Error::Semantic`](crate::Error::Semantic) if the graph violates the
    ///   algorithm's preconditions.
    pub fn solve(&mut self, algorithm: Algorithm, start_id: usize) -> Result<TourResult> {
        self.config.validate()?;
        let start = self.graph.resolve_or_err(start_id)?;
        let n = self.graph.num_vertices();

        let exhaustive = matches!(algorithm, Algorithm::Backtracking | Algorithm::BranchAndBound);
        if exhaustive && n > self.config.exact_vertex_warning {
            warn!(
                "{algorithm} on {n} vertices; exhaustive search is practical up to about {}",
                self.config.exact_vertex_warning
            );
        }
        debug!("{algorithm}: start vertex {start_id}, {n} vertices");

        let watch = Stopwatch::start();
        let cycle = match algorithm {
            Algorithm::Backtracking => backtracking(&mut self.graph, start)?,
            Algorithm::BranchAndBound => branch_and_bound(&self.graph, start)?,
            Algorithm::HeldKarp => {
                held_karp(&self.graph, start, self.config.held_karp_max_vertices)?
            }
            Algorithm::NearestNeighbor => nearest_neighbor(&mut self.graph, start)?,
            Algorithm::RealWorld => real_world(&self.graph, start)?,
            Algorithm::MstApproximation => mst_approximation(&mut self.graph, start)?,
            Algorithm::LinKernighan => lin_kernighan(&self.graph, start, &self.config)?,
        };
        let time = watch.elapsed();

        let result = match cycle {
            Some(edges) => {
                let tour = Tour::from_edges(&self.graph, &edges);
                let distance = tour.total_distance();
                TourResult::new(tour, distance, time)
            }
            None => TourResult::no_solution(time),
        };

        if result.is_solution() {
            info!(
                "{algorithm}: distance {:.3} over {} edges in {:.6}s real / {:.6}s cpu",
                result.distance(),
                result.tour().len(),
                time.real,
                time.cpu
            );
        } else {
            info!("{algorithm}: no solution found in {:.6}s", time.real);
        }

        if cfg!(debug_assertions) {
            let violations = TourValidator::new(&self.graph).check_result(&result, start_id);
            if !violations.is_empty() {
                warn!("{algorithm}: tour failed validation: {violations:?}");
            }
        }

        Ok(result)
    }

    /// Like [`solve`](Self::solve), selecting the algorithm by name.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownAlgorithm`](crate::Error::UnknownAlgorithm) for an
    /// unrecognized name, plus everything [`solve`](Self::solve) returns.
    pub fn solve_named(&mut self, name: &str, start_id: usize) -> Result<TourResult> {
        self.solve(name.parse()?, start_id)
    }

    /// Runs `algorithm` from the vertex with id 0.
    pub fn solve_default(&mut self, algorithm: Algorithm) -> Result<TourResult> {
        self.solve(algorithm, 0)
    }
}
