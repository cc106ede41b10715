//! # u-tsp
//!
//! Traveling Salesman Problem engine over directed weighted graphs whose
//! vertices may carry geographic coordinates. Missing edges between
//! coordinate-bearing vertices can be filled in from great-circle distance.
//!
//! ## Modules
//!
//! - [`models`]: Graph model (Vertex, Edge, Graph) and results (Tour, TourResult)
//! - [`lookup`]: Open-addressing id → vertex table
//! - [`distance`]: Haversine distance and dense distance matrix
//! - [`exact`]: Backtracking, branch-and-bound, Held-Karp
//! - [`constructive`]: Nearest-neighbor, real-world walk, MST 2-approximation
//! - [`local_search`]: Lin-Kernighan-style improvement
//! - [`evaluation`]: Tour validation
//! - [`solver`]: Algorithm dispatch, configuration, timing
//! - [`io`]: CSV dataset ingestion
//!
//! ## Example
//!
//! ```
//! use u_tsp::io::parse_edge_list;
//! use u_tsp::solver::{Algorithm, TspSolver};
//!
//! let csv = "0,1,10\n0,2,15\n0,3,20\n1,2,35\n1,3,25\n2,3,30\n";
//! let graph = parse_edge_list(csv, true).unwrap();
//!
//! let mut solver = TspSolver::new(graph);
//! let result = solver.solve(Algorithm::Backtracking, 0).unwrap();
//! assert!((result.distance() - 80.0).abs() < 1e-10);
//! assert_eq!(result.tour().vertex_ids(), vec![0, 1, 3, 2]);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod exact;
pub mod io;
pub mod local_search;
pub mod lookup;
pub mod models;
pub mod solver;
pub mod state;

pub use error::{Error, Result};
pub use solver::{Algorithm, SolverConfig, TspSolver};
