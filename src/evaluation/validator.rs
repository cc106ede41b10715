//! Tour validator that checks cycle structure and recomputes cost.

use crate::models::{Graph, Tour, TourResult};

/// Tolerance for comparing a reported distance with the recomputed one.
const DISTANCE_TOLERANCE: f64 = 1e-6;

/// A defect found in a tour.
#[derive(Debug, Clone, PartialEq)]
pub enum TourViolation {
    /// The tour has no edges.
    Empty,
    /// The tour does not hold one edge per vertex.
    WrongLength {
        /// Number of vertices in the graph.
        expected: usize,
        /// Number of edges in the tour.
        actual: usize,
    },
    /// Edge `position` does not start where the previous edge ended.
    Disconnected {
        /// Index of the offending edge.
        position: usize,
    },
    /// The last edge does not return to the first vertex.
    NotClosed,
    /// A vertex is left more than once.
    RepeatedVertex {
        /// Vertex id.
        id: usize,
    },
    /// A graph vertex is never visited.
    MissingVertex {
        /// Vertex id.
        id: usize,
    },
    /// A tour edge has no counterpart in the graph.
    UnknownEdge {
        /// Origin id.
        origin: usize,
        /// Destination id.
        destination: usize,
    },
    /// The tour starts somewhere other than requested.
    WrongStart {
        /// Requested start id.
        expected: usize,
        /// Actual first vertex id.
        actual: usize,
    },
    /// The reported total differs from the sum of edge weights.
    DistanceMismatch {
        /// Distance stored in the result.
        reported: f64,
        /// Sum of the tour's edges.
        computed: f64,
    },
}

/// Checks tours against the graph they were computed on.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Graph, Tour};
/// use u_tsp::evaluation::TourValidator;
///
/// let mut g = Graph::new();
/// for id in 0..3 {
///     g.add_vertex(id, "", None).unwrap();
/// }
/// let e = [
///     g.add_edge(0, 1, 1.0).unwrap(),
///     g.add_edge(1, 2, 1.0).unwrap(),
///     g.add_edge(2, 0, 1.0).unwrap(),
/// ];
/// let tour = Tour::from_edges(&g, &e);
/// let validator = TourValidator::new(&g);
/// assert!(validator.is_hamiltonian_cycle(&tour));
/// assert!(validator.check(&tour).is_empty());
/// ```
pub struct TourValidator<'a> {
    graph: &'a Graph,
}

impl<'a> TourValidator<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// Returns every structural violation of `tour`.
    pub fn check(&self, tour: &Tour) -> Vec<TourViolation> {
        let mut violations = Vec::new();
        let edges = tour.edges();
        if edges.is_empty() {
            violations.push(TourViolation::Empty);
            return violations;
        }

        let n = self.graph.num_vertices();
        if edges.len() != n {
            violations.push(TourViolation::WrongLength {
                expected: n,
                actual: edges.len(),
            });
        }

        for (position, pair) in edges.windows(2).enumerate() {
            if pair[0].destination != pair[1].origin {
                violations.push(TourViolation::Disconnected {
                    position: position + 1,
                });
            }
        }
        if !tour.is_closed() && edges[edges.len() - 1].destination != edges[0].origin {
            violations.push(TourViolation::NotClosed);
        }

        let mut left = vec![false; n];
        for edge in edges {
            let origin = self.graph.resolve(edge.origin);
            let destination = self.graph.resolve(edge.destination);
            let known = match (origin, destination) {
                (Some(o), Some(d)) => self.graph.find_edge(o, d).is_some(),
                _ => false,
            };
            if !known {
                violations.push(TourViolation::UnknownEdge {
                    origin: edge.origin,
                    destination: edge.destination,
                });
            }
            if let Some(o) = origin {
                if left[o] {
                    violations.push(TourViolation::RepeatedVertex { id: edge.origin });
                }
                left[o] = true;
            }
        }
        for (index, seen) in left.iter().enumerate() {
            if !seen {
                violations.push(TourViolation::MissingVertex {
                    id: self.graph.vertex(index).id(),
                });
            }
        }

        violations
    }

    /// Checks a solver result: structure, start vertex, and reported cost.
    ///
    /// An empty result has no violations; it is a valid "no solution".
    pub fn check_result(&self, result: &TourResult, start_id: usize) -> Vec<TourViolation> {
        if !result.is_solution() {
            return Vec::new();
        }
        let mut violations = self.check(result.tour());
        if let Some(actual) = result.tour().start() {
            if actual != start_id {
                violations.push(TourViolation::WrongStart {
                    expected: start_id,
                    actual,
                });
            }
        }
        let computed = result.tour().total_distance();
        if (computed - result.distance()).abs() > DISTANCE_TOLERANCE * computed.max(1.0) {
            violations.push(TourViolation::DistanceMismatch {
                reported: result.distance(),
                computed,
            });
        }
        violations
    }

    /// `true` if `tour` visits every vertex exactly once and returns to start.
    pub fn is_hamiltonian_cycle(&self, tour: &Tour) -> bool {
        self.check(tour).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EdgeIndex, ElapsedTime};

    fn complete(n: usize) -> Graph {
        let mut g = Graph::new();
        for id in 0..n {
            g.add_vertex(id, "", None).expect("fresh");
        }
        for a in 0..n {
            for b in 0..n {
                if a != b {
                    g.add_edge(a, b, (a + b) as f64).expect("valid");
                }
            }
        }
        g
    }

    fn edges(g: &Graph, order: &[usize]) -> Vec<EdgeIndex> {
        (0..order.len())
            .map(|i| {
                g.find_edge(order[i], order[(i + 1) % order.len()])
                    .expect("complete graph")
            })
            .collect()
    }

    #[test]
    fn test_valid_cycle() {
        let g = complete(4);
        let tour = Tour::from_edges(&g, &edges(&g, &[0, 2, 1, 3]));
        let v = TourValidator::new(&g);
        assert!(v.check(&tour).is_empty());
        assert!(v.is_hamiltonian_cycle(&tour));
    }

    #[test]
    fn test_empty_tour() {
        let g = complete(3);
        let v = TourValidator::new(&g);
        assert_eq!(v.check(&Tour::new()), vec![TourViolation::Empty]);
    }

    #[test]
    fn test_short_cycle_misses_vertex() {
        let g = complete(4);
        let tour = Tour::from_edges(&g, &edges(&g, &[0, 1, 2]));
        let violations = TourValidator::new(&g).check(&tour);
        assert!(violations.contains(&TourViolation::WrongLength {
            expected: 4,
            actual: 3
        }));
        assert!(violations.contains(&TourViolation::MissingVertex { id: 3 }));
    }

    #[test]
    fn test_repeated_vertex() {
        let g = complete(4);
        // 0 -> 1 -> 0 -> 2 -> 0 : four edges but vertex 0 left twice
        let e = vec![
            g.find_edge(0, 1).expect("edge"),
            g.find_edge(1, 0).expect("edge"),
            g.find_edge(0, 2).expect("edge"),
            g.find_edge(2, 0).expect("edge"),
        ];
        let violations = TourValidator::new(&g).check(&Tour::from_edges(&g, &e));
        assert!(violations.contains(&TourViolation::RepeatedVertex { id: 0 }));
        assert!(violations.contains(&TourViolation::MissingVertex { id: 3 }));
    }

    #[test]
    fn test_disconnected_and_open() {
        let g = complete(4);
        let e = vec![
            g.find_edge(0, 1).expect("edge"),
            g.find_edge(2, 3).expect("edge"),
            g.find_edge(3, 1).expect("edge"),
            g.find_edge(1, 2).expect("edge"),
        ];
        let violations = TourValidator::new(&g).check(&Tour::from_edges(&g, &e));
        assert!(violations.contains(&TourViolation::Disconnected { position: 1 }));
        assert!(violations.contains(&TourViolation::NotClosed));
    }

    #[test]
    fn test_check_result_distance_and_start() {
        let g = complete(3);
        let tour = Tour::from_edges(&g, &edges(&g, &[1, 2, 0]));
        let sum = tour.total_distance();
        let v = TourValidator::new(&g);

        let good = TourResult::new(tour.clone(), sum, ElapsedTime::default());
        assert!(v.check_result(&good, 1).is_empty());

        let wrong_start = v.check_result(&good, 0);
        assert!(wrong_start.contains(&TourViolation::WrongStart {
            expected: 0,
            actual: 1
        }));

        let bad = TourResult::new(tour, sum + 1.0, ElapsedTime::default());
        assert!(matches!(
            v.check_result(&bad, 1).as_slice(),
            [TourViolation::DistanceMismatch { .. }]
        ));
    }

    #[test]
    fn test_no_solution_is_valid_result() {
        let g = complete(3);
        let r = TourResult::no_solution(ElapsedTime::default());
        assert!(TourValidator::new(&g).check_result(&r, 0).is_empty());
    }
}
