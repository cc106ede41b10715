//! Lin-Kernighan-style variable-depth edge exchange.
//!
//! # Algorithm
//!
//! An exchange is an alternating trail `t0, t1, t2, ..., tk, t0`: edges
//! `(t0,t1)`, `(t2,t3)`, ... leave the tour and edges `(t1,t2)`, `(t3,t4)`,
//! ... enter it. Starting from every vertex `t0`, the trail is grown
//! depth-first on an explicit stack of `(vertex, depth, gain)` cells:
//!
//! - at even depth a tour edge at the current vertex is removed;
//! - at odd depth the trail first tries to close back to `t0`, then extends
//!   through the `breadth` nearest non-tour edges that keep the partial gain
//!   positive.
//!
//! A closure is recorded only if its gain beats the best so far and the
//! exchanged edge set is still a single Hamiltonian cycle. Once something
//! is recorded and the search backtracks to a shallow depth, the best trail
//! is applied and the search restarts on the new tour. It stops when a full
//! pass finds nothing.
//!
//! # Reference
//!
//! Lin, S. & Kernighan, B.W. (1973). "An effective heuristic algorithm for
//! the traveling-salesman problem", *Operations Research* 21(2), 498-516.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::models::{EdgeIndex, Graph, VertexIndex, SYMMETRY_TOLERANCE};
use crate::solver::SolverConfig;

/// Smallest gain worth committing. Guards against float noise cycling
/// between equal-length tours.
const MIN_GAIN: f64 = 1e-9;

const NONE: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct Cell {
    vertex: usize,
    depth: usize,
    gain: f64,
}

/// Undirected tour stored as the two neighbors of each vertex.
#[derive(Debug, Clone)]
struct TourLinks {
    links: Vec<[usize; 2]>,
}

impl TourLinks {
    fn from_order(order: &[usize]) -> Self {
        let n = order.len();
        let mut links = vec![[NONE; 2]; n];
        for i in 0..n {
            let (a, b) = (order[i], order[(i + 1) % n]);
            links[a][1] = b;
            links[b][0] = a;
        }
        Self { links }
    }

    fn len(&self) -> usize {
        self.links.len()
    }

    fn neighbors(&self, v: usize) -> [usize; 2] {
        self.links[v]
    }

    fn contains(&self, a: usize, b: usize) -> bool {
        self.links[a][0] == b || self.links[a][1] == b
    }

    /// Applies a closed trail, returning the new tour if it is a single
    /// Hamiltonian cycle.
    fn exchanged(&self, trail: &[usize]) -> Option<Self> {
        let mut links = self.links.clone();
        let edges = trail.windows(2).map(|w| (w[0], w[1]));

        for (a, b) in edges.clone().step_by(2) {
            unlink(&mut links, a, b)?;
            unlink(&mut links, b, a)?;
        }
        for (a, b) in edges.skip(1).step_by(2) {
            link(&mut links, a, b)?;
            link(&mut links, b, a)?;
        }

        let candidate = Self { links };
        (candidate.cycle_length() == Some(candidate.len())).then_some(candidate)
    }

    /// Number of vertices on the cycle through vertex 0, or `None` if the
    /// links are not a cycle.
    fn cycle_length(&self) -> Option<usize> {
        let n = self.len();
        let mut prev = 0;
        let mut current = self.links[0][1];
        let mut count = 1;
        while current != 0 {
            if current == NONE || count > n {
                return None;
            }
            let [a, b] = self.links[current];
            let next = if a != prev { a } else { b };
            prev = current;
            current = next;
            count += 1;
        }
        Some(count)
    }

    /// Vertex order starting at `start`.
    fn order_from(&self, start: usize) -> Vec<usize> {
        let n = self.len();
        let mut order = Vec::with_capacity(n);
        order.push(start);
        let mut prev = start;
        let mut current = self.links[start][1];
        while current != start && order.len() < n {
            order.push(current);
            let [a, b] = self.links[current];
            let next = if a != prev { a } else { b };
            prev = current;
            current = next;
        }
        order
    }

    fn length(&self, matrix: &DistanceMatrix) -> f64 {
        (0..self.len())
            .map(|v| {
                let [a, b] = self.links[v];
                matrix.get(v, a) + matrix.get(v, b)
            })
            .sum::<f64>()
            / 2.0
    }
}

fn unlink(links: &mut [[usize; 2]], a: usize, b: usize) -> Option<()> {
    let slot = links[a].iter_mut().find(|s| **s == b)?;
    *slot = NONE;
    Some(())
}

fn link(links: &mut [[usize; 2]], a: usize, b: usize) -> Option<()> {
    let slot = links[a].iter_mut().find(|s| **s == NONE)?;
    *slot = b;
    Some(())
}

/// `true` if `(a, b)` joins two consecutive trail vertices, in either
/// direction.
fn in_trail(trail: &[usize], a: usize, b: usize) -> bool {
    trail
        .windows(2)
        .any(|w| (w[0] == a && w[1] == b) || (w[0] == b && w[1] == a))
}

/// Improves a complete symmetric graph's tour from a random start.
///
/// The initial tour visits `start` first and the other vertices in a random
/// order drawn from `config.seed` (or entropy when unset).
///
/// # Errors
///
/// - [`Error::NullReference`] if `start` is not a vertex.
/// - [`Error::Semantic`] if the graph is not complete or not symmetric.
pub fn lin_kernighan(
    graph: &Graph,
    start: VertexIndex,
    config: &SolverConfig,
) -> Result<Option<Vec<EdgeIndex>>> {
    graph.check_vertex(start)?;
    if !graph.is_complete() {
        return Err(Error::semantic("lin-kernighan requires a complete graph"));
    }
    if !graph.is_symmetric() {
        return Err(Error::semantic("lin-kernighan requires a symmetric graph"));
    }
    let n = graph.num_vertices();
    if n < 2 {
        return Ok(None);
    }

    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
    let mut order: Vec<VertexIndex> = (0..n).filter(|&v| v != start).collect();
    order.shuffle(&mut rng);
    order.insert(0, start);

    let matrix = DistanceMatrix::from_graph(graph);
    let improved = lin_kernighan_improve(&matrix, &order, config)?;

    let mut cycle = Vec::with_capacity(n);
    for i in 0..n {
        let (a, b) = (improved[i], improved[(i + 1) % n]);
        let edge = graph
            .find_edge(a, b)
            .ok_or_else(|| Error::null_reference(format!("no edge {a} -> {b}")))?;
        cycle.push(edge);
    }
    Ok(Some(cycle))
}

/// Improves a tour given as a vertex order over a symmetric matrix.
///
/// The returned order starts at the same vertex as `order` and is never
/// longer. Tours of fewer than four vertices are returned unchanged.
///
/// # Errors
///
/// [`Error::Semantic`] if `order` is not a permutation of the matrix indices
/// or the matrix is not symmetric.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::lin_kernighan_improve;
/// use u_tsp::solver::SolverConfig;
///
/// // Unit square; the order 0, 2, 1, 3 crosses itself.
/// let pts = [(0.0_f64, 0.0_f64), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
/// let mut dm = DistanceMatrix::new(4);
/// for i in 0..4 {
///     for j in 0..4 {
///         let (dx, dy) = (pts[i].0 - pts[j].0, pts[i].1 - pts[j].1);
///         dm.set(i, j, (dx * dx + dy * dy).sqrt());
///     }
/// }
///
/// let order = lin_kernighan_improve(&dm, &[0, 2, 1, 3], &SolverConfig::default()).unwrap();
/// assert_eq!(order[0], 0);
/// let len: f64 = (0..4).map(|i| dm.get(order[i], order[(i + 1) % 4])).sum();
/// assert!((len - 4.0).abs() < 1e-10);
/// ```
pub fn lin_kernighan_improve(
    matrix: &DistanceMatrix,
    order: &[usize],
    config: &SolverConfig,
) -> Result<Vec<usize>> {
    let n = matrix.size();
    let mut seen = vec![false; n];
    for &v in order {
        if v >= n || std::mem::replace(&mut seen[v], true) {
            return Err(Error::semantic(format!(
                "tour order is not a permutation of 0..{n}"
            )));
        }
    }
    if order.len() != n {
        return Err(Error::semantic(format!(
            "tour order has {} vertices, matrix has {n}",
            order.len()
        )));
    }
    if !matrix.is_symmetric(SYMMETRY_TOLERANCE) {
        return Err(Error::semantic("lin-kernighan requires a symmetric matrix"));
    }
    if n < 4 {
        return Ok(order.to_vec());
    }

    let neighbors: Vec<Vec<usize>> = (0..n).map(|v| matrix.neighbors_by_distance(v)).collect();
    let mut tour = TourLinks::from_order(order);
    let mut passes = 0;

    while config.lk_max_passes == 0 || passes < config.lk_max_passes {
        passes += 1;
        let Some((gain, next)) = best_exchange(matrix, &neighbors, &tour, config) else {
            break;
        };
        tour = next;
        debug!(
            "lin-kernighan pass {passes}: gain {gain:.6}, length {:.6}",
            tour.length(matrix)
        );
    }

    Ok(tour.order_from(order[0]))
}

/// One pass: the best exchange found before the search backtracks past
/// `lk_backtrack_depth`, already applied.
fn best_exchange(
    matrix: &DistanceMatrix,
    neighbors: &[Vec<usize>],
    tour: &TourLinks,
    config: &SolverConfig,
) -> Option<(f64, TourLinks)> {
    let max_depth = config.lk_max_depth;
    let mut best: Option<(f64, TourLinks)> = None;
    let mut g_star = 0.0;
    let mut trail: Vec<usize> = Vec::with_capacity(max_depth + 2);

    for t0 in 0..tour.len() {
        let mut stack = vec![Cell {
            vertex: t0,
            depth: 0,
            gain: 0.0,
        }];

        while let Some(cell) = stack.pop() {
            if best.is_some() && cell.depth <= config.lk_backtrack_depth {
                break;
            }
            trail.truncate(cell.depth);
            trail.push(cell.vertex);
            let v = cell.vertex;
            let next_depth = cell.depth + 1;

            if cell.depth % 2 == 0 {
                if next_depth > max_depth {
                    continue;
                }
                for w in tour.neighbors(v) {
                    if (cell.depth > 0 && w == t0) || in_trail(&trail, v, w) {
                        continue;
                    }
                    stack.push(Cell {
                        vertex: w,
                        depth: next_depth,
                        gain: cell.gain + matrix.get(v, w),
                    });
                }
                continue;
            }

            if !tour.contains(v, t0) && !in_trail(&trail, v, t0) {
                let g = cell.gain - matrix.get(v, t0);
                if g > g_star && g > MIN_GAIN {
                    trail.push(t0);
                    if let Some(next) = tour.exchanged(&trail) {
                        g_star = g;
                        best = Some((g, next));
                    }
                    trail.pop();
                }
            }

            if next_depth > max_depth {
                continue;
            }
            let mut candidates = Vec::with_capacity(config.lk_breadth);
            for &w in &neighbors[v] {
                if candidates.len() == config.lk_breadth {
                    break;
                }
                if w == t0 || tour.contains(v, w) || in_trail(&trail, v, w) {
                    continue;
                }
                let gain = cell.gain - matrix.get(v, w);
                // Neighbors are sorted, so no later one keeps the gain positive.
                if gain <= 0.0 {
                    break;
                }
                candidates.push(Cell {
                    vertex: w,
                    depth: next_depth,
                    gain,
                });
            }
            stack.extend(candidates.into_iter().rev());
        }

        if best.is_some() {
            break;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn euclidean(points: &[(f64, f64)]) -> DistanceMatrix {
        let n = points.len();
        let mut dm = DistanceMatrix::new(n);
        for i in 0..n {
            for j in 0..n {
                let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
                dm.set(i, j, (dx * dx + dy * dy).sqrt());
            }
        }
        dm
    }

    fn order_length(dm: &DistanceMatrix, order: &[usize]) -> f64 {
        let n = order.len();
        (0..n).map(|i| dm.get(order[i], order[(i + 1) % n])).sum()
    }

    fn four_city() -> Graph {
        let mut g = Graph::new();
        for id in 0..4 {
            g.add_vertex(id, "", None).expect("fresh");
        }
        for (a, b, d) in [
            (0, 1, 10.0),
            (0, 2, 15.0),
            (0, 3, 20.0),
            (1, 2, 35.0),
            (1, 3, 25.0),
            (2, 3, 30.0),
        ] {
            g.add_edge(a, b, d).expect("valid");
            g.add_edge(b, a, d).expect("valid");
        }
        g
    }

    #[test]
    fn test_tour_links_roundtrip_order() {
        let t = TourLinks::from_order(&[2, 0, 3, 1]);
        assert_eq!(t.order_from(2), vec![2, 0, 3, 1]);
        assert_eq!(t.cycle_length(), Some(4));
        assert!(t.contains(1, 2));
        assert!(!t.contains(0, 1));
    }

    #[test]
    fn test_exchange_rejects_two_cycles() {
        // Out (0,1),(3,4), in (1,3),(4,0): splits off 1-2-3.
        let t = TourLinks::from_order(&[0, 1, 2, 3, 4, 5]);
        assert!(t.exchanged(&[0, 1, 3, 4, 0]).is_none());
        // Removing (0,1),(2,3), adding (1,3),(2,0) is a valid 2-opt move.
        let next = t.exchanged(&[0, 1, 3, 2, 0]).expect("hamiltonian");
        assert_eq!(next.cycle_length(), Some(6));
        assert!(next.contains(1, 3));
        assert!(next.contains(0, 2));
        assert!(!next.contains(0, 1));
    }

    #[test]
    fn test_uncrosses_square() {
        let dm = euclidean(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let order = lin_kernighan_improve(&dm, &[0, 2, 1, 3], &SolverConfig::default())
            .expect("permutation");
        assert_eq!(order[0], 0);
        assert!((order_length(&dm, &order) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_never_worse_on_circle() {
        let points: Vec<(f64, f64)> = (0..12)
            .map(|i| {
                let a = (i * 5 % 12) as f64 * std::f64::consts::TAU / 12.0;
                (a.cos(), a.sin())
            })
            .collect();
        let dm = euclidean(&points);
        let initial: Vec<usize> = (0..12).collect();
        let order =
            lin_kernighan_improve(&dm, &initial, &SolverConfig::default()).expect("permutation");

        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, initial);
        assert!(order_length(&dm, &order) <= order_length(&dm, &initial) + 1e-10);
    }

    #[test]
    fn test_small_tours_unchanged() {
        let dm = euclidean(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let order =
            lin_kernighan_improve(&dm, &[1, 2, 0], &SolverConfig::default()).expect("permutation");
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_rejects_bad_order() {
        let dm = euclidean(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        let config = SolverConfig::default();
        assert!(lin_kernighan_improve(&dm, &[0, 1, 1, 2], &config).is_err());
        assert!(lin_kernighan_improve(&dm, &[0, 1, 2], &config).is_err());
        assert!(lin_kernighan_improve(&dm, &[0, 1, 2, 7], &config).is_err());
    }

    #[test]
    fn test_rejects_asymmetric_matrix() {
        let mut dm = euclidean(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        dm.set(0, 1, 9.0);
        assert!(matches!(
            lin_kernighan_improve(&dm, &[0, 1, 2, 3], &SolverConfig::default()),
            Err(Error::Semantic(_))
        ));
    }

    #[test]
    fn test_four_city_reaches_optimum() {
        let g = four_city();
        for seed in 0..5 {
            let config = SolverConfig::default().with_seed(seed);
            let cycle = lin_kernighan(&g, 1, &config).expect("valid").expect("cycle");
            assert_eq!(cycle.len(), 4);
            assert_eq!(g.edge(cycle[0]).origin(), 1);
            assert!((g.path_distance(&cycle) - 80.0).abs() < 1e-10, "seed {seed}");
        }
    }

    #[test]
    fn test_same_seed_same_tour() {
        let g = four_city();
        let config = SolverConfig::default().with_seed(9);
        let a = lin_kernighan(&g, 0, &config).expect("valid");
        let b = lin_kernighan(&g, 0, &config).expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn test_requires_complete_graph() {
        let mut g = four_city();
        g.add_vertex(4, "", None).expect("fresh");
        assert!(matches!(
            lin_kernighan(&g, 0, &SolverConfig::default()),
            Err(Error::Semantic(_))
        ));
    }

    #[test]
    fn test_requires_symmetric_graph() {
        let mut g = Graph::new();
        for id in 0..3 {
            g.add_vertex(id, "", None).expect("fresh");
        }
        for a in 0..3 {
            for b in 0..3 {
                if a != b {
                    g.add_edge(a, b, (1 + a * 3 + b) as f64).expect("valid");
                }
            }
        }
        assert!(matches!(
            lin_kernighan(&g, 0, &SolverConfig::default()),
            Err(Error::Semantic(_))
        ));
    }

    #[test]
    fn test_two_vertices() {
        let mut g = Graph::new();
        g.add_vertex(0, "", None).expect("fresh");
        g.add_vertex(1, "", None).expect("fresh");
        g.add_edge(0, 1, 3.0).expect("valid");
        g.add_edge(1, 0, 3.0).expect("valid");
        let cycle = lin_kernighan(&g, 1, &SolverConfig::default().with_seed(1))
            .expect("valid")
            .expect("cycle");
        assert!((g.path_distance(&cycle) - 6.0).abs() < 1e-10);
    }
}
