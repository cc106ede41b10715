//! Dense distance matrix.

use crate::models::Graph;

/// A dense n×n distance matrix stored in row-major order.
///
/// Rows and columns are graph arena indices. Pairs with no edge hold
/// `f64::INFINITY`; the diagonal is zero.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Graph;
/// use u_tsp::distance::DistanceMatrix;
///
/// let mut g = Graph::new();
/// g.add_vertex(0, "", None).unwrap();
/// g.add_vertex(1, "", None).unwrap();
/// g.add_vertex(2, "", None).unwrap();
/// g.add_edge(0, 1, 5.0).unwrap();
///
/// let dm = DistanceMatrix::from_graph(&g);
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert!(dm.get(1, 0).is_infinite());
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix of the given size with no connections.
    pub fn new(size: usize) -> Self {
        let mut data = vec![f64::INFINITY; size * size];
        for i in 0..size {
            data[i * size + i] = 0.0;
        }
        Self { data, size }
    }

    /// Copies the explicit edge weights of a graph.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut dm = Self::new(graph.num_vertices());
        for edge in graph.edges() {
            dm.set(edge.origin(), edge.destination(), edge.distance());
        }
        dm
    }

    /// Returns the distance from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// `true` if `from -> to` has a finite distance.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        from != to && self.get(from, to).is_finite()
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a.is_infinite() != b.is_infinite() {
                    return false;
                }
                if a.is_finite() && (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Other locations reachable from `from`, nearest first.
    pub fn neighbors_by_distance(&self, from: usize) -> Vec<usize> {
        let mut neighbors: Vec<usize> = (0..self.size)
            .filter(|&j| self.has_edge(from, j))
            .collect();
        neighbors.sort_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)));
        neighbors
    }
}
