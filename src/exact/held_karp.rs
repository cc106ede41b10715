//! Held-Karp dynamic programming.
//!
//! `cost[S][j]` is the cheapest path that leaves the start, visits exactly
//! the vertex set `S`, and ends at `j ∈ S`. Subsets are bitmasks over the
//! non-start vertices.
//!
//! # Complexity
//!
//! O(2^n · n²) time, O(2^n · n) memory. Guarded by a vertex limit.

use log::debug;

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::models::{EdgeIndex, Graph, VertexIndex};

/// Upper bound on the memory held by the cost and parent tables.
pub const HELD_KARP_TABLE_BUDGET: usize = 2 << 30;

/// Largest vertex count whose tables fit in [`HELD_KARP_TABLE_BUDGET`].
pub const HELD_KARP_VERTEX_CEILING: usize = 24;

const NO_PARENT: u8 = u8::MAX;

/// Bytes needed by the cost and parent tables for `n` vertices, or `None`
/// on overflow.
pub fn held_karp_table_bytes(n: usize) -> Option<usize> {
    if n < 2 {
        return Some(0);
    }
    let m = n - 1;
    let subsets = 1usize.checked_shl(u32::try_from(m).ok()?)?;
    subsets
        .checked_mul(m)?
        .checked_mul(std::mem::size_of::<f64>() + std::mem::size_of::<u8>())
}

/// Finds a minimum-cost Hamiltonian cycle with Held-Karp.
///
/// Uses existing edges only. Returns `None` if no cycle exists.
///
/// # Errors
///
/// - [`Error::NullReference`] if `start` is not a vertex.
/// - [`Error::Semantic`] if the graph has more than `max_vertices` vertices
///   or its tables would exceed [`HELD_KARP_TABLE_BUDGET`].
///
/// # Examples
///
/// ```
/// use u_tsp::models::Graph;
/// use u_tsp::exact::held_karp;
///
/// let mut g = Graph::new();
/// for id in 0..4 {
///     g.add_vertex(id, "", None).unwrap();
/// }
/// for (a, b, d) in [(0, 1, 10.0), (0, 2, 15.0), (0, 3, 20.0),
///                   (1, 2, 35.0), (1, 3, 25.0), (2, 3, 30.0)] {
///     g.add_edge(a, b, d).unwrap();
///     g.add_edge(b, a, d).unwrap();
/// }
///
/// let cycle = held_karp(&g, 0, 20).unwrap().unwrap();
/// assert!((g.path_distance(&cycle) - 80.0).abs() < 1e-10);
/// ```
pub fn held_karp(
    graph: &Graph,
    start: VertexIndex,
    max_vertices: usize,
) -> Result<Option<Vec<EdgeIndex>>> {
    graph.check_vertex(start)?;
    let n = graph.num_vertices();
    let limit = max_vertices.min(HELD_KARP_VERTEX_CEILING);
    if n > limit {
        return Err(Error::semantic(format!(
            "held-karp limited to {limit} vertices, graph has {n}"
        )));
    }
    match held_karp_table_bytes(n) {
        Some(bytes) if bytes <= HELD_KARP_TABLE_BUDGET => {}
        _ => {
            return Err(Error::semantic(format!(
                "held-karp tables for {n} vertices exceed {HELD_KARP_TABLE_BUDGET} bytes"
            )));
        }
    }
    if n < 2 {
        return Ok(None);
    }

    let matrix = DistanceMatrix::from_graph(graph);
    // Bit i stands for others[i].
    let others: Vec<VertexIndex> = (0..n).filter(|&v| v != start).collect();
    let m = others.len();
    let full = (1usize << m) - 1;

    let mut cost = vec![f64::INFINITY; (full + 1) * m];
    let mut parent = vec![NO_PARENT; (full + 1) * m];
    let at = |mask: usize, j: usize| mask * m + j;

    for (j, &v) in others.iter().enumerate() {
        cost[at(1 << j, j)] = matrix.get(start, v);
    }

    for mask in 1..=full {
        for j in 0..m {
            if mask & (1 << j) == 0 {
                continue;
            }
            let here = cost[at(mask, j)];
            if here.is_infinite() {
                continue;
            }
            for k in 0..m {
                if mask & (1 << k) != 0 {
                    continue;
                }
                let step = matrix.get(others[j], others[k]);
                if step.is_infinite() {
                    continue;
                }
                let next = at(mask | (1 << k), k);
                if here + step < cost[next] {
                    cost[next] = here + step;
                    parent[next] = j as u8;
                }
            }
        }
    }

    let mut best = f64::INFINITY;
    let mut last = None;
    for (j, &v) in others.iter().enumerate() {
        let total = cost[at(full, j)] + matrix.get(v, start);
        if total < best {
            best = total;
            last = Some(j);
        }
    }
    let Some(mut j) = last else {
        debug!("held-karp: no cycle through {start}");
        return Ok(None);
    };

    let mut order = Vec::with_capacity(n);
    let mut mask = full;
    loop {
        order.push(others[j]);
        let p = parent[at(mask, j)];
        mask &= !(1 << j);
        if p == NO_PARENT {
            break;
        }
        j = p as usize;
    }
    order.push(start);
    order.reverse();

    let mut cycle = Vec::with_capacity(n);
    for i in 0..n {
        let (a, b) = (order[i], order[(i + 1) % n]);
        match graph.find_edge(a, b) {
            Some(e) => cycle.push(e),
            None => return Err(Error::semantic(format!("missing edge {a} -> {b}"))),
        }
    }
    debug!("held-karp: optimum {best:.3} over {n} vertices");
    Ok(Some(cycle))
}
