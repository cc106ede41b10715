//! Comma-separated dataset parsing.

use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, trace};

use crate::error::{Error, Result};
use crate::models::{Coordinate, Graph, VertexIndex};

/// Non-blank rows of a file, with the header split off.
struct Records {
    header: Option<StringRecord>,
    rows: Vec<(usize, StringRecord)>,
}

/// Reads `text` as flexible CSV with trimmed fields. Fields keep their
/// column position even when empty. The first non-blank row is a header
/// when its first field is not an integer.
fn records(text: &str) -> Result<Records> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut header = None;
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(0, |p| p.line() as usize);
            Error::parse(line, e.to_string())
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, |p| p.line() as usize);
        if header.is_none() && rows.is_empty() && record[0].parse::<i64>().is_err() {
            header = Some(record);
            continue;
        }
        rows.push((line, record));
    }
    Ok(Records { header, rows })
}

fn field<T: FromStr>(row: &StringRecord, index: usize, line: usize, name: &str) -> Result<T> {
    let raw = row
        .get(index)
        .filter(|f| !f.is_empty())
        .ok_or_else(|| Error::parse(line, format!("missing {name}")))?;
    raw.parse()
        .map_err(|_| Error::parse(line, format!("invalid {name}: {raw}")))
}

/// Attaches the line number to model errors; lookup failures pass through.
fn at_line(line: usize, err: Error) -> Error {
    match err {
        Error::VertexNotFound(_) | Error::Parse { .. } | Error::Io(_) => err,
        other => Error::parse(line, other.to_string()),
    }
}

/// Adds `origin -> destination` (and the reverse when `symmetric`),
/// skipping edges already present. Returns how many edges were added.
fn add_edges(
    graph: &mut Graph,
    origin: VertexIndex,
    destination: VertexIndex,
    distance: f64,
    symmetric: bool,
    line: usize,
) -> Result<usize> {
    let mut added = 0;
    let mut pairs = vec![(origin, destination)];
    if symmetric {
        pairs.push((destination, origin));
    }
    for (o, d) in pairs {
        match graph.add_edge(o, d, distance) {
            Ok(_) => added += 1,
            Err(Error::DuplicateEdge {
                origin,
                destination,
            }) => trace!("line {line}: duplicate edge {origin} -> {destination} skipped"),
            Err(e) => return Err(at_line(line, e)),
        }
    }
    Ok(added)
}

fn vertex_or_insert(graph: &mut Graph, id: usize, label: &str, line: usize) -> Result<VertexIndex> {
    match graph.resolve(id) {
        Some(index) => Ok(index),
        None => graph
            .add_vertex(id, label, None)
            .map_err(|e| at_line(line, e)),
    }
}

/// Parses an edge list `origin,destination,distance[,origin_label,destination_label]`.
///
/// Vertices are created on first mention, without coordinates.
///
/// # Examples
///
/// ```
/// use u_tsp::io::parse_edge_list;
///
/// let csv = "origem,destino,distancia\n0,1,10\n0,2,15\n1,2,35\n";
/// let g = parse_edge_list(csv, true).unwrap();
/// assert_eq!(g.num_vertices(), 3);
/// assert_eq!(g.num_edges(), 6);
/// assert!(g.is_complete());
/// ```
pub fn parse_edge_list(text: &str, symmetric: bool) -> Result<Graph> {
    let records = records(text)?;
    let mut graph = Graph::new();
    for (line, row) in &records.rows {
        let line = *line;
        let origin_id: usize = field(row, 0, line, "origin")?;
        let destination_id: usize = field(row, 1, line, "destination")?;
        let distance: f64 = field(row, 2, line, "distance")?;
        let origin_label = row.get(3).unwrap_or("");
        let destination_label = row.get(4).unwrap_or("");

        let origin = vertex_or_insert(&mut graph, origin_id, origin_label, line)?;
        let destination = vertex_or_insert(&mut graph, destination_id, destination_label, line)?;
        add_edges(&mut graph, origin, destination, distance, symmetric, line)?;
    }
    debug!(
        "edge list: {} vertices, {} edges",
        graph.num_vertices(),
        graph.num_edges()
    );
    Ok(graph)
}

/// Parses a node file `id,latitude,longitude[,label]` into a graph without
/// edges.
///
/// When the header names longitude before latitude, the two coordinate
/// columns are swapped. At most `limit` vertices are read.
pub fn parse_nodes(text: &str, limit: Option<usize>) -> Result<Graph> {
    let records = records(text)?;
    let longitude_first = records.header.as_ref().is_some_and(|header| {
        let position = |prefix: &str| {
            header
                .iter()
                .position(|h| h.to_ascii_lowercase().starts_with(prefix))
        };
        matches!((position("lon"), position("lat")), (Some(lon), Some(lat)) if lon < lat)
    });

    let take = limit.unwrap_or(usize::MAX);
    let mut graph = Graph::with_capacity(records.rows.len().min(take));
    for (line, row) in records.rows.iter().take(take) {
        let line = *line;
        let id: usize = field(row, 0, line, "id")?;
        let first: f64 = field(row, 1, line, "coordinate")?;
        let second: f64 = field(row, 2, line, "coordinate")?;
        let (latitude, longitude) = if longitude_first {
            (second, first)
        } else {
            (first, second)
        };
        let coordinates = Coordinate::new(latitude, longitude).map_err(|e| at_line(line, e))?;
        let label = row.get(3).unwrap_or("");
        graph
            .add_vertex(id, label, Some(coordinates))
            .map_err(|e| at_line(line, e))?;
    }
    debug!("nodes: {} vertices", graph.num_vertices());
    Ok(graph)
}

/// Adds the edges of `origin,destination,distance` rows to a graph whose
/// vertices are already loaded. Returns the number of edges added.
///
/// # Errors
///
/// [`Error::VertexNotFound`] if a row names an unknown id.
pub fn parse_edges_into(graph: &mut Graph, text: &str, symmetric: bool) -> Result<usize> {
    let records = records(text)?;
    let mut added = 0;
    for (line, row) in &records.rows {
        let line = *line;
        let origin = graph.resolve_or_err(field(row, 0, line, "origin")?)?;
        let destination = graph.resolve_or_err(field(row, 1, line, "destination")?)?;
        let distance: f64 = field(row, 2, line, "distance")?;
        added += add_edges(graph, origin, destination, distance, symmetric, line)?;
    }
    debug!("edges: {added} added");
    Ok(added)
}

/// Reads and parses an edge-list file.
pub fn load_edge_list(path: impl AsRef<Path>, symmetric: bool) -> Result<Graph> {
    parse_edge_list(&std::fs::read_to_string(path)?, symmetric)
}

/// Reads and parses a node file.
pub fn load_nodes(path: impl AsRef<Path>, limit: Option<usize>) -> Result<Graph> {
    parse_nodes(&std::fs::read_to_string(path)?, limit)
}

/// Reads an edge file into a graph loaded with [`load_nodes`].
pub fn load_edges_into(graph: &mut Graph, path: impl AsRef<Path>, symmetric: bool) -> Result<usize> {
    parse_edges_into(graph, &std::fs::read_to_string(path)?, symmetric)
}
