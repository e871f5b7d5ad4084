//! On-disk benchmark case loading.
//!
//! A case directory holds three plain-text files:
//!
//! - `vertices.txt` - one `x y z` coordinate triple per line
//! - `edges.txt` - one `v1 v2 weight` segment per line
//! - `devices.txt` - whitespace-separated terminal indices, the first being
//!   the power source

use raceway_core::{GraphError, Point, RoutingGraph, TerminalSet};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CaseError {
    #[error("case directory is missing {name}")]
    MissingFile { name: &'static str },

    #[error("I/O error reading {name}: {source}")]
    Io {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {name} line {line}: {message}")]
    Parse {
        name: &'static str,
        line: usize,
        message: String,
    },

    #[error("bad segment in edges.txt: {0}")]
    Graph(#[from] GraphError),
}

fn read_case_file(dir: &Path, name: &'static str) -> Result<String, CaseError> {
    let path = dir.join(name);
    if !path.is_file() {
        return Err(CaseError::MissingFile { name });
    }
    std::fs::read_to_string(&path).map_err(|source| CaseError::Io { name, source })
}

fn parse_field<T: std::str::FromStr>(
    token: Option<&str>,
    name: &'static str,
    line: usize,
    what: &str,
) -> Result<T, CaseError> {
    let token = token.ok_or_else(|| CaseError::Parse {
        name,
        line,
        message: format!("missing {what}"),
    })?;
    token.parse().map_err(|_| CaseError::Parse {
        name,
        line,
        message: format!("invalid {what} {token:?}"),
    })
}

/// Load a routing case from `dir`.
pub fn load_case(dir: impl AsRef<Path>) -> Result<(RoutingGraph, TerminalSet), CaseError> {
    let dir = dir.as_ref();
    let mut graph = RoutingGraph::new();

    let vertices = read_case_file(dir, "vertices.txt")?;
    for (i, row) in vertices.lines().enumerate() {
        if row.trim().is_empty() {
            continue;
        }
        let mut fields = row.split_whitespace();
        let x = parse_field(fields.next(), "vertices.txt", i + 1, "x coordinate")?;
        let y = parse_field(fields.next(), "vertices.txt", i + 1, "y coordinate")?;
        let z = parse_field(fields.next(), "vertices.txt", i + 1, "z coordinate")?;
        graph.add_vertex(Point::new(x, y, z));
    }

    let edges = read_case_file(dir, "edges.txt")?;
    for (i, row) in edges.lines().enumerate() {
        if row.trim().is_empty() {
            continue;
        }
        let mut fields = row.split_whitespace();
        let v1: usize = parse_field(fields.next(), "edges.txt", i + 1, "first vertex")?;
        let v2: usize = parse_field(fields.next(), "edges.txt", i + 1, "second vertex")?;
        let weight: f64 = parse_field(fields.next(), "edges.txt", i + 1, "weight")?;
        graph.add_edge(v1, v2, weight)?;
    }

    let devices = read_case_file(dir, "devices.txt")?;
    let mut indices = Vec::new();
    for token in devices.split_whitespace() {
        let t: usize = token.parse().map_err(|_| CaseError::Parse {
            name: "devices.txt",
            line: 1,
            message: format!("invalid terminal index {token:?}"),
        })?;
        indices.push(t);
    }
    let terminals = match indices.split_first() {
        Some((&source, rest)) => TerminalSet::with_source(source, rest.to_vec()),
        None => TerminalSet::new(Vec::new()),
    };

    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        terminals = terminals.len(),
        "case loaded"
    );
    Ok((graph, terminals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_case(dir: &Path, vertices: &str, edges: &str, devices: &str) {
        fs::write(dir.join("vertices.txt"), vertices).unwrap();
        fs::write(dir.join("edges.txt"), edges).unwrap();
        fs::write(dir.join("devices.txt"), devices).unwrap();
    }

    #[test]
    fn test_loads_complete_case() {
        let dir = tempfile::tempdir().unwrap();
        write_case(
            dir.path(),
            "0 0 0\n1 0 0\n1 1 0\n",
            "0 1 1.0\n1 2 1.5\n",
            "0 2\n",
        );
        let (graph, terminals) = load_case(dir.path()).unwrap();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge(1), (1, 2, 1.5));
        assert_eq!(terminals.source(), Some(0));
        assert_eq!(terminals.indices(), &[0, 2]);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vertices.txt"), "0 0 0\n").unwrap();
        let err = load_case(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            CaseError::MissingFile { name: "edges.txt" }
        ));
    }

    #[test]
    fn test_bad_coordinate_is_reported_with_line() {
        let dir = tempfile::tempdir().unwrap();
        write_case(dir.path(), "0 0 0\n1 bogus 0\n", "", "0\n");
        let err = load_case(dir.path()).unwrap_err();
        match err {
            CaseError::Parse { name, line, .. } => {
                assert_eq!(name, "vertices.txt");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_bad_edge_endpoint_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_case(dir.path(), "0 0 0\n1 0 0\n", "0 5 1.0\n", "0 1\n");
        let err = load_case(dir.path()).unwrap_err();
        assert!(matches!(err, CaseError::Graph(_)));
    }
}
