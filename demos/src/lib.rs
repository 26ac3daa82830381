//! Text loaders feeding the waymark searches.
//!
//! Grid maps are plain rows of characters, `0` for open cells. Graph files
//! are line oriented:
//!
//! ```text
//! # comment
//! vertex <label> <x> <y>
//! edge <src> <dest> <weight> <uni|bi>
//! ```
//!
//! Labels are single whitespace-free words. Edges may only name vertices
//! declared on an earlier line.

use std::fs;
use std::path::{Path, PathBuf};

use waymark_core::{CharGrid, GridError, Point};
use waymark_paths::{EdgeType, Graph, GraphError};

/// Errors raised while loading a map or graph file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {msg}")]
    Syntax { line: usize, msg: String },
    #[error("line {line}: {source}")]
    Graph {
        line: usize,
        #[source]
        source: GraphError,
    },
    #[error(transparent)]
    Grid(#[from] GridError),
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a grid map from disk.
pub fn load_grid(path: &Path) -> Result<CharGrid, LoadError> {
    let text = read(path)?;
    Ok(CharGrid::parse(&text)?)
}

/// Read a graph description from disk.
pub fn load_graph(path: &Path) -> Result<Graph, LoadError> {
    parse_graph(&read(path)?)
}

/// Build a graph from its text description.
pub fn parse_graph(text: &str) -> Result<Graph, LoadError> {
    let mut graph = Graph::new();
    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let syntax = |msg: String| LoadError::Syntax { line, msg };
        let words: Vec<&str> = content.split_whitespace().collect();
        match words.as_slice() {
            ["vertex", label, x, y] => {
                let x = x
                    .parse()
                    .map_err(|_| syntax(format!("bad x coordinate {x:?}")))?;
                let y = y
                    .parse()
                    .map_err(|_| syntax(format!("bad y coordinate {y:?}")))?;
                graph
                    .add_vertex(label, x, y)
                    .map_err(|source| LoadError::Graph { line, source })?;
            }
            ["edge", src, dest, weight, kind] => {
                let weight = weight
                    .parse()
                    .map_err(|_| syntax(format!("bad weight {weight:?}")))?;
                let kind = match *kind {
                    "uni" => EdgeType::Unidirectional,
                    "bi" => EdgeType::Bidirectional,
                    other => return Err(syntax(format!("unknown edge type {other:?}"))),
                };
                graph
                    .add_edge(src, dest, weight, kind)
                    .map_err(|source| LoadError::Graph { line, source })?;
            }
            _ => return Err(syntax(format!("cannot parse {content:?}"))),
        }
    }
    log::info!(
        "loaded graph with {} vertices and {} edges",
        graph.len(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Parse an `x,y` pair, as given on the command line.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let x = x.trim().parse().map_err(|_| format!("bad x in {s:?}"))?;
    let y = y.trim().parse().map_err(|_| format!("bad y in {s:?}"))?;
    Ok(Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_paths::{VertexId, dijkstra_graph};

    const CITIES: &str = "\
# four cities
vertex A 0 0
vertex B 2 0
vertex C 0 1
vertex D 2 1

edge A B 2 bi
edge B D 2 bi
edge A C 1 bi   # cheap
edge C D 1 bi
";

    #[test]
    fn parses_vertices_and_edges() {
        let g = parse_graph(CITIES).unwrap();
        assert_eq!(g.len(), 4);
        assert_eq!(g.edge_count(), 8);
        assert_eq!(g.vertex(VertexId(1)).unwrap().point(), Point::new(2, 0));

        let path = dijkstra_graph(&g, g.find("A").unwrap(), g.find("D").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(path.to_vec(), vec!["A", "C", "D"]);
    }

    #[test]
    fn reports_line_of_unknown_vertex() {
        let err = parse_graph("vertex A 0 0\n\nedge A Z 1 uni\n").unwrap_err();
        match err {
            LoadError::Graph { line, source } => {
                assert_eq!(line, 3);
                assert_eq!(source, GraphError::UnknownVertex("Z".into()));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn rejects_malformed_lines() {
        for text in [
            "vertex A zero 0",
            "edge A B",
            "edge A A 1 sideways",
            "vertex A 0 0\nedge A A -1 uni",
            "teleport A",
        ] {
            let text = if text.starts_with("edge") {
                format!("vertex A 0 0\nvertex B 0 0\n{text}")
            } else {
                text.to_string()
            };
            assert!(
                matches!(parse_graph(&text), Err(LoadError::Syntax { .. })),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn point_argument() {
        assert_eq!(parse_point("3,4"), Ok(Point::new(3, 4)));
        assert_eq!(parse_point(" 0 , 12"), Ok(Point::new(0, 12)));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_grid(Path::new("/nonexistent/waymark/map.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
