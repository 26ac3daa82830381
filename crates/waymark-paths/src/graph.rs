//! Adjacency-list graph of labelled vertices and weighted edges.
//!
//! Vertices and edges live in two growable arenas and refer to each other
//! by index. A vertex's index is assigned at insertion time in strict
//! sequential order and never changes; individual vertices cannot be
//! removed, only the whole graph can be cleared.

use std::fmt;

use waymark_core::Point;

/// Index of a vertex inside its [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexId(pub usize);

impl VertexId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Direction of a connection added with [`Graph::add_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeType {
    /// One edge, stored on the source.
    Unidirectional,
    /// Two mirrored edges with the same weight.
    Bidirectional,
}

/// Errors reported while building a graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("graph: vertex label must not be empty")]
    EmptyLabel,
    #[error("graph: no vertex labelled {0:?}")]
    UnknownVertex(String),
    #[error("graph: could not reserve storage")]
    Alloc,
    /// A stored vertex whose index disagrees with its position.
    #[error("graph: vertex at position {position} claims index {index}")]
    Misnumbered { position: usize, index: usize },
    /// An edge id outside the edge arena, or listed on more than one vertex.
    #[error("graph: vertex {vertex} lists edge {edge}, which is missing or shared")]
    DanglingEdge { vertex: usize, edge: usize },
    /// An edge in the arena that no vertex lists.
    #[error("graph: edge {0} belongs to no vertex")]
    OrphanEdge(usize),
    /// An edge pointing past the last vertex.
    #[error("graph: edge {edge} points to missing vertex {dest}")]
    BadDest { edge: usize, dest: VertexId },
}

/// A directed, weighted connection stored on its source vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    dest: VertexId,
    weight: u32,
}

impl Edge {
    #[inline]
    pub fn dest(&self) -> VertexId {
        self.dest
    }

    /// Edge weight; `0` means the edge is unweighted.
    #[inline]
    pub fn weight(&self) -> u32 {
        self.weight
    }
}

/// A labelled point of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    index: usize,
    content: String,
    x: i32,
    y: i32,
    /// Outgoing edges, as indices into the graph's edge arena, in
    /// insertion order.
    edges: Vec<usize>,
}

impl Vertex {
    #[inline]
    pub fn id(&self) -> VertexId {
        VertexId(self.index)
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Number of outgoing edges.
    #[inline]
    pub fn nb_edges(&self) -> usize {
        self.edges.len()
    }
}

/// An adjacency-list graph owning all of its vertices and edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawGraph")
)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Create an empty graph.
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Total number of directed edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Append a vertex with the next sequential index.
    ///
    /// Labels are not deduplicated: adding an existing label creates a
    /// second, distinct vertex, and label lookups only ever see the first.
    pub fn add_vertex(&mut self, label: &str, x: i32, y: i32) -> Result<VertexId, GraphError> {
        if label.is_empty() {
            return Err(GraphError::EmptyLabel);
        }
        self.vertices.try_reserve(1).map_err(|_| GraphError::Alloc)?;
        let mut content = String::new();
        content.try_reserve_exact(label.len()).map_err(|_| GraphError::Alloc)?;
        content.push_str(label);

        let index = self.vertices.len();
        self.vertices.push(Vertex {
            index,
            content,
            x,
            y,
            edges: Vec::new(),
        });
        Ok(VertexId(index))
    }

    /// Connect the first vertex labelled `src` to the first labelled `dest`.
    ///
    /// Duplicate edges are stored, not merged. A bidirectional connection
    /// inserts both directions or neither.
    pub fn add_edge(
        &mut self,
        src: &str,
        dest: &str,
        weight: u32,
        kind: EdgeType,
    ) -> Result<(), GraphError> {
        let from = self
            .find(src)
            .ok_or_else(|| GraphError::UnknownVertex(src.to_string()))?;
        let to = self
            .find(dest)
            .ok_or_else(|| GraphError::UnknownVertex(dest.to_string()))?;

        let count = match kind {
            EdgeType::Unidirectional => 1,
            EdgeType::Bidirectional => 2,
        };
        // Reserve everything up front so a failure leaves the graph untouched.
        self.edges.try_reserve(count).map_err(|_| GraphError::Alloc)?;
        self.vertices[from.0]
            .edges
            .try_reserve(1)
            .map_err(|_| GraphError::Alloc)?;
        if kind == EdgeType::Bidirectional {
            // A self-loop needs both slots on the same vertex.
            let extra = usize::from(from == to);
            self.vertices[to.0]
                .edges
                .try_reserve(1 + extra)
                .map_err(|_| GraphError::Alloc)?;
        }

        self.link(from, to, weight);
        if kind == EdgeType::Bidirectional {
            self.link(to, from, weight);
        }
        Ok(())
    }

    /// First vertex whose label equals `label`.
    pub fn find(&self, label: &str) -> Option<VertexId> {
        self.vertices
            .iter()
            .find(|v| v.content == label)
            .map(Vertex::id)
    }

    #[inline]
    pub fn contains(&self, id: VertexId) -> bool {
        id.0 < self.vertices.len()
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0)
    }

    /// Vertices in index order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Outgoing edges of `id` in insertion order. Empty for unknown ids.
    pub fn edges(&self, id: VertexId) -> impl Iterator<Item = &Edge> {
        self.vertices
            .get(id.0)
            .map(|v| v.edges.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&e| &self.edges[e])
    }

    /// Release every vertex and edge.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
    }

    fn link(&mut self, from: VertexId, to: VertexId, weight: u32) {
        let e = self.edges.len();
        self.edges.push(Edge { dest: to, weight });
        self.vertices[from.0].edges.push(e);
    }
}

/// Unchecked graph fields as they appear in serialized form.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGraph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGraph> for Graph {
    type Error = GraphError;

    /// Rebuild a graph, checking that every vertex sits at its own index,
    /// every edge id is listed by exactly one vertex, and every edge lands
    /// on an existing vertex.
    fn try_from(raw: RawGraph) -> Result<Self, GraphError> {
        let RawGraph { vertices, edges } = raw;
        let mut owned = vec![false; edges.len()];
        for (position, v) in vertices.iter().enumerate() {
            if v.index != position {
                return Err(GraphError::Misnumbered {
                    position,
                    index: v.index,
                });
            }
            if v.content.is_empty() {
                return Err(GraphError::EmptyLabel);
            }
            for &edge in &v.edges {
                match owned.get_mut(edge) {
                    Some(slot) if !*slot => *slot = true,
                    _ => {
                        return Err(GraphError::DanglingEdge {
                            vertex: position,
                            edge,
                        });
                    }
                }
            }
        }
        if let Some(edge) = owned.iter().position(|&o| !o) {
            return Err(GraphError::OrphanEdge(edge));
        }
        if let Some((edge, e)) = edges
            .iter()
            .enumerate()
            .find(|(_, e)| e.dest.0 >= vertices.len())
        {
            return Err(GraphError::BadDest { edge, dest: e.dest });
        }
        Ok(Self { vertices, edges })
    }
}

impl fmt::Display for Graph {
    /// Adjacency-list rendering: a header, then one line per vertex with its
    /// coordinates and the indices it points to (weights in parentheses when
    /// non-zero).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number of vertices: {}", self.vertices.len())?;
        for v in &self.vertices {
            write!(f, "\n[{}] {} ({}, {})", v.index, v.content, v.x, v.y)?;
            for edge in self.edges(v.id()) {
                write!(f, " ->[{}]", edge.dest.0)?;
                if edge.weight != 0 {
                    write!(f, "({})", edge.weight)?;
                }
            }
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn graph_round_trip() {
        let mut g = Graph::new();
        g.add_vertex("A", 1, 2).unwrap();
        g.add_vertex("B", 3, 4).unwrap();
        g.add_edge("A", "B", 6, EdgeType::Bidirectional).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
        assert_eq!(back.find("B"), Some(VertexId(1)));
    }

    fn vertex_json(index: usize, label: &str, edges: &str) -> String {
        format!(r#"{{"index":{index},"content":"{label}","x":0,"y":0,"edges":{edges}}}"#)
    }

    fn graph_json(vertices: &[String], edges: &str) -> String {
        format!(r#"{{"vertices":[{}],"edges":{edges}}}"#, vertices.join(","))
    }

    fn rejection(json: &str) -> String {
        match serde_json::from_str::<Graph>(json) {
            Ok(g) => panic!("accepted malformed graph:\n{g}"),
            Err(e) => e.to_string(),
        }
    }

    #[test]
    fn well_formed_json_loads() {
        let json = graph_json(
            &[vertex_json(0, "A", "[0]"), vertex_json(1, "B", "[]")],
            r#"[{"dest":1,"weight":3}]"#,
        );
        let g: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(g.edges(VertexId(0)).map(Edge::weight).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn edge_id_outside_arena_rejected() {
        let json = graph_json(&[vertex_json(0, "A", "[5]")], "[]");
        assert!(rejection(&json).contains("lists edge 5"));
    }

    #[test]
    fn edge_to_missing_vertex_rejected() {
        let json = graph_json(
            &[vertex_json(0, "A", "[0]"), vertex_json(1, "B", "[]")],
            r#"[{"dest":9,"weight":1}]"#,
        );
        assert!(rejection(&json).contains("missing vertex #9"));
    }

    #[test]
    fn misnumbered_vertex_rejected() {
        let json = graph_json(&[vertex_json(0, "A", "[]"), vertex_json(4, "B", "[]")], "[]");
        assert!(rejection(&json).contains("position 1 claims index 4"));
    }

    #[test]
    fn shared_and_orphan_edges_rejected() {
        let edge = r#"[{"dest":0,"weight":1}]"#;
        let shared = graph_json(&[vertex_json(0, "A", "[0]"), vertex_json(1, "B", "[0]")], edge);
        assert!(rejection(&shared).contains("shared"));

        let orphan = graph_json(&[vertex_json(0, "A", "[]")], edge);
        assert!(rejection(&orphan).contains("belongs to no vertex"));
    }

    #[test]
    fn empty_label_rejected() {
        let json = graph_json(&[vertex_json(0, "", "[]")], "[]");
        assert!(rejection(&json).contains("must not be empty"));
    }
}
