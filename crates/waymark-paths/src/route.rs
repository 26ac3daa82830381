use waymark_core::Deque;

use crate::error::SearchError;
use crate::graph::{Graph, VertexId};

/// A route through a [`Graph`]: vertex ids from start to target inclusive,
/// plus the summed weight of the edges taken.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    vertices: Deque<VertexId>,
    cost: u64,
}

impl Route {
    pub(crate) fn new(vertices: Deque<VertexId>, cost: u64) -> Self {
        Self { vertices, cost }
    }

    /// Vertices in traversal order, start first.
    pub fn vertices(&self) -> &Deque<VertexId> {
        &self.vertices
    }

    /// Sum of the weights of the traversed edges.
    #[inline]
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Number of vertices on the route (never zero).
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Owned copies of the vertex labels, start first.
    pub fn labels(&self, graph: &Graph) -> Result<Deque<String>, SearchError> {
        let mut out = Deque::with_capacity(self.vertices.len())?;
        for &id in &self.vertices {
            let vertex = graph.vertex(id).ok_or(SearchError::UnknownVertex(id))?;
            out.push_back(vertex.content().to_owned())?;
        }
        Ok(out)
    }

    pub fn into_vertices(self) -> Deque<VertexId> {
        self.vertices
    }
}
