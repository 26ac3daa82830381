//! Recursive backtracking over a [`Graph`].
//!
//! A vertex is marked visited while it is on the current path and unmarked
//! again when every edge out of it has failed, so a different branch may
//! pass through it later. Edges are tried in insertion order and the route
//! is assembled by prepending each vertex as successful frames unwind.

use waymark_core::Deque;

use crate::error::{SearchError, scratch};
use crate::graph::{Graph, VertexId};
use crate::route::Route;

struct Backtrack<'g> {
    graph: &'g Graph,
    target: VertexId,
    visited: Vec<bool>,
    path: Deque<VertexId>,
}

impl Backtrack<'_> {
    /// Returns the cost from `current` to the target, or `None` when no
    /// route continues the current path.
    fn explore(&mut self, current: VertexId) -> Result<Option<u64>, SearchError> {
        if self.visited[current.0] {
            return Ok(None);
        }
        let graph = self.graph;
        if let Some(v) = graph.vertex(current) {
            log::debug!("Checking {}", v.content());
        }

        if current == self.target {
            self.path.push_front(current)?;
            return Ok(Some(0));
        }

        self.visited[current.0] = true;
        for edge in graph.edges(current) {
            if let Some(rest) = self.explore(edge.dest())? {
                self.path.push_front(current)?;
                return Ok(Some(rest + u64::from(edge.weight())));
            }
        }
        self.visited[current.0] = false;
        Ok(None)
    }
}

/// Depth-first route from `start` to `target` with its total weight.
///
/// The route is the first one found in edge-insertion order, not
/// necessarily the cheapest; it never repeats a vertex.
pub fn backtracking_route(
    graph: &Graph,
    start: VertexId,
    target: VertexId,
) -> Result<Option<Route>, SearchError> {
    for id in [start, target] {
        if !graph.contains(id) {
            return Err(SearchError::UnknownVertex(id));
        }
    }

    let mut search = Backtrack {
        graph,
        target,
        visited: scratch(graph.len(), false)?,
        path: Deque::new(),
    };
    match search.explore(start)? {
        Some(cost) => Ok(Some(Route::new(search.path, cost))),
        None => {
            log::debug!("no route from {start} to {target}");
            Ok(None)
        }
    }
}

/// Backtracking search returning the vertex labels from start to target.
pub fn backtracking_graph(
    graph: &Graph,
    start: VertexId,
    target: VertexId,
) -> Result<Option<Deque<String>>, SearchError> {
    backtracking_route(graph, start, target)?
        .map(|route| route.labels(graph))
        .transpose()
}
