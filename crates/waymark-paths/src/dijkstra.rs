//! Dijkstra shortest-path search over a [`Graph`].
//!
//! The next vertex to finalize is chosen by a linear scan over all
//! vertices, giving O(V² + E) time with no heap. That suits the modest
//! vertex counts this crate targets.
//!
//! Edge weights are assumed non-negative, which `u32` guarantees; weight
//! `0` edges cost nothing.

use waymark_core::Deque;

use crate::error::{SearchError, scratch};
use crate::graph::{Graph, VertexId};
use crate::route::Route;

/// Tentative distance of a vertex no edge has reached yet.
const UNREACHED: u64 = u64::MAX;

/// The unvisited vertex with the smallest finite distance, lowest index
/// first on ties.
fn closest_unvisited(distance: &[u64], visited: &[bool]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &d) in distance.iter().enumerate() {
        if visited[i] || d == UNREACHED {
            continue;
        }
        if best.is_none_or(|b| d < distance[b]) {
            best = Some(i);
        }
    }
    best
}

/// Cheapest route from `start` to `target`.
///
/// Returns `Ok(None)` if the target cannot be reached. When
/// `start == target` the route is that single vertex at cost 0.
pub fn dijkstra_route(
    graph: &Graph,
    start: VertexId,
    target: VertexId,
) -> Result<Option<Route>, SearchError> {
    let start_label = graph
        .vertex(start)
        .ok_or(SearchError::UnknownVertex(start))?
        .content();
    if !graph.contains(target) {
        return Err(SearchError::UnknownVertex(target));
    }

    let n = graph.len();
    let mut distance = scratch(n, UNREACHED)?;
    let mut visited = scratch(n, false)?;
    let mut via: Vec<Option<VertexId>> = scratch(n, None)?;
    distance[start.0] = 0;

    while let Some(current) = closest_unvisited(&distance, &visited) {
        let d = distance[current];
        let id = VertexId(current);
        if let Some(v) = graph.vertex(id) {
            log::debug!("Checking {}, distance from {start_label} is {d}", v.content());
        }

        for edge in graph.edges(id) {
            let dest = edge.dest().0;
            let candidate = d.saturating_add(u64::from(edge.weight()));
            if candidate < distance[dest] {
                distance[dest] = candidate;
                via[dest] = Some(id);
            }
        }

        visited[current] = true;
        if current == target.0 {
            break;
        }
    }

    if distance[target.0] == UNREACHED {
        log::debug!("no route from {start} to {target}");
        return Ok(None);
    }

    // Walk predecessors back from the target itself. Every vertex other
    // than `start` with a finite distance had `via` set when that distance
    // was assigned, so the chain always ends at `start`.
    let mut path = Deque::new();
    let mut cur = target;
    path.push_front(cur)?;
    while cur != start {
        let Some(prev) = via[cur.0] else {
            return Ok(None);
        };
        path.push_front(prev)?;
        cur = prev;
    }
    Ok(Some(Route::new(path, distance[target.0])))
}

/// Dijkstra search returning the vertex labels from start to target.
pub fn dijkstra_graph(
    graph: &Graph,
    start: VertexId,
    target: VertexId,
) -> Result<Option<Deque<String>>, SearchError> {
    dijkstra_route(graph, start, target)?
        .map(|route| route.labels(graph))
        .transpose()
}
