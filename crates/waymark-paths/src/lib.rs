//! Route search over occupancy grids and weighted graphs.
//!
//! Every search returns a concrete route, not just a reachability answer:
//!
//! - **Grid backtracking** ([`backtracking_array`], [`GridSearch`]) —
//!   recursive depth-first search over a [`CharGrid`](waymark_core::CharGrid),
//!   entering each cell at most once unless [`VisitPolicy::PathLocal`] is
//!   chosen
//! - **Graph backtracking** ([`backtracking_graph`], [`backtracking_route`]) —
//!   recursive depth-first search with path-local visited marks
//! - **Dijkstra** ([`dijkstra_graph`], [`dijkstra_route`]) — cheapest route
//!   by repeated relaxation, reconstructed from a predecessor array
//!
//! Paths come back as a [`Deque`](waymark_core::Deque) in start→target
//! order. All three searches distinguish "no route exists" (`Ok(None)`)
//! from "the search could not run" (`Err(SearchError)`).
//!
//! Each visited cell or vertex is traced at `debug` level through the
//! [`log`] facade.
//!
//! # Preconditions
//!
//! The graph or grid must not change while a search runs; searches borrow
//! it immutably for their whole duration. Both backtracking searches
//! recurse once per path step, so their stack depth is bounded by the
//! number of open cells or vertices.

mod dijkstra;
mod error;
mod graph;
mod graph_search;
mod grid_search;
mod route;

pub use dijkstra::{dijkstra_graph, dijkstra_route};
pub use error::SearchError;
pub use graph::{Edge, EdgeType, Graph, GraphError, Vertex, VertexId};
pub use graph_search::{backtracking_graph, backtracking_route};
pub use grid_search::{GridSearch, VisitPolicy, backtracking_array};
pub use route::Route;
