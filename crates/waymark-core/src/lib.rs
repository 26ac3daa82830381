//! **waymark-core** — leaf data types for the *waymark* route finder.
//!
//! This crate provides the storage layer shared by every search: geometry
//! primitives, a character occupancy grid, and a doubly-linked
//! double-ended queue used both as a general container and as the path
//! buffer the searches return.

pub mod deque;
pub mod geom;
pub mod grid;

pub use deque::{AllocError, Deque, NodeHandle};
pub use geom::{Point, Range};
pub use grid::{CharGrid, GridError};
