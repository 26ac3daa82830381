//! Recursive backtracking over a character grid.
//!
//! The search works on a private copy of the caller's grid. Entering a cell
//! rewrites it from the open marker to the claimed marker, then the four
//! orthogonal neighbours are tried east, south, west, north. The first chain
//! reaching the target wins and is returned as-is.
//!
//! What happens to a cell on a failed branch depends on the
//! [`VisitPolicy`]:
//!
//! - [`VisitPolicy::Monotonic`] (the default) leaves the cell claimed. Each
//!   cell is entered at most once, bounding the work to `rows * cols`
//!   visits. On a 4-connected grid this still finds a path whenever one
//!   exists: a cell abandoned by a failed branch has had every open
//!   neighbour explored, so nothing reachable through it was missed.
//! - [`VisitPolicy::PathLocal`] reverts the cell to open, so only cells on
//!   the current path are off limits. It enumerates simple paths and takes
//!   exponential time when the target is unreachable across an open area;
//!   a sealed target in an 8x8 open room is already out of reach.
//!
//! Either way the returned path is simple and contiguous. Recursion depth is
//! bounded by the number of open cells.

use waymark_core::{CharGrid, Deque, Point};

use crate::error::SearchError;

/// What a failed branch does to the cells it claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisitPolicy {
    /// Keep cells claimed for the rest of the search.
    #[default]
    Monotonic,
    /// Unclaim cells when backtracking out of them. Exponential on open
    /// maps with no route.
    PathLocal,
}

/// Grid backtracking search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSearch {
    open: char,
    claimed: char,
    policy: VisitPolicy,
}

impl Default for GridSearch {
    fn default() -> Self {
        Self {
            open: '0',
            claimed: '1',
            policy: VisitPolicy::default(),
        }
    }
}

impl GridSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Character marking a walkable cell.
    pub fn with_open(mut self, open: char) -> Self {
        self.open = open;
        self
    }

    /// Character written into the working copy for cells on the path.
    pub fn with_claimed(mut self, claimed: char) -> Self {
        self.claimed = claimed;
        self
    }

    pub fn with_policy(mut self, policy: VisitPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn policy(&self) -> VisitPolicy {
        self.policy
    }

    /// Find a path of orthogonal steps from `start` to `target`.
    ///
    /// Returns the visited points in start→target order, `Ok(None)` when no
    /// path exists (including a blocked start or target), or an error when
    /// an endpoint is outside the grid or storage runs out. `grid` is never
    /// modified.
    pub fn search(
        &self,
        grid: &CharGrid,
        start: Point,
        target: Point,
    ) -> Result<Option<Deque<Point>>, SearchError> {
        if self.open == self.claimed {
            return Err(SearchError::MarkerClash(self.claimed));
        }
        for p in [start, target] {
            if !grid.contains(p) {
                log::warn!("grid search endpoint {p} outside {}", grid.bounds());
                return Err(SearchError::OutOfBounds(p));
            }
        }

        let mut work = grid.try_clone().map_err(|_| SearchError::Exhausted)?;
        let mut path = Deque::new();
        if self.explore(&mut work, start, target, &mut path)? {
            Ok(Some(path))
        } else {
            log::debug!("no grid path from {start} to {target}");
            Ok(None)
        }
    }

    fn explore(
        &self,
        work: &mut CharGrid,
        p: Point,
        target: Point,
        path: &mut Deque<Point>,
    ) -> Result<bool, SearchError> {
        if work.at(p) != Some(self.open) {
            return Ok(false);
        }
        work.set(p, self.claimed);
        path.push_back(p)?;
        log::debug!("Checking coordinates {p}");

        if p == target {
            return Ok(true);
        }
        for next in p.neighbors_4() {
            if self.explore(work, next, target, path)? {
                return Ok(true);
            }
        }

        path.pop_back();
        if self.policy == VisitPolicy::PathLocal {
            work.set(p, self.open);
        }
        Ok(false)
    }
}

/// Backtracking search with the default configuration: `'0'` is open and
/// every cell is entered at most once.
pub fn backtracking_array(
    grid: &CharGrid,
    start: Point,
    target: Point,
) -> Result<Option<Deque<Point>>, SearchError> {
    GridSearch::default().search(grid, start, target)
}
