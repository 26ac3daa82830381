use waymark_core::{AllocError, Point};

use crate::graph::VertexId;

/// Reasons a search could not be carried out at all.
///
/// A search that runs and finds no route is not an error: it returns
/// `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The vertex id does not belong to the graph being searched.
    #[error("vertex {0} does not belong to this graph")]
    UnknownVertex(VertexId),
    /// The start or target point lies outside the grid.
    #[error("point {0} lies outside the grid")]
    OutOfBounds(Point),
    /// The grid search was configured with identical open and claimed markers.
    #[error("claimed marker {0:?} is also the open marker")]
    MarkerClash(char),
    /// Scratch or path storage could not be reserved.
    #[error("could not reserve search storage")]
    Exhausted,
}

impl From<AllocError> for SearchError {
    fn from(_: AllocError) -> Self {
        Self::Exhausted
    }
}

/// Allocate a per-call scratch array of `len` copies of `value`.
pub(crate) fn scratch<T: Clone>(len: usize, value: T) -> Result<Vec<T>, SearchError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| SearchError::Exhausted)?;
    v.resize(len, value);
    Ok(v)
}
