use gridwalk_core::{Cell, GridError};
use gridwalk_search::ParseAlgorithmError;
use thiserror::Error;

/// Precondition failures reported by [`Session`](crate::Session).
///
/// A call that returns one of these leaves the session unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no start cell has been placed")]
    MissingStart,
    #[error("no target cell has been placed")]
    MissingTarget,
    #[error("a search is running; reset it before editing")]
    SearchRunning,
    #[error("no search has been started")]
    NoActiveSearch,
    #[error("depth limit must be at least 1, got {0}")]
    InvalidDepthLimit(usize),
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: i32, cols: i32 },
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Cell),
    #[error("unknown algorithm \u{201c}{0}\u{201d}")]
    UnknownAlgorithm(String),
    #[error("unknown preset \u{201c}{0}\u{201d}")]
    UnknownPreset(String),
    #[error("cell {0} holds the start or target and cannot become a wall")]
    ReservedCell(Cell),
    #[error("malformed grid: {0}")]
    MalformedGrid(String),
}

impl From<GridError> for SessionError {
    fn from(e: GridError) -> Self {
        match e {
            GridError::OutOfBounds(c) => Self::OutOfBounds(c),
            GridError::Reserved(c) => Self::ReservedCell(c),
            GridError::Malformed(why) => Self::MalformedGrid(why),
        }
    }
}

impl From<ParseAlgorithmError> for SessionError {
    fn from(e: ParseAlgorithmError) -> Self {
        Self::UnknownAlgorithm(e.0)
    }
}
