use grid_util::Point;
use thiserror::Error;

/// Errors returned by the commands of [SearchEngine](crate::SearchEngine). Running out of
/// reachable cells is not an error but the terminal [Mode::NoPathFound](crate::Mode::NoPathFound).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("position {0} lies outside of the grid")]
    OutOfBounds(Point),
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    #[error("the search is already running")]
    AlreadyRunning,
    #[error("grid dimensions {width}x{height} must both be non-zero")]
    InvalidDimensions { width: usize, height: usize },
}
