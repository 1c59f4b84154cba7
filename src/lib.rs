//! # grid_wavefront
//!
//! A tick-driven pathfinding visualizer core. An unweighted
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search)
//! wavefront is expanded outward from a start cell one layer per tick, after which a path is
//! traced back from the goal one layer per tick by greedily stepping to the neighbour with the
//! lowest layer label. Movement is restricted to the 4-neighbourhood and all edges have equal
//! cost.
//!
//! The crate contains no rendering or input handling: a front end edits the grid through
//! [SearchEngine::edit], calls [SearchEngine::tick] once per animation frame and reads
//! [SearchEngine::cell_view] and [SearchEngine::status] to draw the result.
pub mod config;
pub mod engine;
pub mod error;
pub mod explorer;
pub mod grid_state;

pub use config::{BacktraceMode, EngineConfig, ExpansionMode};
pub use engine::{EditIntent, Mode, SearchEngine, Status};
pub use error::EngineError;
pub use grid_state::{CellKind, CellView, GridState};

use grid_util::Point;
use smallvec::SmallVec;

/// Default grid width used by [EngineConfig::default].
pub const DEFAULT_WIDTH: usize = 20;
/// Default grid height used by [EngineConfig::default].
pub const DEFAULT_HEIGHT: usize = 20;
/// Prefix of the window title a front end shows, see [Status::title].
pub const STATUS_TITLE_BASE: &str = "A* algorithm visualization";

pub(crate) const N_SMALLVEC_SIZE: usize = 4;

/// Offsets of the 4-neighbourhood in the order in which neighbours are examined: left, right,
/// up, down. Both search phases depend on this order for tie-breaking.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Returns the four orthogonal neighbours of `point` in left, right, up, down order. Points
/// outside of any grid are included; callers filter them with a bounds check.
pub fn ordered_neighborhood(point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
    NEUMANN_OFFSETS
        .iter()
        .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighborhood_order() {
        let n = ordered_neighborhood(&Point::new(3, 5));
        assert_eq!(
            n.as_slice(),
            &[
                Point::new(2, 5),
                Point::new(4, 5),
                Point::new(3, 4),
                Point::new(3, 6)
            ]
        );
    }
}
