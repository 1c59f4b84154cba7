//! The two phases of a search. Each phase advances by exactly one layer per call to
//! [PhaseStep::step] and leaves the grid and [SearchState] consistent on return.
use crate::grid_state::GridState;
use grid_util::Point;

pub mod backward;
pub mod forward;

pub use backward::BackwardReconstructor;
pub use forward::ForwardExplorer;

/// Counters shared by both phases. `current_step` counts the layers expanded so far while
/// exploring and the layers left to trace while reconstructing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    pub current_step: u32,
    pub found_end: bool,
    /// Reconstruction cursor, [None] meaning the trace still sits on the end cell.
    pub back_pos: Option<Point>,
    /// Every cursor value committed during reconstruction, end side first.
    pub trace: Vec<Point>,
}

/// Result of advancing a phase by one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The phase made progress and wants to be called again.
    Continue,
    /// The wavefront touched the end cell.
    GoalFound,
    /// The wavefront has no unvisited cells left to expand into.
    Exhausted,
    /// The trace has been walked back to the start.
    Complete,
}

pub trait PhaseStep {
    fn step(&self, grid: &mut GridState, state: &mut SearchState) -> StepOutcome;
}
