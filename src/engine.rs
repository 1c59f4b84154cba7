use core::fmt;
use grid_util::Point;
use log::{debug, info, warn};

use crate::config::EngineConfig;
use crate::explorer::{
    BackwardReconstructor, ForwardExplorer, PhaseStep, SearchState, StepOutcome,
};
use crate::grid_state::{CellKind, CellView, GridState};
use crate::{EngineError, STATUS_TITLE_BASE};

/// Run mode of a [SearchEngine]. [Mode::Finished] and [Mode::NoPathFound] are terminal and only
/// left through [SearchEngine::reset].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Idle,
    Exploring,
    Reconstructing,
    Finished,
    NoPathFound,
}

impl Mode {
    pub fn is_running(self) -> bool {
        matches!(self, Mode::Exploring | Mode::Reconstructing)
    }
    pub fn is_terminal(self) -> bool {
        matches!(self, Mode::Finished | Mode::NoPathFound)
    }
}

/// What a click on a cell does while the engine is idle. Owned by the front end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditIntent {
    #[default]
    Block,
    Clear,
    SetStart,
    SetEnd,
}

/// Status line shown by a front end, combining the run mode with the current edit intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Editing(EditIntent),
    Running,
    Finished,
    NoPathFound,
}

impl Status {
    /// Full window title, e.g. `A* algorithm visualization | running`.
    pub fn title(&self) -> String {
        format!("{} | {}", STATUS_TITLE_BASE, self)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Status::Editing(EditIntent::Block) => "place blocks",
            Status::Editing(EditIntent::Clear) => "clear blocks",
            Status::Editing(EditIntent::SetStart) => "place start",
            Status::Editing(EditIntent::SetEnd) => "place end",
            Status::Running => "running",
            Status::Finished => "finished",
            Status::NoPathFound => "no path found",
        };
        write!(f, "{}", text)
    }
}

/// [SearchEngine] owns the grid and the search counters and is the only thing a front end talks
/// to. The grid is edited while idle, after which [start](Self::start) arms the search and every
/// [tick](Self::tick) advances it by one layer: first outward from the start until the end is
/// touched, then back from the end until the trace reaches the start.
#[derive(Clone, Debug)]
pub struct SearchEngine {
    config: EngineConfig,
    grid: GridState,
    state: SearchState,
    mode: Mode,
    forward: ForwardExplorer,
    backward: BackwardReconstructor,
}

impl Default for SearchEngine {
    fn default() -> SearchEngine {
        SearchEngine::from_valid_config(EngineConfig::default())
    }
}

impl SearchEngine {
    /// Creates an engine with the default configuration and the given dimensions.
    pub fn new(width: usize, height: usize) -> Result<SearchEngine, EngineError> {
        SearchEngine::with_config(EngineConfig::new(width, height))
    }
    pub fn with_config(config: EngineConfig) -> Result<SearchEngine, EngineError> {
        if config.width == 0 || config.height == 0 {
            return Err(EngineError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }
        Ok(SearchEngine::from_valid_config(config))
    }
    fn from_valid_config(config: EngineConfig) -> SearchEngine {
        SearchEngine {
            config,
            grid: GridState::new(config.width, config.height),
            state: SearchState::default(),
            mode: Mode::Idle,
            forward: ForwardExplorer::new(config.expansion),
            backward: BackwardReconstructor::new(config.backtrace),
        }
    }

    /// Applies a front end edit to the cell at `pos`. Only allowed while idle.
    pub fn edit(&mut self, pos: Point, intent: EditIntent) -> Result<(), EngineError> {
        if self.mode != Mode::Idle {
            return Err(EngineError::InvalidState(
                "the grid can only be edited while idle",
            ));
        }
        match intent {
            EditIntent::Block => self.grid.set_cell(pos, CellKind::Blocked),
            EditIntent::Clear => self.grid.clear_cell(pos),
            EditIntent::SetStart => self.grid.set_cell(pos, CellKind::Start),
            EditIntent::SetEnd => self.grid.set_cell(pos, CellKind::End),
        }
    }

    /// Arms the search. Requires both a start and an end cell.
    pub fn start(&mut self) -> Result<(), EngineError> {
        match self.mode {
            Mode::Idle => {}
            Mode::Exploring | Mode::Reconstructing => return Err(EngineError::AlreadyRunning),
            Mode::Finished | Mode::NoPathFound => {
                return Err(EngineError::InvalidState(
                    "the search has ended, reset is required",
                ))
            }
        }
        let (start, end) = match (self.grid.start(), self.grid.end()) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(EngineError::InvalidState(
                    "start and end must both be placed",
                ))
            }
        };
        if !self.reachable() {
            warn!("{} is not reachable from {}, the search will exhaust", end, start);
        }
        info!("Starting search from {} to {}", start, end);
        self.state = SearchState::default();
        self.mode = Mode::Exploring;
        Ok(())
    }

    /// Advances the search by one step and returns the resulting mode. Does nothing while idle or
    /// after the search has ended.
    pub fn tick(&mut self) -> Mode {
        match self.mode {
            Mode::Idle | Mode::Finished | Mode::NoPathFound => {}
            Mode::Exploring if self.state.found_end => {
                debug!("Switching to reconstruction");
                self.mode = Mode::Reconstructing;
                self.reconstruct();
            }
            Mode::Exploring => {
                match self.forward.step(&mut self.grid, &mut self.state) {
                    StepOutcome::Exhausted => {
                        info!(
                            "No path found after {} layers",
                            self.state.current_step
                        );
                        self.mode = Mode::NoPathFound;
                    }
                    StepOutcome::GoalFound => {
                        info!("Reached the end at layer {}", self.state.current_step);
                    }
                    _ => {}
                }
            }
            Mode::Reconstructing => self.reconstruct(),
        }
        self.mode
    }

    fn reconstruct(&mut self) {
        if self.backward.step(&mut self.grid, &mut self.state) == StepOutcome::Complete {
            info!("Finished tracing {} cells back", self.state.trace.len());
            self.mode = Mode::Finished;
        }
    }

    /// Ticks until the search ends or `max_ticks` ticks have been spent. Returns the number of
    /// ticks taken.
    pub fn run_to_completion(&mut self, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while self.mode.is_running() && ticks < max_ticks {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    /// Clears the grid, including the start and end cells, and returns to [Mode::Idle]. Valid in
    /// any mode.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.state = SearchState::default();
        self.mode = Mode::Idle;
        info!("Search engine reset");
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
    /// Status for the front end given its current edit intent, which only matters while idle.
    pub fn status(&self, intent: EditIntent) -> Status {
        match self.mode {
            Mode::Idle => Status::Editing(intent),
            Mode::Exploring | Mode::Reconstructing => Status::Running,
            Mode::Finished => Status::Finished,
            Mode::NoPathFound => Status::NoPathFound,
        }
    }
    pub fn cell_view(&self, pos: Point) -> Result<CellView, EngineError> {
        self.grid.get_cell(pos)
    }
    pub fn grid(&self) -> &GridState {
        &self.grid
    }
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
    pub fn width(&self) -> usize {
        self.grid.width()
    }
    pub fn height(&self) -> usize {
        self.grid.height()
    }
    pub fn current_step(&self) -> u32 {
        self.state.current_step
    }
    pub fn found_end(&self) -> bool {
        self.state.found_end
    }
    pub fn back_pos(&self) -> Option<Point> {
        self.state.back_pos
    }
    /// Cursor positions committed during reconstruction, end side first.
    pub fn trace(&self) -> &[Point] {
        &self.state.trace
    }

    /// The reconstructed route from start to end, available once the search has finished.
    pub fn path(&self) -> Option<Vec<Point>> {
        if self.mode != Mode::Finished {
            return None;
        }
        let start = self.grid.start()?;
        let end = self.grid.end()?;
        let mut path = vec![start];
        path.extend(self.state.trace.iter().rev().filter(|p| **p != start));
        path.push(end);
        Some(path)
    }

    /// Checks whether the end cell can be reached from the start cell at all, using the
    /// connected components of the non-blocked cells.
    pub fn reachable(&mut self) -> bool {
        self.grid.update();
        self.grid.reachable()
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.status(EditIntent::default()))?;
        write!(f, "{}", self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(width: usize, height: usize, start: Point, end: Point) -> SearchEngine {
        let mut engine = SearchEngine::new(width, height).unwrap();
        engine.edit(start, EditIntent::SetStart).unwrap();
        engine.edit(end, EditIntent::SetEnd).unwrap();
        engine
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            SearchEngine::new(0, 5).unwrap_err(),
            EngineError::InvalidDimensions {
                width: 0,
                height: 5
            }
        );
    }

    #[test]
    fn default_engine_is_20x20_and_idle() {
        let engine = SearchEngine::default();
        assert_eq!((engine.width(), engine.height()), (20, 20));
        assert_eq!(engine.mode(), Mode::Idle);
    }

    #[test]
    fn start_requires_both_endpoints() {
        let mut engine = SearchEngine::new(3, 3).unwrap();
        assert!(matches!(engine.start(), Err(EngineError::InvalidState(_))));
        engine.edit(Point::new(0, 0), EditIntent::SetStart).unwrap();
        assert!(matches!(engine.start(), Err(EngineError::InvalidState(_))));
        engine.edit(Point::new(2, 2), EditIntent::SetEnd).unwrap();
        assert!(engine.start().is_ok());
        assert_eq!(engine.mode(), Mode::Exploring);
        assert_eq!(engine.start(), Err(EngineError::AlreadyRunning));
    }

    #[test]
    fn edits_are_rejected_while_not_idle() {
        let mut engine = engine_with(3, 1, Point::new(0, 0), Point::new(2, 0));
        engine.start().unwrap();
        assert!(matches!(
            engine.edit(Point::new(1, 0), EditIntent::Block),
            Err(EngineError::InvalidState(_))
        ));
        engine.run_to_completion(100);
        assert_eq!(engine.mode(), Mode::Finished);
        assert!(matches!(
            engine.edit(Point::new(1, 0), EditIntent::Clear),
            Err(EngineError::InvalidState(_))
        ));
        assert!(matches!(engine.start(), Err(EngineError::InvalidState(_))));
    }

    #[test]
    fn out_of_bounds_edit() {
        let mut engine = SearchEngine::new(3, 3).unwrap();
        let p = Point::new(3, 1);
        assert_eq!(
            engine.edit(p, EditIntent::Block),
            Err(EngineError::OutOfBounds(p))
        );
        assert_eq!(engine.cell_view(p), Err(EngineError::OutOfBounds(p)));
    }

    #[test]
    fn tick_is_noop_while_idle() {
        let mut engine = engine_with(3, 1, Point::new(0, 0), Point::new(2, 0));
        assert_eq!(engine.tick(), Mode::Idle);
        assert_eq!(engine.current_step(), 0);
        assert_eq!(
            engine.cell_view(Point::new(1, 0)).unwrap().kind,
            CellKind::Unchecked
        );
    }

    #[test]
    fn goal_switches_mode_on_next_tick() {
        let mut engine = engine_with(3, 1, Point::new(0, 0), Point::new(2, 0));
        engine.start().unwrap();
        assert_eq!(engine.tick(), Mode::Exploring);
        assert_eq!(engine.tick(), Mode::Exploring);
        assert!(engine.found_end());
        assert_eq!(engine.current_step(), 2);
        assert_eq!(engine.tick(), Mode::Reconstructing);
        assert_eq!(engine.current_step(), 1);
    }

    #[test]
    fn adjacent_endpoints() {
        let mut engine = engine_with(2, 1, Point::new(0, 0), Point::new(1, 0));
        engine.start().unwrap();
        assert_eq!(engine.run_to_completion(10), 3);
        assert_eq!(engine.mode(), Mode::Finished);
        assert!(engine.trace().is_empty());
        assert_eq!(
            engine.path(),
            Some(vec![Point::new(0, 0), Point::new(1, 0)])
        );
    }

    #[test]
    fn path_runs_from_start_to_end() {
        let mut engine = engine_with(4, 1, Point::new(0, 0), Point::new(3, 0));
        assert_eq!(engine.path(), None);
        engine.start().unwrap();
        engine.run_to_completion(100);
        assert_eq!(
            engine.path(),
            Some(vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(3, 0)
            ])
        );
    }

    #[test]
    fn reachable_reports_components() {
        let mut engine = engine_with(3, 3, Point::new(0, 0), Point::new(2, 2));
        assert!(engine.reachable());
        for y in 0..3 {
            engine.edit(Point::new(1, y), EditIntent::Block).unwrap();
        }
        assert!(!engine.reachable());
    }

    #[test]
    fn status_follows_mode() {
        let mut engine = engine_with(3, 1, Point::new(0, 0), Point::new(2, 0));
        assert_eq!(
            engine.status(EditIntent::SetEnd),
            Status::Editing(EditIntent::SetEnd)
        );
        assert_eq!(engine.status(EditIntent::Clear).to_string(), "clear blocks");
        engine.start().unwrap();
        assert_eq!(engine.status(EditIntent::Clear), Status::Running);
        engine.run_to_completion(100);
        assert_eq!(
            engine.status(EditIntent::Block).title(),
            "A* algorithm visualization | finished"
        );
    }

    #[test]
    fn reset_from_any_mode() {
        let mut engine = engine_with(3, 1, Point::new(0, 0), Point::new(2, 0));
        engine.start().unwrap();
        engine.tick();
        engine.reset();
        assert_eq!(engine.mode(), Mode::Idle);
        assert_eq!(engine.current_step(), 0);
        assert!(!engine.found_end());
        assert_eq!(engine.back_pos(), None);
        assert!(matches!(engine.start(), Err(EngineError::InvalidState(_))));
        for x in 0..3 {
            assert_eq!(
                engine.cell_view(Point::new(x, 0)).unwrap(),
                CellView::default()
            );
        }
    }

    #[test]
    fn display_includes_status_and_grid() {
        let engine = engine_with(3, 1, Point::new(0, 0), Point::new(2, 0));
        assert_eq!(engine.to_string(), "place blocks\nS.E\n");
    }
}
