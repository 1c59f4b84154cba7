use grid_util::Point;
use log::{debug, warn};

use crate::config::BacktraceMode;
use crate::explorer::{PhaseStep, SearchState, StepOutcome};
use crate::grid_state::{CellKind, GridState};

/// Walks back from the end cell one layer per step, greedily moving the cursor to the
/// neighbour with the lowest layer label.
#[derive(Clone, Debug, Default)]
pub struct BackwardReconstructor {
    pub backtrace: BacktraceMode,
}

impl BackwardReconstructor {
    pub fn new(backtrace: BacktraceMode) -> BackwardReconstructor {
        BackwardReconstructor { backtrace }
    }

    /// Picks the next cursor among `candidates`. Ties go to the first candidate in
    /// left, right, up, down order.
    fn select(&self, grid: &GridState, candidates: &[Point]) -> Option<Point> {
        let mut best: Option<(u32, Point)> = None;
        for &p in candidates {
            let label = match (grid.kind(p), self.backtrace) {
                // The scan is abandoned and the previous cursor stays in place
                (CellKind::Start, BacktraceMode::Faithful) => return None,
                (CellKind::Start, BacktraceMode::TrueMinimum) => 0,
                _ => match grid.label(p) {
                    Some(label) => label,
                    None => continue,
                },
            };
            if best.map_or(true, |(lowest, _)| label < lowest) {
                best = Some((label, p));
            }
        }
        best.map(|(_, p)| p)
    }
}

impl PhaseStep for BackwardReconstructor {
    fn step(&self, grid: &mut GridState, state: &mut SearchState) -> StepOutcome {
        if state.current_step == 0 {
            return StepOutcome::Complete;
        }
        state.current_step -= 1;
        let source = match state.back_pos {
            Some(pos) => {
                if grid.kind(pos) != CellKind::Start {
                    grid.mark_used(pos);
                }
                pos
            }
            None => match grid.end() {
                Some(end) => end,
                None => {
                    warn!("Reconstruction started without an end cell");
                    state.current_step = 0;
                    return StepOutcome::Complete;
                }
            },
        };
        let candidates = grid.neighbours_where(&source, |kind| {
            matches!(kind, CellKind::Checked | CellKind::Start)
        });
        if let Some(next) = self.select(grid, &candidates) {
            state.back_pos = Some(next);
            state.trace.push(next);
        }
        debug!(
            "Traced back from {} to {:?}, {} layers left",
            source, state.back_pos, state.current_step
        );
        StepOutcome::Continue
    }
}
