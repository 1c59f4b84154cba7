use grid_util::Point;
use log::debug;

use crate::config::ExpansionMode;
use crate::explorer::{PhaseStep, SearchState, StepOutcome};
use crate::grid_state::{CellKind, GridState};

/// Expands the breadth-first wavefront by one layer per step, starting from the start cell.
#[derive(Clone, Debug, Default)]
pub struct ForwardExplorer {
    pub expansion: ExpansionMode,
}

impl ForwardExplorer {
    pub fn new(expansion: ExpansionMode) -> ForwardExplorer {
        ForwardExplorer { expansion }
    }

    /// The cells of the current layer: the start cell before the first expansion, afterwards
    /// every cell labelled with the current step, in column-major order.
    fn frontier(&self, grid: &GridState, state: &SearchState) -> Vec<Point> {
        if state.current_step == 0 {
            grid.start().into_iter().collect()
        } else {
            grid.positions()
                .filter(|p| grid.label(*p) == Some(state.current_step))
                .collect()
        }
    }
}

impl PhaseStep for ForwardExplorer {
    fn step(&self, grid: &mut GridState, state: &mut SearchState) -> StepOutcome {
        let candidates = self
            .frontier(grid, state)
            .iter()
            .flat_map(|p| {
                grid.neighbours_where(p, |kind| {
                    matches!(kind, CellKind::Unchecked | CellKind::End)
                })
            })
            .collect::<Vec<Point>>();
        if candidates.is_empty() {
            debug!(
                "Wavefront exhausted after layer {} without reaching the end",
                state.current_step
            );
            return StepOutcome::Exhausted;
        }
        state.current_step += 1;
        let layer = state.current_step;
        let mut labelled = 0;
        for p in candidates {
            match grid.kind(p) {
                CellKind::End => {
                    state.found_end = true;
                    if self.expansion == ExpansionMode::StopAtEnd {
                        break;
                    }
                }
                // A cell bordering two frontier cells is collected twice
                CellKind::Unchecked => {
                    grid.mark_checked(p, layer);
                    labelled += 1;
                }
                _ => {}
            }
        }
        debug!("Expanded layer {}: labelled {} cells", layer, labelled);
        if state.found_end {
            StepOutcome::GoalFound
        } else {
            StepOutcome::Continue
        }
    }
}
