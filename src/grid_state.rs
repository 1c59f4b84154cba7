use crate::{ordered_neighborhood, EngineError};
use core::fmt;
use grid_util::{Point, SimpleValueGrid, ValueGrid};
use itertools::iproduct;
use log::info;
use petgraph::unionfind::UnionFind;

/// State of a single cell. Only [CellKind::Checked] cells carry a layer label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    #[default]
    Unchecked,
    Checked,
    Used,
    Blocked,
    Start,
    End,
}

impl CellKind {
    pub fn is_endpoint(self) -> bool {
        matches!(self, CellKind::Start | CellKind::End)
    }
}

/// Read-only snapshot of a cell as handed to a front end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellView {
    pub kind: CellKind,
    pub label: Option<u32>,
}

/// [GridState] owns the cell kinds and layer labels of a fixed size grid together with the
/// positions of the (at most one) start and end cell. Connected components of the non-blocked
/// cells are maintained in a [UnionFind] so reachability can be queried before a search is
/// started.
#[derive(Clone, Debug)]
pub struct GridState {
    kinds: SimpleValueGrid<CellKind>,
    labels: SimpleValueGrid<Option<u32>>,
    start: Option<Point>,
    end: Option<Point>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl GridState {
    pub fn new(width: usize, height: usize) -> GridState {
        GridState {
            kinds: SimpleValueGrid::new(width, height, CellKind::Unchecked),
            labels: SimpleValueGrid::new(width, height, None),
            start: None,
            end: None,
            components: UnionFind::new(width * height),
            components_dirty: true,
        }
    }
    pub fn width(&self) -> usize {
        self.kinds.width()
    }
    pub fn height(&self) -> usize {
        self.kinds.height()
    }
    pub fn in_bounds(&self, pos: &Point) -> bool {
        self.kinds.point_in_bounds(*pos)
    }
    fn check_bounds(&self, pos: Point) -> Result<(), EngineError> {
        if self.in_bounds(&pos) {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds(pos))
        }
    }
    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Sets the kind of the cell at `pos`. Placing a start or end cell first clears the previous
    /// start or end cell, so each exists at most once. Overwriting a start or end cell releases
    /// the corresponding reference. Search marks ([CellKind::Checked], [CellKind::Used]) can only
    /// be written by the search itself.
    pub fn set_cell(&mut self, pos: Point, kind: CellKind) -> Result<(), EngineError> {
        self.check_bounds(pos)?;
        if matches!(kind, CellKind::Checked | CellKind::Used) {
            return Err(EngineError::InvalidState(
                "search marks cannot be placed by an edit",
            ));
        }
        self.release_endpoint(pos);
        match kind {
            CellKind::Start => {
                if let Some(old) = self.start.take() {
                    self.write(old, CellKind::Unchecked);
                }
                self.start = Some(pos);
            }
            CellKind::End => {
                if let Some(old) = self.end.take() {
                    self.write(old, CellKind::Unchecked);
                }
                self.end = Some(pos);
            }
            _ => {}
        }
        self.write(pos, kind);
        Ok(())
    }

    /// Resets the cell at `pos` to [CellKind::Unchecked], releasing a start or end reference.
    pub fn clear_cell(&mut self, pos: Point) -> Result<(), EngineError> {
        self.check_bounds(pos)?;
        self.release_endpoint(pos);
        self.write(pos, CellKind::Unchecked);
        Ok(())
    }

    pub fn get_cell(&self, pos: Point) -> Result<CellView, EngineError> {
        self.check_bounds(pos)?;
        Ok(CellView {
            kind: self.kind(pos),
            label: self.label(pos),
        })
    }

    /// Restores every cell to [CellKind::Unchecked] without a label and forgets the endpoints.
    pub fn clear(&mut self) {
        for p in self.positions() {
            self.kinds.set_point(p, CellKind::Unchecked);
            self.labels.set_point(p, None);
        }
        self.start = None;
        self.end = None;
        self.components_dirty = true;
    }

    fn release_endpoint(&mut self, pos: Point) {
        match self.kind(pos) {
            CellKind::Start => self.start = None,
            CellKind::End => self.end = None,
            _ => {}
        }
    }

    /// Writes a kind produced by an edit. Joins newly connected components and flags the
    /// components as dirty if they are (potentially) broken apart.
    fn write(&mut self, pos: Point, kind: CellKind) {
        if kind == CellKind::Blocked {
            if self.kind(pos) != CellKind::Blocked {
                self.components_dirty = true;
            }
        } else if !self.components_dirty {
            let ix = self.kinds.get_ix_point(&pos);
            for n in ordered_neighborhood(&pos) {
                if self.in_bounds(&n) && self.kind(n) != CellKind::Blocked {
                    let n_ix = self.kinds.get_ix_point(&n);
                    self.components.union(ix, n_ix);
                }
            }
        }
        self.kinds.set_point(pos, kind);
        self.labels.set_point(pos, None);
    }

    pub(crate) fn kind(&self, pos: Point) -> CellKind {
        self.kinds.get_point(pos)
    }
    pub(crate) fn label(&self, pos: Point) -> Option<u32> {
        self.labels.get_point(pos)
    }

    /// Labels a newly discovered cell. Labels are write-once: a cell is only ever discovered
    /// while it is still [CellKind::Unchecked].
    pub(crate) fn mark_checked(&mut self, pos: Point, label: u32) {
        debug_assert_eq!(self.kind(pos), CellKind::Unchecked);
        debug_assert!(self.label(pos).is_none());
        self.kinds.set_point(pos, CellKind::Checked);
        self.labels.set_point(pos, Some(label));
    }
    /// Marks a cell as part of the reconstructed path. The label is kept for display.
    pub(crate) fn mark_used(&mut self, pos: Point) {
        self.kinds.set_point(pos, CellKind::Used);
    }

    /// All positions, column by column.
    pub fn positions(&self) -> impl Iterator<Item = Point> {
        iproduct!(0..self.width() as i32, 0..self.height() as i32).map(|(x, y)| Point::new(x, y))
    }

    /// In-bounds neighbours of `pos` in left, right, up, down order whose kind satisfies `filter`.
    pub(crate) fn neighbours_where<F>(&self, pos: &Point, filter: F) -> Vec<Point>
    where
        F: Fn(CellKind) -> bool,
    {
        ordered_neighborhood(pos)
            .into_iter()
            .filter(|p| self.in_bounds(p) && filter(self.kind(*p)))
            .collect()
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up non-blocked neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        let w = self.width();
        let h = self.height();
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for point in self.positions() {
            if self.kind(point) == CellKind::Blocked {
                continue;
            }
            let parent_ix = self.kinds.get_ix_point(&point);
            // Right and down suffice to visit every edge once
            for p in [Point::new(point.x + 1, point.y), Point::new(point.x, point.y + 1)] {
                if self.in_bounds(&p) && self.kind(p) != CellKind::Blocked {
                    let ix = self.kinds.get_ix_point(&p);
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }

    /// Checks if the end cell lies on the same component as the start cell. Requires the
    /// components to be up to date, see [update](Self::update).
    pub fn reachable(&self) -> bool {
        debug_assert!(!self.components_dirty);
        match (self.start, self.end) {
            (Some(start), Some(end)) => self
                .components
                .equiv(self.kinds.get_ix_point(&start), self.kinds.get_ix_point(&end)),
            _ => false,
        }
    }
}

impl fmt::Display for GridState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .map(|x| {
                    let p = Point::new(x, y);
                    match self.kind(p) {
                        CellKind::Unchecked => '.',
                        CellKind::Checked => self
                            .label(p)
                            .and_then(|l| char::from_digit(l % 10, 10))
                            .unwrap_or('?'),
                        CellKind::Used => '*',
                        CellKind::Blocked => '#',
                        CellKind::Start => 'S',
                        CellKind::End => 'E',
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
