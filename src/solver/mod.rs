//! This module contains the solver infrastructure: the heuristic traits, the
//! grouping of cells into rows, columns and quadrants, and the [Solver] that
//! schedules heuristics over the dirty regions recorded in the grid's work
//! sets.
//!
//! Heuristics come in three shapes. A [CellHeuristic] examines a single cell
//! and its peers, a [GroupHeuristic] examines one [Group] of mutually
//! exclusive cells, and a [GridHeuristic] examines the entire grid. The
//! solver runs cell heuristics for every dirty cell, group heuristics for
//! every dirty row and column and every quadrant containing a dirty cell,
//! and grid heuristics once per pass.

pub mod heuristics;

use crate::{Grid, WorkSet};

use heuristics::{
    AllButOneKnown,
    ClosedSubset,
    CombinationRemover,
    MatchingLineSubsets,
    SingleValueInCell,
    UniqueValueLeft
};

use log::{debug, info, log_enabled, Level};

use std::fmt::{self, Display, Formatter};

/// Identifies a [Group] for scheduling and log messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GroupLabel {

    /// A grid row, identified by its 0-based index.
    Row(usize),

    /// A grid column, identified by its 0-based index.
    Column(usize),

    /// A quadrant, identified by the position of its top-left cell.
    Quadrant(usize, usize)
}

impl Display for GroupLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GroupLabel::Row(row) => write!(f, "row {}", row),
            GroupLabel::Column(col) => write!(f, "column {}", col),
            GroupLabel::Quadrant(row, col) =>
                write!(f, "quadrant at ({}, {})", row, col)
        }
    }
}

/// A set of cell positions that must hold pairwise different values: a row,
/// a column or a quadrant. Group heuristics are written once against this
/// abstraction and apply to all three.
pub struct Group {
    label: GroupLabel,
    positions: Vec<(usize, usize)>
}

impl Group {

    /// Creates the group holding the cells of the given row.
    pub fn row(grid: &Grid, row: usize) -> Group {
        Group {
            label: GroupLabel::Row(row),
            positions: grid.row_positions(row)
        }
    }

    /// Creates the group holding the cells of the given column.
    pub fn column(grid: &Grid, col: usize) -> Group {
        Group {
            label: GroupLabel::Column(col),
            positions: grid.col_positions(col)
        }
    }

    /// Creates the group holding the cells of the quadrant whose top-left
    /// corner is at `(qrow0, qcol0)`.
    pub fn quadrant(grid: &Grid, qrow0: usize, qcol0: usize) -> Group {
        Group {
            label: GroupLabel::Quadrant(qrow0, qcol0),
            positions: grid.quadrant_positions(qrow0, qcol0)
        }
    }

    /// The label identifying this group.
    pub fn label(&self) -> GroupLabel {
        self.label
    }

    /// The positions of this group's cells.
    pub fn positions(&self) -> &[(usize, usize)] {
        &self.positions
    }
}

/// A heuristic that draws conclusions from a single cell and its related
/// cells. Returns `true` if and only if it changed the grid.
pub trait CellHeuristic {

    /// Applies this heuristic to the cell at the given position.
    fn apply(&self, grid: &mut Grid, row: usize, col: usize) -> bool;
}

/// A heuristic that draws conclusions from the cells of one [Group]. Returns
/// `true` if and only if it changed the grid.
pub trait GroupHeuristic {

    /// Applies this heuristic to the given group.
    fn apply(&self, grid: &mut Grid, group: &Group) -> bool;
}

/// A heuristic that draws conclusions from the grid as a whole. Returns
/// `true` if and only if it changed the grid.
pub trait GridHeuristic {

    /// Applies this heuristic to the grid.
    fn apply(&self, grid: &mut Grid) -> bool;
}

/// Drives a set of heuristics to their common fixpoint over a [Grid].
///
/// The solver runs in passes. Each pass consumes the work set the previous
/// pass accumulated and schedules heuristics only for the regions flagged
/// dirty in it; changes made during the pass accumulate in the next work set.
/// When a pass ends without having recorded any work, no heuristic can make
/// further progress and solving stops.
///
/// Reaching the fixpoint does not guarantee a solution. The caller decides
/// via [Grid::is_fully_known] whether the puzzle was solved or the heuristics
/// stalled.
pub struct Solver {
    cell_heuristics: Vec<Box<dyn CellHeuristic>>,
    group_heuristics: Vec<Box<dyn GroupHeuristic>>,
    grid_heuristics: Vec<Box<dyn GridHeuristic>>
}

impl Solver {

    /// Creates a solver equipped with the full set of deduction heuristics
    /// this crate implements.
    pub fn new() -> Solver {
        Solver {
            cell_heuristics: vec![
                Box::new(SingleValueInCell)
            ],
            group_heuristics: vec![
                Box::new(AllButOneKnown),
                Box::new(UniqueValueLeft),
                Box::new(CombinationRemover),
                Box::new(ClosedSubset)
            ],
            grid_heuristics: vec![
                Box::new(MatchingLineSubsets)
            ]
        }
    }

    /// Solves the given grid as far as the heuristics carry, mutating it in
    /// place, and returns the number of passes that were run.
    pub fn solve(&self, grid: &mut Grid) -> usize {
        grid.prepare();
        let mut passes = 0;

        while grid.has_pending_work() {
            grid.start_next_cycle();
            passes += 1;
            info!("starting pass {}", passes);

            if log_enabled!(Level::Debug) {
                debug!("candidate matrix:\n{}", grid);
                debug!("dirty cells:\n{}", grid.current_work().dump());
            }

            let work = grid.current_work().clone();

            self.run_cell_heuristics(grid, &work);
            self.run_group_heuristics(grid, &work);

            for heuristic in &self.grid_heuristics {
                heuristic.apply(grid);
            }
        }

        info!("no more work after {} passes", passes);
        passes
    }

    fn run_cell_heuristics(&self, grid: &mut Grid, work: &WorkSet) {
        let side = grid.side_cell_count();

        for row in 0..side {
            for col in 0..side {
                if !work.cell(row, col) {
                    continue;
                }

                for heuristic in &self.cell_heuristics {
                    if heuristic.apply(grid, row, col) {
                        // changing a peer can in turn enable deductions
                        // about this cell's surroundings next pass
                        grid.mark_modified(row, col);
                    }
                }
            }
        }
    }

    fn run_group_heuristics(&self, grid: &mut Grid, work: &WorkSet) {
        let side = grid.side_cell_count();
        let quadrant_side = grid.quadrant_side_len();

        for row in 0..side {
            if work.row(row) {
                let group = Group::row(grid, row);
                self.apply_group_heuristics(grid, &group);
            }
        }

        for col in 0..side {
            if work.col(col) {
                let group = Group::column(grid, col);
                self.apply_group_heuristics(grid, &group);
            }
        }

        for qrow in 0..quadrant_side {
            for qcol in 0..quadrant_side {
                let qrow0 = qrow * quadrant_side;
                let qcol0 = qcol * quadrant_side;

                if work.quadrant_has_dirty_cell(qrow0, qcol0) {
                    let group = Group::quadrant(grid, qrow0, qcol0);
                    self.apply_group_heuristics(grid, &group);
                }
            }
        }
    }

    fn apply_group_heuristics(&self, grid: &mut Grid, group: &Group) {
        for heuristic in &self.group_heuristics {
            heuristic.apply(grid, group);
        }
    }
}

impl Default for Solver {
    fn default() -> Solver {
        Solver::new()
    }
}
