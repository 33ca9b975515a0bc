// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_codeblock_attributes)]

//! This crate implements a Sudoku solver that works by pure constraint
//! propagation: every cell tracks the set of values it could still hold, and
//! a library of deduction heuristics shrinks those sets until either every
//! cell is determined or no heuristic can make further progress. No guessing
//! or backtracking is ever performed.
//!
//! The solver handles generalized puzzles whose side length is the square of
//! the quadrant count `k` (`k` ≥ 2), so ordinary 9x9 Sudoku are `k` = 3 and
//! 16x16 puzzles are `k` = 4.
//!
//! # Parsing and solving a puzzle
//!
//! Puzzle input is line oriented: everything after a `#` is a comment, blank
//! lines are skipped, the first meaningful line holds the quadrant count and
//! each following line holds one grid row. Dots mark blank cells, and for
//! quadrant counts of 2 and 3 the single-digit values need no separating
//! whitespace.
//!
//! ```
//! use sudoku_deduce::Grid;
//! use sudoku_deduce::solver::Solver;
//!
//! let mut grid = Grid::parse("
//!     2
//!     . 2 3 4
//!     3 . 1 2
//!     2 1 . 3
//!     4 3 2 .").unwrap();
//!
//! Solver::new().solve(&mut grid);
//!
//! assert!(grid.is_fully_known());
//! assert_eq!(1, grid.cell(0, 0).value());
//! ```
//!
//! # Inspecting the result
//!
//! The solver mutates the grid in place and reports nothing beyond the number
//! of passes it ran; whether the puzzle was actually solved is determined by
//! [Grid::is_fully_known]. A stalled grid is left in its narrowed state, and
//! its `Display` implementation renders the remaining candidate sets of every
//! cell, which is also useful for diagnosing puzzles the heuristics cannot
//! crack.

pub mod error;
pub mod solver;
pub mod util;

use error::{ParseError, ParseErrorKind, ParseResult};
use util::ValueSet;

use std::fmt::{self, Display, Formatter};
use std::mem;

fn index(row: usize, col: usize, side: usize) -> usize {
    row * side + col
}

/// A single position of the grid, holding the set of values the cell could
/// still contain. A cell with exactly one candidate is *known*; parsing a
/// clue produces a known cell right away, while blank cells start out with
/// the full value range and become known through deduction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    row: usize,
    col: usize,
    candidates: ValueSet
}

impl Cell {

    /// The 0-indexed row of this cell.
    pub fn row(&self) -> usize {
        self.row
    }

    /// The 0-indexed column of this cell.
    pub fn col(&self) -> usize {
        self.col
    }

    /// The set of values this cell could still hold.
    pub fn candidates(&self) -> &ValueSet {
        &self.candidates
    }

    /// Indicates whether this cell's value is determined, i.e. exactly one
    /// candidate remains.
    pub fn is_known(&self) -> bool {
        self.candidates.len() == 1
    }

    /// The value of this cell.
    ///
    /// # Panics
    ///
    /// If the cell is not known. Calling this on an undetermined cell is a
    /// bug in the caller, not a recoverable condition.
    pub fn value(&self) -> usize {
        match self.candidates.sole_value() {
            Some(value) => value,
            None => panic!(
                "attempt to get single value from multi-value cell [{}][{}]",
                self.row, self.col)
        }
    }
}

/// A snapshot of which parts of the grid changed and must be re-examined in
/// the upcoming solver pass. The grid keeps two generations of this
/// structure: heuristics read the *current* one and record their own changes
/// into the *next* one, which the solver swaps in at the start of each pass.
///
/// Dirtiness is tracked per cell, per row and per column; a per-quadrant
/// matrix is kept alongside for symmetry but is not consumed by the
/// scheduler, which detects dirty quadrants through their member cells.
#[derive(Clone, Debug)]
pub struct WorkSet {
    side: usize,
    quadrant_side: usize,
    cells: Vec<bool>,
    rows: Vec<bool>,
    cols: Vec<bool>,
    quadrants: Vec<bool>
}

impl WorkSet {

    fn new(side: usize, quadrant_side: usize) -> WorkSet {
        let quadrants_per_side = side / quadrant_side;

        WorkSet {
            side,
            quadrant_side,
            cells: vec![false; side * side],
            rows: vec![false; side],
            cols: vec![false; side],
            quadrants: vec![false; quadrants_per_side * quadrants_per_side]
        }
    }

    /// Indicates whether any row or any cell is flagged dirty, i.e. whether
    /// the pass working off this set has anything to do.
    pub fn has_work(&self) -> bool {
        self.rows.iter().any(|&dirty| dirty)
            || self.cells.iter().any(|&dirty| dirty)
    }

    /// Indicates whether the cell at the given position is flagged dirty.
    pub fn cell(&self, row: usize, col: usize) -> bool {
        self.cells[index(row, col, self.side)]
    }

    /// Indicates whether the given row is flagged dirty.
    pub fn row(&self, row: usize) -> bool {
        self.rows[row]
    }

    /// Indicates whether the given column is flagged dirty.
    pub fn col(&self, col: usize) -> bool {
        self.cols[col]
    }

    /// Indicates whether any cell of the quadrant whose top-left corner is at
    /// `(qrow0, qcol0)` is flagged dirty.
    pub fn quadrant_has_dirty_cell(&self, qrow0: usize, qcol0: usize) -> bool {
        (qrow0..qrow0 + self.quadrant_side).any(|row|
            (qcol0..qcol0 + self.quadrant_side).any(|col|
                self.cell(row, col)))
    }

    fn clear(&mut self) {
        for flag in self.cells.iter_mut() {
            *flag = false;
        }

        for k in 0..self.side {
            self.rows[k] = false;
            self.cols[k] = false;
        }

        for flag in self.quadrants.iter_mut() {
            *flag = false;
        }
    }

    fn mark_cell(&mut self, row: usize, col: usize) {
        self.cells[index(row, col, self.side)] = true;
    }

    fn mark_modified(&mut self, row: usize, col: usize) {
        let quadrant_side = self.quadrant_side;
        let quadrants_per_side = self.side / quadrant_side;
        let qrow = row / quadrant_side;
        let qcol = col / quadrant_side;

        self.rows[row] = true;
        self.cols[col] = true;
        self.quadrants[index(qrow, qcol, quadrants_per_side)] = true;

        // a change anywhere can enable deductions everywhere along the
        // changed cell's row, column and quadrant
        for k in 0..self.side {
            self.mark_cell(k, col);
            self.mark_cell(row, k);
        }

        for r in qrow * quadrant_side..(qrow + 1) * quadrant_side {
            for c in qcol * quadrant_side..(qcol + 1) * quadrant_side {
                self.mark_cell(r, c);
            }
        }
    }

    /// Renders the per-cell dirty flags as one `x`/`.` matrix line per row,
    /// for debug tracing.
    pub fn dump(&self) -> String {
        let mut result = String::new();

        for row in 0..self.side {
            result.push_str("   ");

            for col in 0..self.side {
                result.push(if self.cell(row, col) { 'x' } else { '.' });
            }

            result.push('\n');
        }

        result
    }
}

/// The Sudoku grid: a square matrix of [Cell]s whose side length is the
/// square of the quadrant count, together with the two [WorkSet] generations
/// used to schedule heuristic work.
///
/// The grid exclusively owns its cells. All candidate mutations go through
/// the primitives [Grid::remove_candidate], [Grid::remove_candidates] and
/// [Grid::set_value], which record every actual change in the next work-set
/// generation so the solver re-examines the affected regions.
#[derive(Clone, Debug)]
pub struct Grid {
    quadrants_per_side: usize,
    side: usize,
    cells: Vec<Cell>,
    current: WorkSet,
    next: WorkSet
}

impl Grid {

    /// Creates a new grid with the given number of quadrants per side, all
    /// cells blank (holding the full candidate range).
    ///
    /// # Panics
    ///
    /// If `quadrants_per_side` is less than 2. The parser rejects such input
    /// with a proper error; constructing such a grid directly is a bug.
    pub fn new(quadrants_per_side: usize) -> Grid {
        assert!(quadrants_per_side >= 2,
            "a grid requires at least 2 quadrants per side");

        let side = quadrants_per_side * quadrants_per_side;
        let mut cells = Vec::with_capacity(side * side);

        for row in 0..side {
            for col in 0..side {
                cells.push(Cell {
                    row,
                    col,
                    candidates: ValueSet::full(side)
                });
            }
        }

        Grid {
            quadrants_per_side,
            side,
            cells,
            current: WorkSet::new(side, quadrants_per_side),
            next: WorkSet::new(side, quadrants_per_side)
        }
    }

    /// Parses a puzzle from its textual representation.
    ///
    /// The format is line oriented: everything following a `#` on a line is
    /// ignored, as are blank lines. The first meaningful line holds the
    /// quadrant count `k`; each of the `k²` following meaningful lines holds
    /// the `k²` values of one grid row, top to bottom. A `.` denotes a blank
    /// cell and numbers are given clues in `[1, k²]`. For `k` ≤ 3, values
    /// are single digits and may be written without separating whitespace.
    ///
    /// # Errors
    ///
    /// Any specialization of [ParseError], carrying the offending line
    /// number. See [ParseErrorKind] for the possible malformations.
    pub fn parse(input: &str) -> ParseResult<Grid> {
        let mut lines = input.lines();
        let mut line_num = 0;

        let (num, dimension_line) = next_content_line(&mut lines, line_num)?;
        line_num = num;
        let quadrants_per_side: usize = dimension_line.trim().parse()
            .map_err(|e: std::num::ParseIntError|
                ParseError::new(line_num, e.into()))?;

        if quadrants_per_side < 2 {
            return Err(ParseError::new(line_num,
                ParseErrorKind::InvalidQuadrantCount));
        }

        let mut grid = Grid::new(quadrants_per_side);
        let side = grid.side;

        for row in 0..side {
            let (num, row_line) = next_content_line(&mut lines, line_num)?;
            line_num = num;
            let row_values =
                parse_row_values(row_line, quadrants_per_side, line_num)?;

            if row_values.len() != side {
                return Err(ParseError::new(line_num,
                    ParseErrorKind::WrongNumberOfValues {
                        expected: side,
                        actual: row_values.len()
                    }));
            }

            for (col, value) in row_values.into_iter().enumerate() {
                if let Some(value) = value {
                    let cell = &mut grid.cells[index(row, col, side)];
                    cell.candidates = ValueSet::singleton(side, value);
                }
            }
        }

        Ok(grid)
    }

    /// The number of quadrants along one side of the grid (`k`).
    pub fn quadrants_per_side(&self) -> usize {
        self.quadrants_per_side
    }

    /// The side length of one quadrant, in cells. Since the grid is square,
    /// this equals the quadrant count.
    pub fn quadrant_side_len(&self) -> usize {
        self.quadrants_per_side
    }

    /// The number of cells along one side of the grid (`k²`).
    pub fn side_cell_count(&self) -> usize {
        self.side
    }

    /// The number of distinct values a cell can hold, which equals the side
    /// length.
    pub fn possible_value_count(&self) -> usize {
        self.side
    }

    /// Gets the cell at the given position.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[index(row, col, self.side)]
    }

    /// Indicates whether every cell of the grid is known, i.e. the puzzle is
    /// completely solved.
    pub fn is_fully_known(&self) -> bool {
        self.cells.iter().all(Cell::is_known)
    }

    /// Removes `value` from the candidate set of the cell at the given
    /// position. On change, the cell is marked modified in the next work-set
    /// generation. Returns `true` if and only if a change occurred.
    pub fn remove_candidate(&mut self, row: usize, col: usize, value: usize)
            -> bool {
        let side = self.side;
        let changed = self.cells[index(row, col, side)].candidates
            .remove(value);

        if changed {
            self.next.mark_modified(row, col);
        }

        changed
    }

    /// Removes all of `values` from the candidate set of the cell at the
    /// given position, marking the cell modified at most once. Returns `true`
    /// if and only if a change occurred.
    pub fn remove_candidates(&mut self, row: usize, col: usize,
            values: &ValueSet) -> bool {
        let side = self.side;
        let changed = self.cells[index(row, col, side)].candidates
            .difference_assign(values);

        if changed {
            self.next.mark_modified(row, col);
        }

        changed
    }

    /// Collapses the candidate set of the cell at the given position to
    /// exactly `{value}`. If the cell already holds exactly that value, this
    /// is a no-op and returns `false`; otherwise the cell is marked modified
    /// in the next work-set generation and `true` is returned.
    ///
    /// # Panics
    ///
    /// If `value` is outside `[1, possible_value_count]`. No correct
    /// heuristic deduces such a value; hitting this indicates either a bug or
    /// an inconsistent puzzle whose group sums no longer add up.
    pub fn set_value(&mut self, row: usize, col: usize, value: usize)
            -> bool {
        assert!(value >= 1 && value <= self.side,
            "value {} out of range [1, {}]", value, self.side);

        let side = self.side;
        let cell = &mut self.cells[index(row, col, side)];

        if cell.is_known() && cell.value() == value {
            return false;
        }

        cell.candidates = ValueSet::singleton(side, value);
        self.next.mark_modified(row, col);
        true
    }

    /// The positions of all cells that share a row, column or quadrant with
    /// the cell at the given position, excluding the position itself. This is
    /// the full set of peers constrained by the cell, of size
    /// `2·(side − 1) + (k − 1)²`.
    pub fn related_positions(&self, row: usize, col: usize)
            -> Vec<(usize, usize)> {
        let quadrant_side = self.quadrants_per_side;
        let qrow0 = row / quadrant_side * quadrant_side;
        let qcol0 = col / quadrant_side * quadrant_side;
        let mut positions = Vec::with_capacity(
            2 * (self.side - 1) + (quadrant_side - 1) * (quadrant_side - 1));

        for r in 0..self.side {
            if r != row {
                positions.push((r, col));
            }
        }

        for c in 0..self.side {
            if c != col {
                positions.push((row, c));
            }
        }

        for r in qrow0..qrow0 + quadrant_side {
            for c in qcol0..qcol0 + quadrant_side {
                if r != row && c != col {
                    positions.push((r, c));
                }
            }
        }

        positions
    }

    /// The positions of all cells of the given row, left to right.
    pub fn row_positions(&self, row: usize) -> Vec<(usize, usize)> {
        (0..self.side).map(|col| (row, col)).collect()
    }

    /// The positions of all cells of the given column, top to bottom.
    pub fn col_positions(&self, col: usize) -> Vec<(usize, usize)> {
        (0..self.side).map(|row| (row, col)).collect()
    }

    /// The positions of all cells of the quadrant whose top-left corner is at
    /// `(qrow0, qcol0)`, in row-major order.
    pub fn quadrant_positions(&self, qrow0: usize, qcol0: usize)
            -> Vec<(usize, usize)> {
        let quadrant_side = self.quadrants_per_side;
        let mut positions = Vec::with_capacity(quadrant_side * quadrant_side);

        for row in qrow0..qrow0 + quadrant_side {
            for col in qcol0..qcol0 + quadrant_side {
                positions.push((row, col));
            }
        }

        positions
    }

    /// Seeds the next work-set generation for the first solver pass: the cell
    /// flag of every already-known cell (i.e. every clue) is set. Rows and
    /// columns are deliberately not pre-seeded; the first pass reaches them
    /// through the propagation the cell-level heuristic triggers.
    pub fn prepare(&mut self) {
        for row in 0..self.side {
            for col in 0..self.side {
                if self.cell(row, col).is_known() {
                    self.next.mark_cell(row, col);
                }
            }
        }
    }

    /// Swaps the work-set generations: the accumulated *next* set becomes
    /// *current*, and the new next set is cleared for the upcoming pass to
    /// record its changes into.
    pub fn start_next_cycle(&mut self) {
        mem::swap(&mut self.current, &mut self.next);
        self.next.clear();
    }

    /// The work-set generation the running pass reads its dirty flags from.
    pub fn current_work(&self) -> &WorkSet {
        &self.current
    }

    /// Indicates whether the next work-set generation has accumulated any
    /// work, i.e. whether another solver pass could make progress.
    pub fn has_pending_work(&self) -> bool {
        self.next.has_work()
    }

    /// Marks the cell at the given position modified in the next work-set
    /// generation, dirtying its row, column and quadrant.
    pub fn mark_modified(&mut self, row: usize, col: usize) {
        self.next.mark_modified(row, col);
    }
}

fn next_content_line<'a>(lines: &mut std::str::Lines<'a>, mut line_num: usize)
        -> ParseResult<(usize, &'a str)> {
    for line in lines {
        line_num += 1;
        let line = match line.find('#') {
            Some(comment_start) => &line[..comment_start],
            None => line
        };
        let line = line.trim();

        if !line.is_empty() {
            return Ok((line_num, line));
        }
    }

    Err(ParseError::new(line_num, ParseErrorKind::UnexpectedEnd))
}

/// Parses the cell values of one grid row; `None` is a blank cell. For small
/// grids (k ≤ 3) every non-whitespace character is one value, which allows
/// the common compact notation without separating spaces.
fn parse_row_values(line: &str, quadrants_per_side: usize, line_num: usize)
        -> ParseResult<Vec<Option<usize>>> {
    let side = quadrants_per_side * quadrants_per_side;
    let mut values = Vec::new();

    if quadrants_per_side <= 3 {
        for c in line.chars() {
            if c.is_whitespace() {
                continue;
            }

            if c == '.' {
                values.push(None);
                continue;
            }

            match c.to_digit(10) {
                Some(digit) => {
                    let value = digit as usize;

                    if value < 1 || value > side {
                        return Err(ParseError::new(line_num,
                            ParseErrorKind::ValueOutOfRange {
                                value,
                                max: side
                            }));
                    }

                    values.push(Some(value));
                },
                None => return Err(ParseError::new(line_num,
                    ParseErrorKind::MalformedNumber))
            }
        }
    }
    else {
        for token in line.split_whitespace() {
            if token == "." {
                values.push(None);
                continue;
            }

            let value: usize = token.parse().map_err(
                |e: std::num::ParseIntError|
                    ParseError::new(line_num, e.into()))?;

            if value < 1 || value > side {
                return Err(ParseError::new(line_num,
                    ParseErrorKind::ValueOutOfRange {
                        value,
                        max: side
                    }));
            }

            values.push(Some(value));
        }
    }

    Ok(values)
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let max_digits = self.side.to_string().len();
        let width_of = |candidate_count: usize|
            candidate_count * max_digits + candidate_count.saturating_sub(1);
        let mut col_widths = vec![0usize; self.side];

        for col in 0..self.side {
            for row in 0..self.side {
                let width = width_of(self.cell(row, col).candidates().len());
                col_widths[col] = col_widths[col].max(width);
            }
        }

        for row in 0..self.side {
            if row > 0 && row % self.quadrants_per_side == 0 {
                writeln!(f)?;
            }

            for col in 0..self.side {
                if col % self.quadrants_per_side == 0 {
                    write!(f, " | ")?;
                }

                write!(f, "  {:>width$}",
                    self.cell(row, col).candidates().to_string(),
                    width = col_widths[col])?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    const INPUT_2X2: &str = "
        # lines starting with '#' should be ignored
        2

        1 2  34        # this text should also be ignored
        ..   1 .
        ....
        . .. .
        ";

    #[test]
    fn parse_reads_clues_and_blanks() {
        let grid = Grid::parse(INPUT_2X2).unwrap();
        let uncertain = ValueSet::full(4);

        assert_eq!(2, grid.quadrants_per_side());
        assert_eq!(4, grid.side_cell_count());
        assert_eq!(4, grid.possible_value_count());

        assert_eq!(&ValueSet::singleton(4, 1), grid.cell(0, 0).candidates());
        assert_eq!(&ValueSet::singleton(4, 2), grid.cell(0, 1).candidates());
        assert_eq!(&ValueSet::singleton(4, 3), grid.cell(0, 2).candidates());
        assert_eq!(&ValueSet::singleton(4, 4), grid.cell(0, 3).candidates());
        assert_eq!(&ValueSet::singleton(4, 1), grid.cell(1, 2).candidates());

        for (row, col) in [(1, 0), (1, 1), (1, 3)].iter().cloned() {
            assert_eq!(&uncertain, grid.cell(row, col).candidates());
        }

        for row in 2..4 {
            for col in 0..4 {
                assert_eq!(&uncertain, grid.cell(row, col).candidates());
            }
        }
    }

    #[test]
    fn parse_rejects_too_few_quadrants() {
        assert_eq!(ParseError::new(1, ParseErrorKind::InvalidQuadrantCount),
            Grid::parse("0").unwrap_err());
        assert_eq!(ParseError::new(1, ParseErrorKind::InvalidQuadrantCount),
            Grid::parse("1").unwrap_err());
    }

    #[test]
    fn parse_rejects_malformed_quadrant_count() {
        assert_eq!(ParseError::new(1, ParseErrorKind::MalformedNumber),
            Grid::parse("two").unwrap_err());
    }

    #[test]
    fn parse_rejects_wrong_value_count() {
        assert_eq!(
            ParseError::new(2, ParseErrorKind::WrongNumberOfValues {
                expected: 4,
                actual: 5
            }),
            Grid::parse("2\n....1\n....").unwrap_err());
        assert_eq!(
            ParseError::new(2, ParseErrorKind::WrongNumberOfValues {
                expected: 4,
                actual: 3
            }),
            Grid::parse("2\n123\n....").unwrap_err());
    }

    #[test]
    fn parse_rejects_out_of_range_value() {
        assert_eq!(
            ParseError::new(3, ParseErrorKind::ValueOutOfRange {
                value: 5,
                max: 4
            }),
            Grid::parse("2\n1234\n...5").unwrap_err());
    }

    #[test]
    fn parse_rejects_truncated_input() {
        assert_eq!(ParseError::new(3, ParseErrorKind::UnexpectedEnd),
            Grid::parse("2\n....\n....").unwrap_err());
    }

    #[test]
    fn parse_splits_wide_grids_on_whitespace() {
        let mut input = String::from("4\n");

        for _ in 0..16 {
            input.push_str("16 . . . . . . . . . . . . . . 1\n");
        }

        let grid = Grid::parse(&input).unwrap();
        assert_eq!(16, grid.side_cell_count());
        assert_eq!(16, grid.cell(0, 0).value());
        assert_eq!(1, grid.cell(15, 15).value());
        assert!(!grid.cell(3, 3).is_known());
    }

    #[test]
    fn related_positions_cover_row_col_and_quadrant() {
        let grid = Grid::new(3);
        let related = grid.related_positions(3, 4);

        assert_eq!(20, related.len());
        assert!(related.contains(&(0, 4)));
        assert!(related.contains(&(3, 8)));
        assert!(related.contains(&(4, 5)));
        assert!(!related.contains(&(3, 4)));
        assert!(!related.contains(&(0, 0)));

        let mut deduplicated = related.clone();
        deduplicated.sort();
        deduplicated.dedup();
        assert_eq!(related.len(), deduplicated.len());
    }

    #[test]
    fn removal_marks_next_work_set() {
        let mut grid = Grid::new(3);

        assert!(grid.remove_candidate(2, 3, 5));
        assert!(grid.has_pending_work());

        grid.start_next_cycle();
        let work = grid.current_work();

        assert!(work.row(2));
        assert!(work.col(3));
        assert!(work.cell(2, 3));
        assert!(work.cell(2, 8));
        assert!(work.cell(7, 3));
        assert!(work.cell(0, 4));
        assert!(!work.cell(5, 5));
        assert!(!work.row(5));

        // the fresh next generation starts out clean
        assert!(!grid.has_pending_work());
    }

    #[test]
    fn removal_of_absent_candidate_changes_nothing() {
        let mut grid = Grid::new(3);
        grid.remove_candidate(2, 3, 5);
        grid.start_next_cycle();

        assert!(!grid.remove_candidate(2, 3, 5));
        assert!(!grid.has_pending_work());
    }

    #[test]
    fn set_value_collapses_and_marks() {
        let mut grid = Grid::new(3);

        assert!(grid.set_value(1, 1, 7));
        assert!(grid.cell(1, 1).is_known());
        assert_eq!(7, grid.cell(1, 1).value());
        assert!(grid.has_pending_work());

        grid.start_next_cycle();

        // setting the same value again is a no-op and marks nothing
        assert!(!grid.set_value(1, 1, 7));
        assert!(!grid.has_pending_work());
    }

    #[test]
    #[should_panic]
    fn set_value_rejects_out_of_range_value() {
        let mut grid = Grid::new(2);
        grid.set_value(0, 0, 5);
    }

    #[test]
    #[should_panic]
    fn value_of_undetermined_cell_panics() {
        let grid = Grid::new(2);
        grid.cell(0, 0).value();
    }

    #[test]
    fn prepare_seeds_only_known_cell_flags() {
        let mut grid = Grid::parse("2\n1...\n....\n....\n...2").unwrap();
        grid.prepare();

        assert!(grid.has_pending_work());
        grid.start_next_cycle();
        let work = grid.current_work();

        assert!(work.cell(0, 0));
        assert!(work.cell(3, 3));
        assert!(!work.cell(0, 1));
        assert!(!work.row(0));
        assert!(!work.col(3));
    }

    #[test]
    fn quadrant_positions_are_row_major() {
        let grid = Grid::new(2);

        assert_eq!(vec![(2, 0), (2, 1), (3, 0), (3, 1)],
            grid.quadrant_positions(2, 0));
    }

    #[test]
    fn work_set_dump_shows_dirty_cells() {
        let mut grid = Grid::new(2);
        grid.remove_candidate(0, 0, 1);
        grid.start_next_cycle();

        let dump = grid.current_work().dump();
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!("   xxxx", lines[0]);
        assert_eq!("   xx..", lines[1]);
        assert_eq!("   x...", lines[2]);
        assert_eq!("   x...", lines[3]);
    }

    #[test]
    fn display_renders_known_grid() {
        let grid = Grid::parse("2\n1234\n3412\n2143\n4321").unwrap();
        let expected = " |   1  2 |   3  4\n \
                        |   3  4 |   1  2\n\n \
                        |   2  1 |   4  3\n \
                        |   4  3 |   2  1\n";

        assert_eq!(expected, grid.to_string());
    }

    #[test]
    fn display_renders_candidate_sets() {
        let mut grid = Grid::parse("2\n1234\n34.2\n2143\n4321").unwrap();
        grid.remove_candidate(1, 2, 3);
        grid.remove_candidate(1, 2, 4);

        assert!(grid.to_string().contains("1,2"));
    }
}
