//! This module contains the deduction heuristics. Each one encodes a single
//! rule by which candidate values can be eliminated or cells fixed, and each
//! reports whether it changed the grid so the scheduler can track progress.
//!
//! All heuristics are sound and monotone: they only ever shrink candidate
//! sets, and only in ways every valid completion of the grid permits. Their
//! combination therefore reaches a fixpoint regardless of application order.

use crate::Grid;
use crate::solver::{CellHeuristic, GridHeuristic, Group, GroupHeuristic};
use crate::util::ValueSet;

use log::info;

/// A known cell excludes its value from every related cell, i.e. from all
/// cells sharing its row, column or quadrant. This is the workhorse that
/// propagates both the initial clues and every later deduction.
pub struct SingleValueInCell;

impl CellHeuristic for SingleValueInCell {
    fn apply(&self, grid: &mut Grid, row: usize, col: usize) -> bool {
        if !grid.cell(row, col).is_known() {
            return false;
        }

        let value = grid.cell(row, col).value();
        let mut modified = false;

        for (r, c) in grid.related_positions(row, col) {
            if grid.remove_candidate(r, c, value) {
                info!("removed {} from cell ({}, {}) because it is held by \
                    the related cell ({}, {})", value, r, c, row, col);
                modified = true;
            }
        }

        modified
    }
}

/// If all cells of a group but one are known, the remaining cell must hold
/// the difference between the triangular sum `1 + 2 + … + N` and the sum of
/// the known values.
pub struct AllButOneKnown;

impl GroupHeuristic for AllButOneKnown {
    fn apply(&self, grid: &mut Grid, group: &Group) -> bool {
        let side = grid.possible_value_count();
        let mut sum = 0;
        let mut unknown = None;

        for &(row, col) in group.positions() {
            let cell = grid.cell(row, col);

            if cell.is_known() {
                sum += cell.value();
            }
            else if unknown.is_none() {
                unknown = Some((row, col));
            }
            else {
                return false;
            }
        }

        let (row, col) = match unknown {
            Some(position) => position,
            None => return false
        };

        // an inconsistent group drives this out of range, which trips the
        // set_value contract
        let value = (side * (side + 1) / 2).saturating_sub(sum);

        info!("cell ({}, {}) is the only unknown of {}; the sum rule fixes \
            it to {}", row, col, group.label(), value);
        grid.set_value(row, col, value)
    }
}

/// If a candidate value of a cell appears in no other cell of the group, the
/// cell must hold that value (a hidden single).
pub struct UniqueValueLeft;

impl GroupHeuristic for UniqueValueLeft {
    fn apply(&self, grid: &mut Grid, group: &Group) -> bool {
        let mut modified = false;

        'cells: for &(row, col) in group.positions() {
            if grid.cell(row, col).is_known() {
                continue;
            }

            let mut remaining = grid.cell(row, col).candidates().clone();

            for &(other_row, other_col) in group.positions() {
                if (other_row, other_col) == (row, col) {
                    continue;
                }

                remaining.difference_assign(
                    grid.cell(other_row, other_col).candidates());

                if remaining.is_empty() {
                    continue 'cells;
                }
            }

            if let Some(value) = remaining.sole_value() {
                grid.set_value(row, col, value);
                info!("set cell ({}, {}) to {}, which no other cell of {} \
                    can hold", row, col, value, group.label());
                modified = true;
            }
        }

        modified
    }
}

/// If `m` unknown cells of a group share one identical candidate set of `m`
/// values, those values are spoken for and can be removed from every other
/// unknown cell of the group (a naked subset, detected by set equality).
pub struct CombinationRemover;

impl GroupHeuristic for CombinationRemover {
    fn apply(&self, grid: &mut Grid, group: &Group) -> bool {
        let unknown: Vec<(usize, usize)> = group.positions().iter()
            .cloned()
            .filter(|&(row, col)| !grid.cell(row, col).is_known())
            .collect();

        if unknown.len() <= 1 {
            return false;
        }

        let mut modified = false;

        for &(row0, col0) in &unknown {
            let combination = grid.cell(row0, col0).candidates().clone();

            if combination.len() >= unknown.len() {
                continue;
            }

            let occurrences = unknown.iter()
                .filter(|&&(row, col)|
                    grid.cell(row, col).candidates() == &combination)
                .count();

            if occurrences != combination.len() {
                continue;
            }

            for &(row, col) in &unknown {
                if grid.cell(row, col).candidates() == &combination {
                    continue;
                }

                if grid.remove_candidates(row, col, &combination) {
                    info!("removed {} from cell ({}, {}) because {} cells \
                        of {} share exactly these candidates", combination,
                        row, col, occurrences, group.label());
                    modified = true;
                }
            }
        }

        modified
    }
}

/// If some set of `m` values occurs only within a subset of `m` unknown
/// cells of a group, those cells can hold nothing else and their candidate
/// sets collapse to exactly those values (a hidden subset).
///
/// Unlike [CombinationRemover], which requires identical candidate sets,
/// this searches all cell subsets of size 2 and up, pruning branches whose
/// running intersection is already smaller than the subset.
pub struct ClosedSubset;

impl GroupHeuristic for ClosedSubset {
    fn apply(&self, grid: &mut Grid, group: &Group) -> bool {
        let unknown: Vec<(usize, usize)> = group.positions().iter()
            .cloned()
            .filter(|&(row, col)| !grid.cell(row, col).is_known())
            .collect();

        if unknown.len() < 2 {
            return false;
        }

        let common = ValueSet::full(grid.possible_value_count());
        let mut chosen = Vec::new();

        search_subsets(grid, group, &unknown, 0, &mut chosen, &common)
    }
}

fn search_subsets(grid: &mut Grid, group: &Group,
        unknown: &[(usize, usize)], from: usize,
        chosen: &mut Vec<(usize, usize)>, common: &ValueSet) -> bool {
    let mut modified = false;

    for index in from..unknown.len() {
        let (row, col) = unknown[index];
        let narrowed = common & grid.cell(row, col).candidates();
        chosen.push((row, col));

        // a closed subset of m cells needs at least m common values
        if narrowed.len() >= chosen.len() {
            if chosen.len() >= 2 {
                modified |= reduce_if_closed(grid, group, chosen, &narrowed);
            }

            modified |= search_subsets(grid, group, unknown, index + 1,
                chosen, &narrowed);
        }

        chosen.pop();
    }

    modified
}

fn reduce_if_closed(grid: &mut Grid, group: &Group,
        chosen: &[(usize, usize)], common: &ValueSet) -> bool {
    let mut unique = common.clone();

    // values present anywhere else in the group are not confined to the
    // chosen cells
    for &(row, col) in group.positions() {
        if chosen.contains(&(row, col)) {
            continue;
        }

        unique.difference_assign(grid.cell(row, col).candidates());

        if unique.len() < chosen.len() {
            return false;
        }
    }

    if unique.len() != chosen.len() {
        return false;
    }

    let mut modified = false;

    for &(row, col) in chosen {
        let excess = grid.cell(row, col).candidates() - &unique;

        if !excess.is_empty() && grid.remove_candidates(row, col, &excess) {
            info!("reduced cell ({}, {}) to {} because these values of {} \
                only occur in {} cells", row, col, unique, group.label(),
                chosen.len());
            modified = true;
        }
    }

    modified
}

/// The orientation of a stripe of quadrants: for [Orientation::Rows] the
/// stripe spans a band of rows and its lines are rows, for
/// [Orientation::Columns] the roles of rows and columns swap.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Orientation {
    Rows,
    Columns
}

impl Orientation {
    fn position(self, line: usize, offset: usize) -> (usize, usize) {
        match self {
            Orientation::Rows => (line, offset),
            Orientation::Columns => (offset, line)
        }
    }
}

/// If a value occurs only on the same `m` lines in each of `m` quadrants of
/// a stripe (`m` smaller than the quadrant side), those quadrants must place
/// the value on those lines, so it can be removed from the same lines of
/// every other quadrant of the stripe. For `m` = 1 this is the classic
/// pointing pair/triple, for `m` = 2 across two quadrants an X-wing-like
/// pattern, generalized to any subset size.
///
/// This is the only heuristic that relates cells of different groups, which
/// is why it runs over the whole grid rather than per group.
pub struct MatchingLineSubsets;

impl GridHeuristic for MatchingLineSubsets {
    fn apply(&self, grid: &mut Grid) -> bool {
        let side = grid.side_cell_count();
        let quadrant_side = grid.quadrant_side_len();
        let mut modified = false;

        for band0 in (0..side).step_by(quadrant_side) {
            for anchor0 in (0..side).step_by(quadrant_side) {
                modified |= process_stripe(grid, band0, anchor0,
                    Orientation::Rows);
                modified |= process_stripe(grid, band0, anchor0,
                    Orientation::Columns);
            }
        }

        modified
    }
}

/// Runs the matching-line elimination for one anchor quadrant of one stripe.
/// `band0` is the first line of the stripe and `anchor0` the first offset of
/// the anchor quadrant, both in absolute cell coordinates.
fn process_stripe(grid: &mut Grid, band0: usize, anchor0: usize,
        orientation: Orientation) -> bool {
    let side = grid.side_cell_count();
    let quadrant_side = grid.quadrant_side_len();
    let mut uncertain = ValueSet::empty(side);

    for line in band0..band0 + quadrant_side {
        for offset in anchor0..anchor0 + quadrant_side {
            let (row, col) = orientation.position(line, offset);
            let cell = grid.cell(row, col);

            if !cell.is_known() {
                uncertain.union_assign(cell.candidates());
            }
        }
    }

    let mut modified = false;

    for value in uncertain.iter() {
        let this_lines =
            lines_with_value(grid, band0, anchor0, orientation, value);

        // the value is spread over every line, nothing can be concluded
        if this_lines.len() >= quadrant_side {
            continue;
        }

        let matching: Vec<usize> = (0..side).step_by(quadrant_side)
            .filter(|&other0| other0 != anchor0)
            .filter(|&other0| this_lines ==
                lines_with_value(grid, band0, other0, orientation, value))
            .collect();

        if 1 + matching.len() != this_lines.len() {
            continue;
        }

        for other0 in (0..side).step_by(quadrant_side) {
            if other0 == anchor0 || matching.contains(&other0) {
                continue;
            }

            for &line in &this_lines {
                for offset in other0..other0 + quadrant_side {
                    let (row, col) = orientation.position(line, offset);

                    if grid.remove_candidate(row, col, value) {
                        info!("removed {} from cell ({}, {}) because the \
                            value is pinned to its line by {} quadrants of \
                            the stripe", value, row, col, this_lines.len());
                        modified = true;
                    }
                }
            }
        }
    }

    modified
}

/// The lines of the given quadrant on which `value` is still a candidate
/// (or the known cell value), in ascending order.
fn lines_with_value(grid: &Grid, band0: usize, quadrant0: usize,
        orientation: Orientation, value: usize) -> Vec<usize> {
    let quadrant_side = grid.quadrant_side_len();
    let mut lines = Vec::new();

    for line in band0..band0 + quadrant_side {
        for offset in quadrant0..quadrant0 + quadrant_side {
            let (row, col) = orientation.position(line, offset);

            if grid.cell(row, col).candidates().contains(value) {
                lines.push(line);
                break;
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::values;

    #[test]
    fn single_value_in_cell_clears_peers() {
        let mut grid = Grid::new(3);
        grid.set_value(3, 4, 5);

        assert!(SingleValueInCell.apply(&mut grid, 3, 4));

        assert!(!grid.cell(3, 0).candidates().contains(5));
        assert!(!grid.cell(0, 4).candidates().contains(5));
        assert!(!grid.cell(4, 5).candidates().contains(5));
        assert!(grid.cell(0, 0).candidates().contains(5));
        assert!(grid.cell(8, 8).candidates().contains(5));
        assert_eq!(5, grid.cell(3, 4).value());

        // everything already removed, the second run is a no-op
        assert!(!SingleValueInCell.apply(&mut grid, 3, 4));
    }

    #[test]
    fn single_value_in_cell_ignores_undetermined_cells() {
        let mut grid = Grid::new(3);
        assert!(!SingleValueInCell.apply(&mut grid, 0, 0));
        assert_eq!(9, grid.cell(0, 1).candidates().len());
    }

    #[test]
    fn all_but_one_known_applies_sum_rule() {
        let mut grid = Grid::new(2);
        grid.set_value(0, 0, 1);
        grid.set_value(0, 1, 2);
        grid.set_value(0, 3, 4);

        let group = Group::row(&grid, 0);
        assert!(AllButOneKnown.apply(&mut grid, &group));
        assert_eq!(3, grid.cell(0, 2).value());

        // fully known groups yield nothing more
        assert!(!AllButOneKnown.apply(&mut grid, &group));
    }

    #[test]
    fn all_but_one_known_needs_single_unknown() {
        let mut grid = Grid::new(2);
        grid.set_value(1, 0, 1);
        grid.set_value(1, 1, 2);

        let group = Group::row(&grid, 1);
        assert!(!AllButOneKnown.apply(&mut grid, &group));
        assert!(!grid.cell(1, 2).is_known());
        assert!(!grid.cell(1, 3).is_known());
    }

    #[test]
    fn unique_value_left_finds_hidden_single() {
        let mut grid = Grid::new(3);

        for col in 1..9 {
            grid.remove_candidate(0, col, 5);
        }

        let group = Group::row(&grid, 0);
        assert!(UniqueValueLeft.apply(&mut grid, &group));
        assert_eq!(5, grid.cell(0, 0).value());
    }

    #[test]
    fn unique_value_left_leaves_ambiguous_groups_alone() {
        let mut grid = Grid::new(3);
        let group = Group::row(&grid, 0);

        assert!(!UniqueValueLeft.apply(&mut grid, &group));
        assert!(!grid.cell(0, 0).is_known());
    }

    #[test]
    fn combination_remover_eliminates_naked_pair() {
        let mut grid = Grid::new(2);

        for &col in &[0, 1] {
            grid.remove_candidate(0, col, 3);
            grid.remove_candidate(0, col, 4);
        }

        let group = Group::row(&grid, 0);
        assert!(CombinationRemover.apply(&mut grid, &group));

        assert_eq!(&values!(4; 1, 2), grid.cell(0, 0).candidates());
        assert_eq!(&values!(4; 1, 2), grid.cell(0, 1).candidates());
        assert_eq!(&values!(4; 3, 4), grid.cell(0, 2).candidates());
        assert_eq!(&values!(4; 3, 4), grid.cell(0, 3).candidates());
    }

    #[test]
    fn combination_remover_requires_full_occupancy() {
        let mut grid = Grid::new(2);

        // a single cell with two candidates does not pin those values
        grid.remove_candidate(0, 0, 3);
        grid.remove_candidate(0, 0, 4);

        let group = Group::row(&grid, 0);
        assert!(!CombinationRemover.apply(&mut grid, &group));
        assert_eq!(4, grid.cell(0, 1).candidates().len());
    }

    #[test]
    fn closed_subset_collapses_hidden_pair() {
        let mut grid = Grid::new(3);

        // 1 and 2 can only go into the first two cells of the row
        for col in 2..9 {
            grid.remove_candidate(0, col, 1);
            grid.remove_candidate(0, col, 2);
        }

        let group = Group::row(&grid, 0);
        assert!(ClosedSubset.apply(&mut grid, &group));

        assert_eq!(&values!(9; 1, 2), grid.cell(0, 0).candidates());
        assert_eq!(&values!(9; 1, 2), grid.cell(0, 1).candidates());

        for col in 2..9 {
            assert_eq!(7, grid.cell(0, col).candidates().len());
        }
    }

    #[test]
    fn closed_subset_finds_nothing_in_blank_group() {
        let mut grid = Grid::new(3);
        let group = Group::row(&grid, 0);

        assert!(!ClosedSubset.apply(&mut grid, &group));

        for col in 0..9 {
            assert_eq!(9, grid.cell(0, col).candidates().len());
        }
    }

    #[test]
    fn matching_line_subsets_clears_covered_lines() {
        let mut grid = Grid::new(4);

        // within the second row band, 2 occurs in the first two quadrants
        // only on rows 4 and 6; the last two quadrants are unconstrained
        let keep = [(4, 1), (6, 2), (4, 4), (6, 6)];

        for row in 4..8 {
            for col in 0..8 {
                if !keep.contains(&(row, col)) {
                    grid.remove_candidate(row, col, 2);
                }
            }
        }

        assert!(MatchingLineSubsets.apply(&mut grid));

        for col in 8..16 {
            assert!(!grid.cell(4, col).candidates().contains(2));
            assert!(!grid.cell(6, col).candidates().contains(2));
            assert!(grid.cell(5, col).candidates().contains(2));
            assert!(grid.cell(7, col).candidates().contains(2));
        }

        for &(row, col) in &keep {
            assert!(grid.cell(row, col).candidates().contains(2));
        }

        // cells outside the stripe are untouched
        assert!(grid.cell(0, 0).candidates().contains(2));
        assert!(grid.cell(15, 15).candidates().contains(2));
    }

    #[test]
    fn matching_line_subsets_ignores_fully_spread_values() {
        let mut grid = Grid::new(2);
        assert!(!MatchingLineSubsets.apply(&mut grid));

        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(4, grid.cell(row, col).candidates().len());
            }
        }
    }
}
