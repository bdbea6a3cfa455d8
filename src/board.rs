use std::collections::{HashSet, VecDeque};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid state for one game: a fixed mine layout plus per-cell reveal and
/// mark bookkeeping.
///
/// A board is created fresh around its layout and replaced wholesale on
/// reset; nothing mutates the layout while the board is live.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mine_layout: MineLayout,
    grid: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Board {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        Self {
            mine_layout,
            grid: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
        }
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// How many mines have not been flagged yet; negative once the player
    /// has planted more flags than there are mines.
    pub fn mines_left(&self) -> isize {
        (self.mine_layout.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.grid[coords.to_nd_index()]
    }

    /// Whether the cell hides a mine. Read-only; meant for painting mines
    /// once the game has ended.
    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.mine_layout.contains_mine(coords)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_layout.adjacent_mine_count(coords)
    }

    pub fn in_bounds(&self, coords: Coord2) -> bool {
        self.mine_layout.in_bounds(coords)
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    /// Win condition: every non-mine cell has been revealed.
    pub fn is_fully_cleared(&self) -> bool {
        self.revealed_count == self.mine_layout.safe_cell_count()
    }

    /// Opens the cell, flooding through zero-adjacency neighbors.
    ///
    /// Out-of-bounds targets and already revealed cells are no-ops. The
    /// mine mask is deliberately not consulted: the caller decides what a
    /// reveal on a mine means before invoking this (see
    /// [`GameSession::handle_reveal`]), and a direct call on a mine cell
    /// opens it like any other cell.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.in_bounds(coords) || self.cell_at(coords).is_revealed() {
            return RevealOutcome::NoOp;
        }

        let mut count: CellCount = 1;
        let adjacent = self.open_cell(coords);
        log::debug!("revealed {:?}, adjacent mines: {}", coords, adjacent);

        if adjacent == 0 {
            let mut visited = HashSet::from([coords]);
            let mut to_visit: VecDeque<_> = self
                .mine_layout
                .iter_neighbors(coords)
                .filter(|&pos| self.cell_at(pos).is_unrevealed())
                .collect();

            while let Some(visit_coords) = to_visit.pop_front() {
                if !visited.insert(visit_coords) {
                    continue;
                }

                if self.cell_at(visit_coords).is_revealed() {
                    continue;
                }

                let visit_adjacent = self.open_cell(visit_coords);
                count += 1;
                log::trace!(
                    "flood revealed {:?}, adjacent mines: {}",
                    visit_coords,
                    visit_adjacent
                );

                if visit_adjacent == 0 {
                    to_visit.extend(
                        self.mine_layout
                            .iter_neighbors(visit_coords)
                            .filter(|&pos| self.cell_at(pos).is_unrevealed())
                            .filter(|pos| !visited.contains(pos)),
                    );
                }
            }
        }

        RevealOutcome::Revealed { count }
    }

    /// Steps the cell through `Hidden -> Flagged -> Questioned -> Hidden`.
    /// Revealed cells and out-of-bounds targets keep their state.
    pub fn cycle_mark(&mut self, coords: Coord2) -> MarkResult {
        use CellState::*;

        if !self.in_bounds(coords) {
            return MarkResult::Rejected;
        }

        match self.cell_at(coords) {
            Hidden => {
                self.grid[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
                MarkResult::Flagged
            }
            Flagged => {
                self.grid[coords.to_nd_index()] = Questioned;
                self.flagged_count -= 1;
                MarkResult::Questioned
            }
            Questioned => {
                self.grid[coords.to_nd_index()] = Hidden;
                MarkResult::Hidden
            }
            Revealed(_) => MarkResult::Rejected,
        }
    }

    /// Transitions one unrevealed cell to `Revealed`, releasing its flag if
    /// it carried one, and returns the adjacency count stored in the cell.
    fn open_cell(&mut self, coords: Coord2) -> u8 {
        if matches!(self.cell_at(coords), CellState::Flagged) {
            self.flagged_count -= 1;
        }
        let adjacent = self.mine_layout.adjacent_mine_count(coords);
        self.grid[coords.to_nd_index()] = CellState::Revealed(adjacent);
        self.revealed_count += 1;
        adjacent
    }
}
