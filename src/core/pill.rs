//! Pill module - the falling two-cell piece
//!
//! A pill is an anchor position plus an orientation and a color pair. The
//! anchor is the left cell when horizontal and the bottom cell when vertical.
//! Movement and rotation compute the would-be cells, check every target
//! against bounds and occupancy, and either commit or leave the pill
//! untouched. The pill is never written into the grid while falling; locking
//! bakes it in as two paired half-cells.

use crate::core::grid::Grid;
use crate::types::{Cell, Direction, Orientation, PillColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pill {
    pub row: i16,
    pub col: i16,
    pub orientation: Orientation,
    /// Anchor color first
    pub colors: [PillColor; 2],
}

impl Pill {
    /// Place a new pill at the spawn anchor: hidden row, top-center, horizontal.
    /// Whether the spawn cells are free is the caller's topped-out check.
    pub fn spawn(colors: [PillColor; 2], width: u8) -> Self {
        Self {
            row: 0,
            col: i16::from(width) / 2 - 1,
            orientation: Orientation::Horizontal,
            colors,
        }
    }

    /// The two occupied positions, anchor first
    pub fn cells(&self) -> [(i16, i16); 2] {
        match self.orientation {
            Orientation::Horizontal => [(self.row, self.col), (self.row, self.col + 1)],
            Orientation::Vertical => [(self.row, self.col), (self.row - 1, self.col)],
        }
    }

    /// Both cells in bounds and empty
    pub fn fits(&self, grid: &Grid) -> bool {
        self.cells().iter().all(|&(r, c)| grid.is_open(r, c))
    }

    fn fits_at(grid: &Grid, row: i16, col: i16, orientation: Orientation) -> bool {
        let probe = Pill {
            row,
            col,
            orientation,
            colors: [PillColor::Red; 2],
        };
        probe.fits(grid)
    }

    /// Try to move one cell; commits and returns true only when every target
    /// cell is open.
    pub fn try_move(&mut self, direction: Direction, grid: &Grid) -> bool {
        let (dr, dc) = match direction {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
        };
        if Self::fits_at(grid, self.row + dr, self.col + dc, self.orientation) {
            self.row += dr;
            self.col += dc;
            return true;
        }
        false
    }

    /// Try to rotate a quarter turn. Rotation cycles through four states
    /// (two orientations, two color orders). A rotation back to horizontal
    /// that fails in place retries one column to the left (wall kick); if
    /// still illegal the rotation fails silently.
    pub fn try_rotate(&mut self, clockwise: bool, grid: &Grid) -> bool {
        let [a, b] = self.colors;
        let (orientation, colors) = match (self.orientation, clockwise) {
            (Orientation::Horizontal, true) => (Orientation::Vertical, [a, b]),
            (Orientation::Vertical, true) => (Orientation::Horizontal, [b, a]),
            (Orientation::Horizontal, false) => (Orientation::Vertical, [b, a]),
            (Orientation::Vertical, false) => (Orientation::Horizontal, [a, b]),
        };

        if Self::fits_at(grid, self.row, self.col, orientation) {
            self.orientation = orientation;
            self.colors = colors;
            return true;
        }
        if orientation == Orientation::Horizontal
            && Self::fits_at(grid, self.row, self.col - 1, orientation)
        {
            self.col -= 1;
            self.orientation = orientation;
            self.colors = colors;
            return true;
        }
        false
    }

    /// The paired half-cells this pill bakes into the grid when it locks
    pub fn lock_cells(&self) -> [(i16, i16, Cell); 2] {
        let [a, b] = self.colors;
        match self.orientation {
            Orientation::Horizontal => [
                (self.row, self.col, Cell::PillLeft(a)),
                (self.row, self.col + 1, Cell::PillRight(b)),
            ],
            Orientation::Vertical => [
                (self.row, self.col, Cell::PillBottom(a)),
                (self.row - 1, self.col, Cell::PillTop(b)),
            ],
        }
    }
}
