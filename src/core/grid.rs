//! Grid module - the game grid and its initial virus population
//!
//! The grid is `width` columns by `height` playable rows plus one hidden row
//! at the top (row 0) used only for spawn legality. Cells live in a flat
//! row-major Vec so access stays allocation-free and bounds-checked in one
//! place. The grid holds no game rules; mutation happens through explicit
//! set/clear operations driven by the other modules.

use crate::core::rng::SimpleRng;
use crate::core::scoring::{min_virus_row, virus_target};
use crate::error::EngineError;
use crate::types::{Cell, PillColor, MAX_DIMENSION, MIN_DIMENSION};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat row-major storage, (height + 1) rows including the hidden row 0
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid. Fails fast on out-of-range dimensions.
    pub fn new(width: u8, height: u8) -> Result<Self, EngineError> {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&width)
            || !(MIN_DIMENSION..=MAX_DIMENSION).contains(&height)
        {
            return Err(EngineError::Configuration(format!(
                "grid dimensions {}x{} outside {}..={}",
                width, height, MIN_DIMENSION, MAX_DIMENSION
            )));
        }
        let rows = height as usize + 1;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; rows * width as usize],
        })
    }

    /// Create a grid and scatter its initial viruses for the given level.
    ///
    /// Placement is deterministic for a given rng state: rows at or below the
    /// level's minimum virus row, colors from the rng stream, and no placement
    /// may complete an immediate 3-in-a-row.
    pub fn with_viruses(
        width: u8,
        height: u8,
        level: u8,
        rng: &mut SimpleRng,
    ) -> Result<Self, EngineError> {
        let mut grid = Self::new(width, height)?;
        grid.populate_viruses(level, rng);
        Ok(grid)
    }

    /// Playable width in columns
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Playable height in rows (excludes the hidden row)
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Total stored rows including the hidden top row
    pub fn rows(&self) -> usize {
        self.height as usize + 1
    }

    #[inline(always)]
    fn index(&self, row: i16, col: i16) -> Option<usize> {
        if row < 0 || row >= self.rows() as i16 || col < 0 || col >= self.width as i16 {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    /// Get cell at (row, col); None when out of bounds
    pub fn get(&self, row: i16, col: i16) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Checked cell access. Out-of-bounds is a caller bug, surfaced as an
    /// IndexOutOfBounds error rather than clamped.
    pub fn cell_at(&self, row: i16, col: i16) -> Result<Cell, EngineError> {
        self.get(row, col)
            .ok_or(EngineError::IndexOutOfBounds { row, col })
    }

    /// Set cell at (row, col). Returns false when out of bounds.
    pub fn set(&mut self, row: i16, col: i16, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty - the only legal landing spot for pill cells
    pub fn is_open(&self, row: i16, col: i16) -> bool {
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    /// Remaining virus cells; zero is the win trigger
    pub fn virus_count(&self) -> u16 {
        self.cells.iter().filter(|c| c.is_virus()).count() as u16
    }

    /// Read access to the flat cell storage (row-major, hidden row first)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn populate_viruses(&mut self, level: u8, rng: &mut SimpleRng) {
        let first_row = 1 + min_virus_row(level) as i16;
        let last_row = self.rows() as i16 - 1;
        if first_row > last_row {
            return;
        }
        let eligible = (last_row - first_row + 1) as u32 * self.width as u32;
        // Leave headroom so the no-3-in-a-row constraint stays satisfiable.
        let target = (virus_target(level) as u32).min(eligible * 3 / 4);

        let mut placed: u32 = 0;
        let mut attempts: u32 = 0;
        while placed < target && attempts < target * 100 {
            attempts += 1;
            let row = first_row + rng.next_range((last_row - first_row + 1) as u32) as i16;
            let col = rng.next_range(self.width as u32) as i16;
            let color = rng.next_color();
            if self.is_open(row, col) && !self.would_complete_run(row, col, color) {
                self.set(row, col, Cell::Virus(color));
                placed += 1;
            }
        }

        // Deterministic sweep for any remainder the random walk missed.
        'outer: while placed < target {
            for row in first_row..=last_row {
                for col in 0..self.width as i16 {
                    if !self.is_open(row, col) {
                        continue;
                    }
                    for color in PillColor::ALL {
                        if !self.would_complete_run(row, col, color) {
                            self.set(row, col, Cell::Virus(color));
                            placed += 1;
                            if placed == target {
                                break 'outer;
                            }
                            break;
                        }
                    }
                }
            }
            // No legal spot left anywhere.
            break;
        }
    }

    /// Would placing `color` at (row, col) create a 3-in-a-row?
    fn would_complete_run(&self, row: i16, col: i16, color: PillColor) -> bool {
        let run_along = |dr: i16, dc: i16| -> usize {
            let mut len = 0;
            let mut r = row + dr;
            let mut c = col + dc;
            while self.get(r, c).and_then(|cell| cell.color()) == Some(color) {
                len += 1;
                r += dr;
                c += dc;
            }
            len
        };
        run_along(0, -1) + run_along(0, 1) + 1 >= 3 || run_along(-1, 0) + run_along(1, 0) + 1 >= 3
    }
}
