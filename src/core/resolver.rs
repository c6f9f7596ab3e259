//! Resolver module - match scanning, destruction, and post-clear settling
//!
//! The scan finds every maximal same-color run along both axes before any
//! mutation is committed, so overlapping runs are judged against the original
//! grid. Marked cells become `Destroyed`; a pill half whose partner was
//! destroyed is demoted to a loose `PillSegment` subject to its own gravity.
//! Sweeping and settling are separate steps because the tick engine holds
//! destroyed cells on screen for an animation window before removing them.

use arrayvec::ArrayVec;

use crate::core::grid::Grid;
use crate::types::{Cell, MATCH_LEN, MAX_DIMENSION};

/// A run can span a full column including the hidden row
const MAX_RUN: usize = MAX_DIMENSION as usize + 1;

/// Cells cleared by one resolver pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearStats {
    pub cells: u32,
    pub viruses: u32,
}

/// Find every cell belonging to a run of length >= MATCH_LEN, both axes,
/// judged against the unmutated grid. Positions come back row-major and
/// deduplicated.
pub fn find_matches(grid: &Grid) -> Vec<(i16, i16)> {
    let rows = grid.rows() as i16;
    let width = grid.width() as i16;
    let mut marked = vec![false; rows as usize * width as usize];

    let mark_run = |run: &ArrayVec<(i16, i16), MAX_RUN>, marked: &mut Vec<bool>| {
        if run.len() >= MATCH_LEN {
            for &(r, c) in run {
                marked[r as usize * width as usize + c as usize] = true;
            }
        }
    };

    // Horizontal runs.
    for r in 0..rows {
        let mut run: ArrayVec<(i16, i16), MAX_RUN> = ArrayVec::new();
        let mut run_color = None;
        for c in 0..width {
            let color = grid.get(r, c).and_then(|cell| cell.color());
            if color.is_some() && color == run_color {
                run.push((r, c));
            } else {
                mark_run(&run, &mut marked);
                run.clear();
                run_color = color;
                if color.is_some() {
                    run.push((r, c));
                }
            }
        }
        mark_run(&run, &mut marked);
    }

    // Vertical runs.
    for c in 0..width {
        let mut run: ArrayVec<(i16, i16), MAX_RUN> = ArrayVec::new();
        let mut run_color = None;
        for r in 0..rows {
            let color = grid.get(r, c).and_then(|cell| cell.color());
            if color.is_some() && color == run_color {
                run.push((r, c));
            } else {
                mark_run(&run, &mut marked);
                run.clear();
                run_color = color;
                if color.is_some() {
                    run.push((r, c));
                }
            }
        }
        mark_run(&run, &mut marked);
    }

    let mut positions = Vec::new();
    for r in 0..rows {
        for c in 0..width {
            if marked[r as usize * width as usize + c as usize] {
                positions.push((r, c));
            }
        }
    }
    positions
}

/// Mark the given positions destroyed and count what was hit
pub fn mark_destroyed(grid: &mut Grid, positions: &[(i16, i16)]) -> ClearStats {
    let mut stats = ClearStats::default();
    for &(r, c) in positions {
        if let Some(cell) = grid.get(r, c) {
            stats.cells += 1;
            if cell.is_virus() {
                stats.viruses += 1;
            }
            grid.set(r, c, Cell::Destroyed);
        }
    }
    stats
}

/// Demote any pill half whose partner half is gone to a loose segment.
/// A broken pill leaves its remaining half subject to its own gravity.
pub fn demote_orphans(grid: &mut Grid) {
    let rows = grid.rows() as i16;
    let width = grid.width() as i16;
    for r in 0..rows {
        for c in 0..width {
            let Some(cell) = grid.get(r, c) else { continue };
            let (partner, color) = match cell {
                Cell::PillLeft(color) => ((r, c + 1), color),
                Cell::PillRight(color) => ((r, c - 1), color),
                // The top half sits one row above its bottom half.
                Cell::PillTop(color) => ((r + 1, c), color),
                Cell::PillBottom(color) => ((r - 1, c), color),
                _ => continue,
            };
            let intact = matches!(
                (cell, grid.get(partner.0, partner.1)),
                (Cell::PillLeft(_), Some(Cell::PillRight(_)))
                    | (Cell::PillRight(_), Some(Cell::PillLeft(_)))
                    | (Cell::PillTop(_), Some(Cell::PillBottom(_)))
                    | (Cell::PillBottom(_), Some(Cell::PillTop(_)))
            );
            if !intact {
                grid.set(r, c, Cell::PillSegment(color));
            }
        }
    }
}

/// Remove destroyed markers, leaving empty cells behind.
/// Returns how many cells were swept.
pub fn sweep_destroyed(grid: &mut Grid) -> u32 {
    let rows = grid.rows() as i16;
    let width = grid.width() as i16;
    let mut swept = 0;
    for r in 0..rows {
        for c in 0..width {
            if grid.get(r, c) == Some(Cell::Destroyed) {
                grid.set(r, c, Cell::Empty);
                swept += 1;
            }
        }
    }
    swept
}

/// Let unsupported cells fall one row. Viruses never fall; horizontal pairs
/// fall only when both halves are unsupported; vertical pairs follow their
/// bottom half. Returns whether anything moved.
pub fn settle_step(grid: &mut Grid) -> bool {
    let width = grid.width() as i16;
    let mut moved = false;

    // Bottom-up so a stack falls together within one step.
    for r in (0..grid.rows() as i16 - 1).rev() {
        for c in 0..width {
            match grid.get(r, c) {
                Some(Cell::PillSegment(color)) => {
                    if grid.is_open(r + 1, c) {
                        grid.set(r + 1, c, Cell::PillSegment(color));
                        grid.set(r, c, Cell::Empty);
                        moved = true;
                    }
                }
                Some(Cell::PillLeft(left)) => {
                    if let Some(Cell::PillRight(right)) = grid.get(r, c + 1) {
                        if grid.is_open(r + 1, c) && grid.is_open(r + 1, c + 1) {
                            grid.set(r + 1, c, Cell::PillLeft(left));
                            grid.set(r + 1, c + 1, Cell::PillRight(right));
                            grid.set(r, c, Cell::Empty);
                            grid.set(r, c + 1, Cell::Empty);
                            moved = true;
                        }
                    }
                }
                Some(Cell::PillBottom(bottom)) => {
                    if let Some(Cell::PillTop(top)) = grid.get(r - 1, c) {
                        if grid.is_open(r + 1, c) {
                            grid.set(r + 1, c, Cell::PillBottom(bottom));
                            grid.set(r, c, Cell::PillTop(top));
                            grid.set(r - 1, c, Cell::Empty);
                            moved = true;
                        }
                    }
                }
                _ => {}
            }
        }
    }
    moved
}
