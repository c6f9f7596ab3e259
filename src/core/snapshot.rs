//! Immutable per-frame snapshot handed to external drivers.
//!
//! Everything observable lives here so two engines fed the same seed and
//! input log can be compared snapshot-for-snapshot.

use serde::{Deserialize, Serialize};

use crate::core::pill::Pill;
use crate::types::{Cell, Input, Mode, Orientation, PillColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillSnapshot {
    pub row: i16,
    pub col: i16,
    pub orientation: Orientation,
    pub colors: [PillColor; 2],
}

impl From<Pill> for PillSnapshot {
    fn from(value: Pill) -> Self {
        Self {
            row: value.row,
            col: value.col,
            orientation: value.orientation,
            colors: value.colors,
        }
    }
}

/// Auto-repeat state for one directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatSnapshot {
    pub input: Input,
    pub held: bool,
    pub countdown: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub mode: Mode,
    pub width: u8,
    pub height: u8,
    /// Row-major cells, hidden row first
    pub cells: Vec<Cell>,
    pub active: Option<PillSnapshot>,
    pub next_pill: [PillColor; 2],
    /// Auto-repeat counters, Left/Right/Down order
    pub repeats: [RepeatSnapshot; 3],
    pub seed: u32,
    pub frame: u64,
    pub score: u32,
    pub time_bonus: u32,
    pub total_ticks: u64,
    pub ticks_in_mode: u64,
    pub pills_placed: u32,
    pub speed: u8,
    pub virus_count: u16,
}
