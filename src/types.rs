//! Core types shared across the engine
//! This module contains pure data types and static tables with no external dependencies
//! beyond serde derives.

use serde::{Deserialize, Serialize};

/// Default grid dimensions (playable area; one hidden spawn row sits above it)
pub const DEFAULT_WIDTH: u8 = 8;
pub const DEFAULT_HEIGHT: u8 = 16;

/// Dimension limits enforced at construction
pub const MIN_DIMENSION: u8 = 4;
pub const MAX_DIMENSION: u8 = 32;

/// Minimum run length for a match to clear
pub const MATCH_LEN: usize = 4;

/// Highest selectable level
pub const MAX_LEVEL: u8 = 20;

/// Frames for the active pill to fall one row, indexed by speed
pub const GRAVITY_FRAMES: [u32; 21] = [
    40, 38, 36, 34, 32, 30, 28, 26, 24, 22, 20, 18, 16, 14, 12, 10, 8, 6, 4, 2, 1,
];

/// Topmost playable row (0-based) eligible for virus placement, indexed by level
pub const MIN_VIRUS_ROW: [u8; 21] = [
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 4, 4, 3, 3, 2, 2,
];

/// Virus population cap regardless of level
pub const MAX_VIRUSES: u16 = 84;

/// Auto-repeat timing (frames)
pub const DAS_DELAY_FRAMES: u32 = 16;
pub const REPEAT_FRAMES: u32 = 6;
pub const SOFT_DROP_FRAMES: u32 = 2;

/// Resolver timing (frames)
pub const DESTROY_ANIMATION_FRAMES: u32 = 20;
pub const SETTLE_FALL_FRAMES: u32 = 4;

/// Par time per level for the win-time bonus (frames; one minute at 60 fps)
pub const PAR_FRAMES_PER_LEVEL: u32 = 3600;

/// Base points for the first virus cleared in a resolution chain
pub const VIRUS_CLEAR_BASE: u32 = 100;

/// Cap on the chain-doubling exponent
pub const CHAIN_EXPONENT_CAP: u32 = 7;

/// Pill/virus colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PillColor {
    Red,
    Yellow,
    Blue,
}

impl PillColor {
    pub const ALL: [PillColor; 3] = [PillColor::Red, PillColor::Yellow, PillColor::Blue];

    /// Index into color-keyed tables (also the codec alphabet column)
    pub fn index(&self) -> usize {
        match self {
            PillColor::Red => 0,
            PillColor::Yellow => 1,
            PillColor::Blue => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PillColor::Red => "red",
            PillColor::Yellow => "yellow",
            PillColor::Blue => "blue",
        }
    }
}

/// One cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Virus(PillColor),
    PillTop(PillColor),
    PillBottom(PillColor),
    PillLeft(PillColor),
    PillRight(PillColor),
    PillSegment(PillColor),
    Destroyed,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_virus(&self) -> bool {
        matches!(self, Cell::Virus(_))
    }

    /// Color participating in match scans; Empty and Destroyed have none
    pub fn color(&self) -> Option<PillColor> {
        match self {
            Cell::Empty | Cell::Destroyed => None,
            Cell::Virus(c)
            | Cell::PillTop(c)
            | Cell::PillBottom(c)
            | Cell::PillLeft(c)
            | Cell::PillRight(c)
            | Cell::PillSegment(c) => Some(*c),
        }
    }

    /// Whether this cell is half of a rigid two-cell pill
    pub fn is_pill_half(&self) -> bool {
        matches!(
            self,
            Cell::PillTop(_) | Cell::PillBottom(_) | Cell::PillLeft(_) | Cell::PillRight(_)
        )
    }
}

/// Orientation of the active pill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Movement directions for the active pill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

/// Logical inputs; the device-to-input mapping lives outside the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Input {
    Left,
    Right,
    /// Hard drop
    Up,
    /// Soft drop
    Down,
    RotateCw,
    RotateCcw,
    Pause,
}

impl Input {
    pub fn as_str(&self) -> &'static str {
        match self {
            Input::Left => "left",
            Input::Right => "right",
            Input::Up => "up",
            Input::Down => "down",
            Input::RotateCw => "rotateCw",
            Input::RotateCcw => "rotateCcw",
            Input::Pause => "pause",
        }
    }
}

/// Edge-triggered input event (press or release)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub input: Input,
    pub pressed: bool,
}

impl InputEvent {
    pub fn press(input: Input) -> Self {
        Self {
            input,
            pressed: true,
        }
    }

    pub fn release(input: Input) -> Self {
        Self {
            input,
            pressed: false,
        }
    }
}

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Loading,
    Playing,
    Paused,
    Won,
    Lost,
}

impl Mode {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Mode::Won | Mode::Lost)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Loading => "loading",
            Mode::Playing => "playing",
            Mode::Paused => "paused",
            Mode::Won => "won",
            Mode::Lost => "lost",
        }
    }
}

/// Discrete per-frame events, ordered as they occurred within the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PillSpawned {
        colors: [PillColor; 2],
    },
    PillLocked,
    CellsCleared {
        cells: u32,
        viruses: u32,
        /// Resolver passes with clears since the triggering lock (1 = direct clear)
        combo: u32,
    },
    Won {
        score: u32,
        time_bonus: u32,
    },
    Lost,
}
