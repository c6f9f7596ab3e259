//! Core module - pure game logic with no I/O
//!
//! Everything here is deterministic given the construction seed and the
//! input stream fed to the engine. No timers, sockets, or clocks.

pub mod codec;
pub mod game_state;
pub mod grid;
pub mod pill;
pub mod resolver;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use game_state::{Engine, GameConfig};
pub use grid::Grid;
pub use pill::Pill;
pub use rng::SimpleRng;
pub use snapshot::{GameSnapshot, PillSnapshot, RepeatSnapshot};
