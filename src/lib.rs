//! pillfall - deterministic falling-pill puzzle engine
//!
//! A pure, frame-driven state machine: the driver pushes logical input
//! events and calls [`Engine::advance`] at a fixed rate; the engine returns
//! ordered per-frame events, and [`Engine::snapshot`] exposes the full
//! observable state. Two engines built from the same seed and fed the same
//! input log produce identical snapshot sequences, which is what makes
//! server-authoritative play, client prediction, and replays line up.
//!
//! Rendering, input device binding, networking, and persistence live in
//! external collaborators; the engine performs no I/O of its own.

pub mod core;
pub mod error;
pub mod types;

pub use crate::core::{Engine, GameConfig, GameSnapshot};
pub use crate::error::EngineError;
