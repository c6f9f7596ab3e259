//! Scoring module - clear-chain scoring, speed tables, and the win-time bonus
//!
//! The exact formula is a policy decision kept behind these pure functions so
//! the constants can be swapped without touching the tick engine:
//! - each virus cleared in a resolution chain scores `100 << min(i, 7)` where
//!   `i` counts viruses cleared since the triggering lock;
//! - cleared non-virus cells score nothing on their own;
//! - winning adds `(par - elapsed) / 2` with `par = 3600 * (level + 1)`.

use crate::types::{
    CHAIN_EXPONENT_CAP, GRAVITY_FRAMES, MAX_VIRUSES, MIN_VIRUS_ROW, PAR_FRAMES_PER_LEVEL,
    VIRUS_CLEAR_BASE,
};

/// Frames for the pill to fall one row at the given speed index.
/// Indexes past the table clamp to the fastest entry.
pub fn gravity_frames(speed: u8) -> u32 {
    let idx = (speed as usize).min(GRAVITY_FRAMES.len() - 1);
    GRAVITY_FRAMES[idx]
}

/// Effective speed rises by one step per 10 pills placed, clamped to the table
pub fn effective_speed(base_speed: u8, pills_placed: u32) -> u8 {
    let boost = (pills_placed / 10).min(GRAVITY_FRAMES.len() as u32 - 1) as u8;
    base_speed
        .saturating_add(boost)
        .min(GRAVITY_FRAMES.len() as u8 - 1)
}

/// How many viruses to place for a level
pub fn virus_target(level: u8) -> u16 {
    ((level as u16 + 1) * 4).min(MAX_VIRUSES)
}

/// Topmost playable row (0-based) eligible for virus placement
pub fn min_virus_row(level: u8) -> u8 {
    let idx = (level as usize).min(MIN_VIRUS_ROW.len() - 1);
    MIN_VIRUS_ROW[idx]
}

/// Points for `viruses` cleared in one resolver pass, where `chain_before`
/// viruses were already cleared earlier in the same chain.
pub fn clear_score(viruses: u32, chain_before: u32) -> u32 {
    let mut total: u32 = 0;
    for i in 0..viruses {
        let exponent = (chain_before + i).min(CHAIN_EXPONENT_CAP);
        total = total.saturating_add(VIRUS_CLEAR_BASE << exponent);
    }
    total
}

/// Time bonus granted on a win; zero once past par
pub fn time_bonus(level: u8, elapsed_frames: u64) -> u32 {
    let par = u64::from(PAR_FRAMES_PER_LEVEL) * (u64::from(level) + 1);
    (par.saturating_sub(elapsed_frames) / 2) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_frames_clamped() {
        assert_eq!(gravity_frames(0), 40);
        assert_eq!(gravity_frames(10), 20);
        assert_eq!(gravity_frames(20), 1);
        assert_eq!(gravity_frames(200), 1);
    }

    #[test]
    fn test_effective_speed() {
        assert_eq!(effective_speed(0, 0), 0);
        assert_eq!(effective_speed(0, 9), 0);
        assert_eq!(effective_speed(0, 10), 1);
        assert_eq!(effective_speed(5, 35), 8);
        assert_eq!(effective_speed(20, 1000), 20);
    }

    #[test]
    fn test_virus_target() {
        assert_eq!(virus_target(0), 4);
        assert_eq!(virus_target(4), 20);
        assert_eq!(virus_target(20), 84);
        assert_eq!(virus_target(255), 84);
    }

    #[test]
    fn test_min_virus_row() {
        assert_eq!(min_virus_row(0), 5);
        assert_eq!(min_virus_row(14), 5);
        assert_eq!(min_virus_row(15), 4);
        assert_eq!(min_virus_row(17), 3);
        assert_eq!(min_virus_row(19), 2);
        assert_eq!(min_virus_row(99), 2);
    }

    #[test]
    fn test_clear_score_doubles_along_chain() {
        assert_eq!(clear_score(0, 0), 0);
        assert_eq!(clear_score(1, 0), 100);
        assert_eq!(clear_score(2, 0), 100 + 200);
        assert_eq!(clear_score(4, 0), 100 + 200 + 400 + 800);
        // A cascade pass continues the doubling where the chain left off.
        assert_eq!(clear_score(1, 2), 400);
        assert_eq!(clear_score(2, 3), 800 + 1600);
    }

    #[test]
    fn test_clear_score_exponent_cap() {
        assert_eq!(clear_score(1, 7), 100 << 7);
        assert_eq!(clear_score(1, 40), 100 << 7);
    }

    #[test]
    fn test_time_bonus() {
        assert_eq!(time_bonus(0, 0), 1800);
        assert_eq!(time_bonus(0, 3600), 0);
        assert_eq!(time_bonus(0, 9999), 0);
        assert_eq!(time_bonus(2, 3600), 3600);
    }
}
