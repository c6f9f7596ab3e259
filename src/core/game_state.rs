//! Game state module - the frame-driven simulation engine
//!
//! This module ties together grid, pill, resolver, rng, and scoring. One call
//! to `advance` is one logical frame: queued inputs apply, gravity counts
//! down, the resolver runs while the grid is unstable, and the mode machine
//! moves between Loading, Playing, Paused, Won, and Lost. The engine owns no
//! timers or I/O; frame pacing and input device mapping belong to the driver.

use crate::core::grid::Grid;
use crate::core::pill::Pill;
use crate::core::resolver::{demote_orphans, find_matches, mark_destroyed, settle_step, sweep_destroyed};
use crate::core::rng::{hash_seed, SimpleRng};
use crate::core::scoring::{clear_score, effective_speed, gravity_frames, time_bonus};
use crate::core::snapshot::{GameSnapshot, PillSnapshot, RepeatSnapshot};
use crate::error::EngineError;
use crate::types::*;

use serde::{Deserialize, Serialize};

/// Construction parameters. Validation happens before any state is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    pub level: u8,
    pub speed: u8,
    pub seed: u32,
}

impl GameConfig {
    pub fn new(level: u8, speed: u8, seed: u32) -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            level,
            speed,
            seed,
        }
    }

    /// Same as `new` but folds a string seed into the numeric one
    pub fn with_seed_str(level: u8, speed: u8, seed: &str) -> Self {
        Self::new(level, speed, hash_seed(seed))
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&self.width)
            || !(MIN_DIMENSION..=MAX_DIMENSION).contains(&self.height)
        {
            return Err(EngineError::Configuration(format!(
                "grid dimensions {}x{} outside {}..={}",
                self.width, self.height, MIN_DIMENSION, MAX_DIMENSION
            )));
        }
        if self.level > MAX_LEVEL {
            return Err(EngineError::Configuration(format!(
                "level {} above maximum {}",
                self.level, MAX_LEVEL
            )));
        }
        if self.speed as usize >= GRAVITY_FRAMES.len() {
            return Err(EngineError::Configuration(format!(
                "speed {} outside gravity table (0..{})",
                self.speed,
                GRAVITY_FRAMES.len()
            )));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(0, 0, 1)
    }
}

/// Auto-repeat state for one held directional input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Repeat {
    held: bool,
    countdown: u32,
}

const SLOT_LEFT: usize = 0;
const SLOT_RIGHT: usize = 1;
const SLOT_DOWN: usize = 2;

fn repeat_slot(input: Input) -> Option<usize> {
    match input {
        Input::Left => Some(SLOT_LEFT),
        Input::Right => Some(SLOT_RIGHT),
        Input::Down => Some(SLOT_DOWN),
        _ => None,
    }
}

/// Where the resolver is in its destroy/settle cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolvePhase {
    Idle,
    Destroying { frames_left: u32 },
    Settling { frames_left: u32 },
}

/// Move/rotate requests derived from one frame of input
#[derive(Debug, Clone, Copy, Default)]
struct Requests {
    rotate_cw: bool,
    rotate_ccw: bool,
    left: bool,
    right: bool,
    soft_drop: bool,
    hard_drop: bool,
}

/// The complete simulation engine
#[derive(Debug, Clone)]
pub struct Engine {
    config: GameConfig,
    grid: Grid,
    mode: Mode,
    active: Option<Pill>,
    next: [PillColor; 2],
    rng: SimpleRng,
    repeats: [Repeat; 3],
    fall_countdown: u32,
    phase: ResolvePhase,
    /// Viruses cleared since the triggering lock (drives score doubling)
    chain_viruses: u32,
    /// Resolver passes with clears since the triggering lock
    combo: u32,
    initial_viruses: u16,
    frame: u64,
    ticks_in_mode: u64,
    /// Elapsed Playing frames; pause does not advance this
    total_ticks: u64,
    pills_placed: u32,
    score: u32,
    time_bonus: u32,
}

impl Engine {
    /// Build an engine with a freshly populated grid. Fails fast with a
    /// configuration error; no partially constructed engine is observable.
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = SimpleRng::new(config.seed);
        let grid = Grid::with_viruses(config.width, config.height, config.level, &mut rng)?;
        let next = [rng.next_color(), rng.next_color()];
        let initial_viruses = grid.virus_count();
        log::debug!(
            "engine ready: {}x{}, level {}, {} viruses",
            config.width,
            config.height,
            config.level,
            initial_viruses
        );
        Ok(Self {
            config,
            grid,
            mode: Mode::Loading,
            active: None,
            next,
            rng,
            repeats: [Repeat::default(); 3],
            fall_countdown: 0,
            phase: ResolvePhase::Idle,
            chain_viruses: 0,
            combo: 0,
            initial_viruses,
            frame: 0,
            ticks_in_mode: 0,
            total_ticks: 0,
            pills_placed: 0,
            score: 0,
            time_bonus: 0,
        })
    }

    /// Build an engine around a pre-made grid (fixtures, tests). The grid's
    /// dimensions must agree with the config.
    pub fn with_grid(config: GameConfig, grid: Grid) -> Result<Self, EngineError> {
        config.validate()?;
        if grid.width() != config.width || grid.height() != config.height {
            return Err(EngineError::Configuration(format!(
                "grid is {}x{} but config says {}x{}",
                grid.width(),
                grid.height(),
                config.width,
                config.height
            )));
        }
        let mut engine = Self::new(GameConfig {
            width: grid.width(),
            height: grid.height(),
            ..config
        })?;
        engine.initial_viruses = grid.virus_count();
        engine.grid = grid;
        Ok(engine)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<Pill> {
        self.active
    }

    pub fn next_pill(&self) -> [PillColor; 2] {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_bonus(&self) -> u32 {
        self.time_bonus
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn pills_placed(&self) -> u32 {
        self.pills_placed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Speed index currently in effect (base plus placement acceleration)
    pub fn current_speed(&self) -> u8 {
        effective_speed(self.config.speed, self.pills_placed)
    }

    /// Advance one logical frame. Pure with respect to the previous state and
    /// this frame's input set; always returns the frame's ordered events.
    pub fn advance(&mut self, inputs: &[InputEvent]) -> Vec<GameEvent> {
        let mut events = Vec::new();

        // Pause toggling is edge-triggered and bypasses the playing gate.
        for ev in inputs {
            if ev.input == Input::Pause && ev.pressed {
                match self.mode {
                    Mode::Playing => self.set_mode(Mode::Paused),
                    Mode::Paused => self.set_mode(Mode::Playing),
                    _ => {}
                }
            }
        }

        match self.mode {
            Mode::Loading => {
                // The grid was populated at construction; go live and run
                // the rest of this frame as the first playing frame.
                self.set_mode(Mode::Playing);
            }
            Mode::Paused | Mode::Won | Mode::Lost => {
                // Releases must not get lost while gameplay is gated off,
                // or a key would stay stuck held across a resume.
                self.note_releases(inputs);
                self.finish_frame();
                return events;
            }
            Mode::Playing => {}
        }

        let requests = self.update_repeats(inputs);

        if self.active.is_none() && self.phase == ResolvePhase::Idle {
            self.try_spawn(&mut events);
        }

        if self.mode == Mode::Playing {
            self.apply_requests(&requests, &mut events);
            self.apply_gravity(&mut events);
            self.run_resolver(&mut events);
            self.check_win(&mut events);
        }

        self.finish_frame();
        events
    }

    /// Current observable state as an immutable snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        let repeat = |slot: usize, input: Input| RepeatSnapshot {
            input,
            held: self.repeats[slot].held,
            countdown: self.repeats[slot].countdown,
        };
        GameSnapshot {
            mode: self.mode,
            width: self.grid.width(),
            height: self.grid.height(),
            cells: self.grid.cells().to_vec(),
            active: self.active.map(PillSnapshot::from),
            next_pill: self.next,
            repeats: [
                repeat(SLOT_LEFT, Input::Left),
                repeat(SLOT_RIGHT, Input::Right),
                repeat(SLOT_DOWN, Input::Down),
            ],
            seed: self.config.seed,
            frame: self.frame,
            score: self.score,
            time_bonus: self.time_bonus,
            total_ticks: self.total_ticks,
            ticks_in_mode: self.ticks_in_mode,
            pills_placed: self.pills_placed,
            speed: self.current_speed(),
            virus_count: self.grid.virus_count(),
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        log::debug!("mode {} -> {}", self.mode.as_str(), mode.as_str());
        self.mode = mode;
        self.ticks_in_mode = 0;
    }

    fn finish_frame(&mut self) {
        self.frame += 1;
        self.ticks_in_mode += 1;
        if self.mode == Mode::Playing {
            self.total_ticks += 1;
        }
    }

    fn note_releases(&mut self, inputs: &[InputEvent]) {
        for ev in inputs {
            if !ev.pressed {
                if let Some(slot) = repeat_slot(ev.input) {
                    self.repeats[slot] = Repeat::default();
                }
            }
        }
    }

    /// Fold this frame's edges into the auto-repeat counters and derive the
    /// discrete move requests. A fresh press fires immediately and arms the
    /// delay; a held input fires again each time its countdown hits zero.
    fn update_repeats(&mut self, inputs: &[InputEvent]) -> Requests {
        let mut req = Requests::default();
        let mut fresh = [false; 3];

        for ev in inputs {
            match ev.input {
                Input::Left | Input::Right | Input::Down => {
                    let slot = repeat_slot(ev.input).expect("directional input");
                    let repeat = &mut self.repeats[slot];
                    if ev.pressed {
                        if !repeat.held {
                            repeat.held = true;
                            repeat.countdown = if slot == SLOT_DOWN {
                                SOFT_DROP_FRAMES
                            } else {
                                DAS_DELAY_FRAMES
                            };
                            fresh[slot] = true;
                        }
                    } else {
                        *repeat = Repeat::default();
                    }
                }
                Input::RotateCw => req.rotate_cw |= ev.pressed,
                Input::RotateCcw => req.rotate_ccw |= ev.pressed,
                Input::Up => req.hard_drop |= ev.pressed,
                Input::Pause => {}
            }
        }

        for slot in 0..self.repeats.len() {
            let repeat = &mut self.repeats[slot];
            if repeat.held && !fresh[slot] {
                repeat.countdown = repeat.countdown.saturating_sub(1);
                if repeat.countdown == 0 {
                    fresh[slot] = true;
                    repeat.countdown = if slot == SLOT_DOWN {
                        SOFT_DROP_FRAMES
                    } else {
                        REPEAT_FRAMES
                    };
                }
            }
        }

        req.left |= fresh[SLOT_LEFT];
        req.right |= fresh[SLOT_RIGHT];
        req.soft_drop |= fresh[SLOT_DOWN];
        req
    }

    fn try_spawn(&mut self, events: &mut Vec<GameEvent>) {
        let pill = Pill::spawn(self.next, self.grid.width());
        if !pill.fits(&self.grid) {
            log::debug!("spawn blocked at frame {}, topping out", self.frame);
            self.set_mode(Mode::Lost);
            events.push(GameEvent::Lost);
            return;
        }
        events.push(GameEvent::PillSpawned { colors: self.next });
        self.active = Some(pill);
        self.next = [self.rng.next_color(), self.rng.next_color()];
        self.fall_countdown = gravity_frames(self.current_speed());
    }

    /// Fixed priority: rotation, horizontal, soft drop, hard drop
    fn apply_requests(&mut self, req: &Requests, events: &mut Vec<GameEvent>) {
        if self.active.is_none() {
            return;
        }
        if req.rotate_cw || req.rotate_ccw {
            // Clockwise wins if both edges land on the same frame.
            let clockwise = req.rotate_cw;
            if let Some(pill) = self.active.as_mut() {
                pill.try_rotate(clockwise, &self.grid);
            }
        }
        if req.left != req.right {
            let direction = if req.left {
                Direction::Left
            } else {
                Direction::Right
            };
            if let Some(pill) = self.active.as_mut() {
                pill.try_move(direction, &self.grid);
            }
        }
        if req.soft_drop {
            self.descend(events);
        }
        if req.hard_drop && self.active.is_some() {
            while let Some(pill) = self.active.as_mut() {
                if !pill.try_move(Direction::Down, &self.grid) {
                    break;
                }
            }
            self.lock(events);
        }
    }

    fn apply_gravity(&mut self, events: &mut Vec<GameEvent>) {
        if self.active.is_none() {
            return;
        }
        self.fall_countdown = self.fall_countdown.saturating_sub(1);
        if self.fall_countdown == 0 {
            self.descend(events);
        }
    }

    /// One row down; a failed descent is the lock condition
    fn descend(&mut self, events: &mut Vec<GameEvent>) {
        let Some(pill) = self.active.as_mut() else {
            return;
        };
        if pill.try_move(Direction::Down, &self.grid) {
            self.fall_countdown = gravity_frames(self.current_speed());
        } else {
            self.lock(events);
        }
    }

    fn lock(&mut self, events: &mut Vec<GameEvent>) {
        let Some(pill) = self.active.take() else {
            return;
        };
        for (row, col, cell) in pill.lock_cells() {
            self.grid.set(row, col, cell);
        }
        self.pills_placed += 1;
        self.chain_viruses = 0;
        self.combo = 0;
        events.push(GameEvent::PillLocked);
        log::trace!(
            "pill locked at ({}, {}), {} placed",
            pill.row,
            pill.col,
            self.pills_placed
        );
        self.begin_resolution(events);
    }

    /// Scan for matches against the unmutated grid and start the destroy
    /// window when any are found; otherwise the grid is stable.
    fn begin_resolution(&mut self, events: &mut Vec<GameEvent>) {
        let positions = find_matches(&self.grid);
        if positions.is_empty() {
            self.phase = ResolvePhase::Idle;
            return;
        }
        let stats = mark_destroyed(&mut self.grid, &positions);
        demote_orphans(&mut self.grid);
        let points = clear_score(stats.viruses, self.chain_viruses);
        self.score = self.score.saturating_add(points);
        self.chain_viruses += stats.viruses;
        self.combo += 1;
        events.push(GameEvent::CellsCleared {
            cells: stats.cells,
            viruses: stats.viruses,
            combo: self.combo,
        });
        self.phase = ResolvePhase::Destroying {
            frames_left: DESTROY_ANIMATION_FRAMES,
        };
    }

    /// Drive the destroy/settle cycle; a no-op once the grid is stable
    fn run_resolver(&mut self, events: &mut Vec<GameEvent>) {
        match self.phase {
            ResolvePhase::Idle => {}
            ResolvePhase::Destroying { frames_left } => {
                if frames_left > 1 {
                    self.phase = ResolvePhase::Destroying {
                        frames_left: frames_left - 1,
                    };
                } else {
                    sweep_destroyed(&mut self.grid);
                    self.phase = ResolvePhase::Settling {
                        frames_left: SETTLE_FALL_FRAMES,
                    };
                }
            }
            ResolvePhase::Settling { frames_left } => {
                if frames_left > 1 {
                    self.phase = ResolvePhase::Settling {
                        frames_left: frames_left - 1,
                    };
                } else if settle_step(&mut self.grid) {
                    self.phase = ResolvePhase::Settling {
                        frames_left: SETTLE_FALL_FRAMES,
                    };
                } else {
                    // Stable; cascade scan continues the chain or goes idle.
                    self.begin_resolution(events);
                }
            }
        }
    }

    fn check_win(&mut self, events: &mut Vec<GameEvent>) {
        if self.mode == Mode::Playing
            && self.initial_viruses > 0
            && self.grid.virus_count() == 0
        {
            let bonus = time_bonus(self.config.level, self.total_ticks);
            self.time_bonus = bonus;
            self.score = self.score.saturating_add(bonus);
            self.set_mode(Mode::Won);
            events.push(GameEvent::Won {
                score: self.score,
                time_bonus: bonus,
            });
        }
    }
}
