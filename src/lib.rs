//! Lane Leap - An endless three-lane jumping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, platforms, jumps, game state)
//! - `tuning`: Data-driven game balance
//! - `ui`: Score readout and game-over overlay model
//! - `render`: Sprite boundary the frontends implement
//! - `host`: Hosting page notifications

pub mod host;
pub mod render;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Number of lanes (the world wraps around them like a cylinder)
    pub const LANE_COUNT: u8 = 3;
    /// Lane the player starts (and restarts) in
    pub const START_LANE: u8 = 1;

    /// Normal jump duration (seconds)
    pub const JUMP_DURATION: f32 = 0.15;
    /// Duration of each moving half of a wrap jump (seconds)
    pub const WRAP_STAGE_DURATION: f32 = 0.1;
    /// Wrap jumps peak this far above the midpoint of start and target
    pub const WRAP_ARC_LIFT: f32 = 20.0;
    /// Duration of each half of the void hop (seconds)
    pub const VOID_HOP_DURATION: f32 = 0.2;
    /// How high the void hop rises before dropping back
    pub const VOID_HOP_HEIGHT: f32 = 50.0;
    /// Where a finished void hop parks the player, below the screen bottom
    pub const VOID_DROP_BELOW: f32 = 200.0;

    /// Squash/stretch applied to the player during a normal jump
    pub const JUMP_STRETCH_X: f32 = 0.8;
    pub const JUMP_STRETCH_Y: f32 = 1.2;

    /// Sprite sizes (visual only)
    pub const CAPSULE_SIZE: (f32, f32) = (30.0, 50.0);
    pub const PLATFORM_SIZE: (f32, f32) = (100.0, 20.0);
}
