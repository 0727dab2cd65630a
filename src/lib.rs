//! Everglow - an endless lane-dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, scoring, collisions)
//! - `app`: Front-end state machine driving the simulation
//! - `feedback`: Audio/UI cues derived from consecutive states
//! - `renderer`: Play-field layout (and the canvas painter on web)
//! - `platform`: Input mapping and frame clock
//! - `persistence`: Key-value storage (LocalStorage on web, files on native)

pub mod app;
pub mod autopilot;
pub mod feedback;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use app::{App, AppCommand, Screen};
pub use highscores::{HighScore, HighScoreTracker};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Number of lanes the player and obstacles occupy
    pub const LANE_COUNT: usize = 3;

    /// Obstacle height as a fraction of the course height
    pub const OBSTACLE_HEIGHT_FRACTION: f32 = 0.18;
    /// Player token radius as a fraction of the course height
    pub const PLAYER_RADIUS_FRACTION: f32 = 0.08;
    /// Vertical centre of the player token (0 = top, 1 = exit line)
    pub const PLAYER_CENTER_Y: f32 = 0.82;

    /// Largest simulated step a single frame may take (seconds)
    pub const MAX_FRAME_DT: f32 = 0.16;

    /// Obstacle fall speed at level 1 (course heights per second)
    pub const BASE_SPEED: f32 = 0.55;
    /// Extra fall speed per level above 1
    pub const SPEED_PER_LEVEL: f32 = 0.09;

    /// Spawn interval at level 1 (seconds)
    pub const SPAWN_START_INTERVAL: f32 = 0.65;
    /// Spawn interval reduction per level above 1
    pub const SPAWN_INTERVAL_STEP: f32 = 0.05;
    /// Spawn interval never drops below this
    pub const MIN_SPAWN_INTERVAL: f32 = 0.32;
    /// First spawn happens sooner than a full interval
    pub const INITIAL_SPAWN_TIMER: f32 = SPAWN_START_INTERVAL * 0.6;

    /// Obstacles survived per level
    pub const SCORE_PER_LEVEL: u32 = 8;

    /// How long the high-score badge pulses after a new record (seconds)
    pub const HIGHLIGHT_DURATION: f32 = 1.4;
}

/// Fall speed for a difficulty level
#[inline]
pub fn speed_for_level(level: u32) -> f32 {
    use consts::*;
    BASE_SPEED + level.saturating_sub(1) as f32 * SPEED_PER_LEVEL
}

/// Seconds between spawns for a difficulty level
#[inline]
pub fn spawn_interval_for_level(level: u32) -> f32 {
    use consts::*;
    (SPAWN_START_INTERVAL - level.saturating_sub(1) as f32 * SPAWN_INTERVAL_STEP)
        .max(MIN_SPAWN_INTERVAL)
}

/// Difficulty level reached with a given score
#[inline]
pub fn level_for_score(score: u32) -> u32 {
    score / consts::SCORE_PER_LEVEL + 1
}
