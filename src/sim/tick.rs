//! Per-frame simulation step
//!
//! Advances the course by one frame of wall-clock time: moves obstacles,
//! scores the ones that leave the course, scales difficulty, spawns new
//! obstacles and checks for a collision with the player.

use rand::Rng;

use super::collision::find_collision;
use super::state::{GameState, Obstacle};
use crate::consts::*;
use crate::{level_for_score, spawn_interval_for_level};

/// Bound a frame delta to `[0, MAX_FRAME_DT]`.
///
/// A stalled frame (app backgrounded, debugger pause) must not teleport
/// obstacles past the player band. NaN is treated as no time passing.
#[inline]
pub fn clamp_delta(delta_seconds: f32) -> f32 {
    if delta_seconds.is_nan() {
        return 0.0;
    }
    delta_seconds.clamp(0.0, MAX_FRAME_DT)
}

/// Advance the game state by one frame.
///
/// Returns `state` unchanged once the run is over. The random source only
/// picks spawn lanes, so a seeded generator makes runs reproducible.
///
/// `state.spawn_timer` must be finite; every state reachable through
/// `GameState` transitions keeps it so.
pub fn advance<R: Rng>(state: &GameState, delta_seconds: f32, rng: &mut R) -> GameState {
    if !state.is_running {
        return state.clone();
    }
    debug_assert!(state.spawn_timer.is_finite(), "spawn timer must be finite");

    let dt = clamp_delta(delta_seconds);
    let elapsed = state.elapsed + dt;

    // Speed comes from the level the frame started at
    let speed = state.speed();

    let mut score = state.score;
    let mut obstacles = Vec::with_capacity(state.obstacles.len() + 1);
    for obstacle in &state.obstacles {
        let moved = Obstacle {
            top: obstacle.top + speed * dt,
            ..*obstacle
        };
        if moved.has_exited() {
            score += 1;
        } else {
            obstacles.push(moved);
        }
    }

    let high_score = state.high_score.max(score);
    let level = level_for_score(score);
    let interval = spawn_interval_for_level(level);

    let mut timer = state.spawn_timer - dt;
    let mut next_id = state.next_obstacle_id;
    while timer <= 0.0 {
        let lane = rng.random_range(0..LANE_COUNT);
        obstacles.push(Obstacle::spawned(next_id, lane));
        next_id += 1;
        timer += interval;
    }

    let collided = find_collision(&obstacles, state.player_lane).is_some();

    GameState {
        obstacles,
        elapsed,
        score,
        high_score,
        level,
        spawn_timer: timer,
        is_running: !collided,
        next_obstacle_id: next_id,
        ..state.clone()
    }
}

impl GameState {
    /// Advance this state by one frame (see [`advance`])
    pub fn advance<R: Rng>(&self, delta_seconds: f32, rng: &mut R) -> GameState {
        advance(self, delta_seconds, rng)
    }
}
