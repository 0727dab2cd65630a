//! Game state and core simulation types
//!
//! The state is an immutable value: every transition returns a new
//! `GameState` and leaves its input untouched.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A falling obstacle occupying one lane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Stable identity for renderers, never reused
    pub id: u32,
    /// Lane index in `[0, LANE_COUNT)`
    pub lane: usize,
    /// Leading edge in course coordinates (0 = top, 1 = exit line)
    pub top: f32,
}

impl Obstacle {
    /// A fresh obstacle just above the visible course
    pub fn spawned(id: u32, lane: usize) -> Self {
        Self {
            id,
            lane,
            top: -OBSTACLE_HEIGHT_FRACTION,
        }
    }

    /// Trailing edge in course coordinates
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + OBSTACLE_HEIGHT_FRACTION
    }

    /// True once the obstacle has crossed the exit line
    #[inline]
    pub fn has_exited(&self) -> bool {
        self.top >= 1.0
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current lane of the player token
    pub player_lane: usize,
    /// Obstacles on the course, in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Simulated seconds since the run started
    pub elapsed: f32,
    /// Obstacles survived this run
    pub score: u32,
    /// Best score across runs and sessions
    pub high_score: u32,
    /// Difficulty tier, derived from score
    pub level: u32,
    /// Seconds until the next spawn check
    pub spawn_timer: f32,
    /// False once a collision has ended the run
    pub is_running: bool,
    /// Bumped on every restart
    pub session: u32,
    /// Next obstacle ID
    pub next_obstacle_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            player_lane: LANE_COUNT / 2,
            obstacles: Vec::new(),
            elapsed: 0.0,
            score: 0,
            high_score: 0,
            level: 1,
            spawn_timer: INITIAL_SPAWN_TIMER,
            is_running: true,
            session: 0,
            next_obstacle_id: 0,
        }
    }
}

impl GameState {
    /// Create a fresh run seeded with a previously persisted high score
    pub fn new(high_score: u32) -> Self {
        Self {
            high_score,
            ..Default::default()
        }
    }

    /// Shift the player one lane in the direction of `direction`'s sign.
    ///
    /// Returns an unchanged copy when the run is over, the direction is zero,
    /// or the player is already against the edge in that direction.
    pub fn move_lane(&self, direction: i32) -> GameState {
        if !self.is_running || direction == 0 {
            return self.clone();
        }
        let target = self.player_lane as i64 + i64::from(direction.signum());
        let new_lane = target.clamp(0, LANE_COUNT as i64 - 1) as usize;
        if new_lane == self.player_lane {
            return self.clone();
        }
        GameState {
            player_lane: new_lane,
            ..self.clone()
        }
    }

    /// Start a new run, keeping the high score and bumping the session
    pub fn restart(&self) -> GameState {
        GameState {
            high_score: self.high_score,
            session: self.session + 1,
            ..Default::default()
        }
    }

    /// True when the run ended on a collision
    pub fn is_game_over(&self) -> bool {
        !self.is_running
    }

    /// Fall speed for the current level
    pub fn speed(&self) -> f32 {
        crate::speed_for_level(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = GameState::default();
        assert_eq!(state.player_lane, 1);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.level, 1);
        assert!(state.is_running);
        assert!((state.spawn_timer - 0.39).abs() < 1e-6);
    }

    #[test]
    fn test_new_keeps_high_score() {
        let state = GameState::new(42);
        assert_eq!(state.high_score, 42);
        assert_eq!(state.score, 0);
        assert_eq!(state.session, 0);
    }

    #[test]
    fn test_move_lane_left_and_right() {
        let state = GameState::default();
        let left = state.move_lane(-1);
        assert_eq!(left.player_lane, 0);
        let right = state.move_lane(1);
        assert_eq!(right.player_lane, 2);
        // Everything else untouched
        assert_eq!(left.obstacles, state.obstacles);
        assert_eq!(left.session, state.session);
    }

    #[test]
    fn test_move_lane_only_sign_matters() {
        let state = GameState::default();
        assert_eq!(state.move_lane(-7).player_lane, 0);
        assert_eq!(state.move_lane(5).player_lane, 2);
    }

    #[test]
    fn test_move_lane_at_edge_is_identity() {
        let state = GameState {
            player_lane: 0,
            ..Default::default()
        };
        assert_eq!(state.move_lane(-1), state);

        let state = GameState {
            player_lane: LANE_COUNT - 1,
            ..Default::default()
        };
        assert_eq!(state.move_lane(1), state);
    }

    #[test]
    fn test_move_lane_zero_is_identity() {
        let state = GameState::default();
        assert_eq!(state.move_lane(0), state);
    }

    #[test]
    fn test_move_lane_ignored_after_game_over() {
        let state = GameState {
            is_running: false,
            ..Default::default()
        };
        assert_eq!(state.move_lane(1), state);
        assert_eq!(state.move_lane(-1), state);
    }

    #[test]
    fn test_restart() {
        let state = GameState {
            player_lane: 0,
            obstacles: vec![Obstacle::spawned(4, 2)],
            elapsed: 12.5,
            score: 17,
            high_score: 30,
            level: 3,
            spawn_timer: 0.1,
            is_running: false,
            session: 4,
            next_obstacle_id: 5,
        };
        let fresh = state.restart();
        assert_eq!(fresh.high_score, 30);
        assert_eq!(fresh.session, 5);
        assert!(fresh.is_running);
        assert_eq!(fresh.score, 0);
        assert_eq!(fresh.level, 1);
        assert_eq!(fresh.player_lane, LANE_COUNT / 2);
        assert!(fresh.obstacles.is_empty());
        assert_eq!(fresh.next_obstacle_id, 0);
        assert_eq!(fresh.elapsed, 0.0);
        assert_eq!(fresh.spawn_timer, INITIAL_SPAWN_TIMER);
    }

    #[test]
    fn test_obstacle_spawned_above_course() {
        let obstacle = Obstacle::spawned(0, 1);
        assert_eq!(obstacle.top, -OBSTACLE_HEIGHT_FRACTION);
        assert!(obstacle.bottom().abs() < 1e-6);
        assert!(!obstacle.has_exited());
    }
}
