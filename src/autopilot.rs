//! Demo autopilot
//!
//! Picks a lane shift from the current state so the game can play itself
//! (attract mode on web, headless runs on native). Only reads state; the
//! chosen direction goes through the normal `move_lane` path.

use crate::consts::LANE_COUNT;
use crate::sim::{Band, GameState, Obstacle};

/// Start dodging once an obstacle is this close above the player band
pub const DANGER_DISTANCE: f32 = 0.35;

/// Gap between the player band and the nearest obstacle still able to hit
/// it in `lane`. Negative when one already overlaps; infinite when clear.
pub fn lane_clearance(obstacles: &[Obstacle], lane: usize) -> f32 {
    let band = Band::player();
    obstacles
        .iter()
        .filter(|o| o.lane == lane && o.top <= band.bottom)
        .map(|o| band.top - o.bottom())
        .fold(f32::INFINITY, f32::min)
}

/// Direction to shift (-1, 0 or +1) for this frame
pub fn choose_direction(state: &GameState) -> i32 {
    if !state.is_running {
        return 0;
    }
    let lane = state.player_lane;
    let here = lane_clearance(&state.obstacles, lane);
    if here > DANGER_DISTANCE {
        return 0;
    }

    let mut best = (0, here);
    for dir in [-1i32, 1] {
        let Some(neighbour) = lane.checked_add_signed(dir as isize) else {
            continue;
        };
        if neighbour >= LANE_COUNT {
            continue;
        }
        let clearance = lane_clearance(&state.obstacles, neighbour);
        if clearance > best.1 {
            best = (dir, clearance);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(id: u32, lane: usize, top: f32) -> Obstacle {
        Obstacle { id, lane, top }
    }

    #[test]
    fn test_clearance() {
        let obstacles = vec![obstacle(0, 1, 0.2), obstacle(1, 1, 0.4), obstacle(2, 0, 0.95)];
        // Nearest in lane 1 has its trailing edge at 0.58
        assert!((lane_clearance(&obstacles, 1) - 0.16).abs() < 1e-5);
        // Lane 0's obstacle is already past the player
        assert_eq!(lane_clearance(&obstacles, 0), f32::INFINITY);
        assert_eq!(lane_clearance(&obstacles, 2), f32::INFINITY);
    }

    #[test]
    fn test_stays_when_clear() {
        let state = GameState {
            obstacles: vec![obstacle(0, 1, -0.18)],
            ..Default::default()
        };
        assert_eq!(choose_direction(&state), 0);
    }

    #[test]
    fn test_dodges_toward_open_lane() {
        let state = GameState {
            player_lane: 1,
            obstacles: vec![obstacle(0, 1, 0.4), obstacle(1, 0, 0.3)],
            ..Default::default()
        };
        assert_eq!(choose_direction(&state), 1);

        let state = GameState {
            player_lane: 1,
            obstacles: vec![obstacle(0, 1, 0.4), obstacle(1, 2, 0.3)],
            ..Default::default()
        };
        assert_eq!(choose_direction(&state), -1);
    }

    #[test]
    fn test_never_steps_off_the_course() {
        let state = GameState {
            player_lane: 0,
            obstacles: vec![obstacle(0, 0, 0.45)],
            ..Default::default()
        };
        assert_eq!(choose_direction(&state), 1);
    }

    #[test]
    fn test_stays_when_neighbours_are_worse() {
        let state = GameState {
            player_lane: 1,
            obstacles: vec![obstacle(0, 1, 0.3), obstacle(1, 0, 0.7), obstacle(2, 2, 0.7)],
            ..Default::default()
        };
        assert_eq!(choose_direction(&state), 0);
    }
}
