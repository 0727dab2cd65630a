//! Collision detection between obstacles and the player token
//!
//! The player is a fixed vertical band in its lane; obstacles are vertical
//! spans in theirs. Both intervals are closed, so touching edges collide.

use super::state::Obstacle;
use crate::consts::*;

/// Vertical extent of something on the course, in course coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub top: f32,
    pub bottom: f32,
}

impl Band {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    /// The band the player token occupies (independent of lane)
    pub fn player() -> Self {
        Self::new(
            PLAYER_CENTER_Y - PLAYER_RADIUS_FRACTION,
            PLAYER_CENTER_Y + PLAYER_RADIUS_FRACTION,
        )
    }

    /// The band an obstacle occupies
    pub fn of_obstacle(obstacle: &Obstacle) -> Self {
        Self::new(obstacle.top, obstacle.bottom())
    }

    /// Closed-interval overlap test
    #[inline]
    pub fn overlaps(&self, other: &Band) -> bool {
        self.top <= other.bottom && self.bottom >= other.top
    }
}

/// Check a single obstacle against the player in `player_lane`
pub fn obstacle_hits_player(obstacle: &Obstacle, player_lane: usize) -> bool {
    obstacle.lane == player_lane && Band::of_obstacle(obstacle).overlaps(&Band::player())
}

/// First obstacle (in course order) that hits the player, if any
pub fn find_collision(obstacles: &[Obstacle], player_lane: usize) -> Option<&Obstacle> {
    obstacles
        .iter()
        .find(|obstacle| obstacle_hits_player(obstacle, player_lane))
}
