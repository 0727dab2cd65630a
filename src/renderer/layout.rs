//! Play-field layout
//!
//! Converts normalized course coordinates into pixel geometry for a
//! play-field of a given size. Obstacles above the top edge get negative
//! `y`; painters clip to the field.

use crate::consts::*;
use crate::sim::Obstacle;

/// Obstacle width as a fraction of the lane width
pub const OBSTACLE_WIDTH_FRACTION: f32 = 0.6;
/// Corner radius as a fraction of the obstacle width
pub const OBSTACLE_CORNER_FRACTION: f32 = 0.32;

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Circle in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
}

/// Pixel geometry for one play-field size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn lane_width(&self) -> f32 {
        self.width / LANE_COUNT as f32
    }

    /// Horizontal centre of a lane
    pub fn lane_center_x(&self, lane: usize) -> f32 {
        self.lane_width() * (lane as f32 + 0.5)
    }

    /// X of the lane boundaries, both outer edges included
    pub fn lane_dividers(&self) -> impl Iterator<Item = f32> + '_ {
        (0..=LANE_COUNT).map(move |i| i as f32 * self.lane_width())
    }

    /// The player token in `lane`
    pub fn player(&self, lane: usize) -> Circle {
        Circle {
            cx: self.lane_center_x(lane),
            cy: self.height * PLAYER_CENTER_Y,
            r: self.height * PLAYER_RADIUS_FRACTION,
        }
    }

    /// An obstacle's body
    pub fn obstacle(&self, obstacle: &Obstacle) -> Rect {
        let lane_width = self.lane_width();
        let w = lane_width * OBSTACLE_WIDTH_FRACTION;
        Rect {
            x: obstacle.lane as f32 * lane_width + (lane_width - w) / 2.0,
            y: obstacle.top * self.height,
            w,
            h: self.height * OBSTACLE_HEIGHT_FRACTION,
        }
    }

    /// Corner radius for obstacle bodies
    pub fn obstacle_corner_radius(&self) -> f32 {
        self.lane_width() * OBSTACLE_WIDTH_FRACTION * OBSTACLE_CORNER_FRACTION
    }

    /// True if any part of `rect` is inside the field
    pub fn is_visible(&self, rect: &Rect) -> bool {
        rect.y + rect.h > 0.0 && rect.y < self.height && rect.x + rect.w > 0.0 && rect.x < self.width
    }
}
