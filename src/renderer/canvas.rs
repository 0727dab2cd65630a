//! Canvas 2D painter (wasm32 only)
//!
//! Reads a `GameState` and paints one frame. Never mutates game state.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::layout::{Circle, Layout, Rect};
use super::shapes::{PlayerMotion, palette, player_layers};
use crate::sim::GameState;

/// Paints frames onto a 2D canvas context
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    layout: Layout,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d, width: f32, height: f32) -> Self {
        Self {
            ctx,
            layout: Layout::new(width, height),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.layout = Layout::new(width, height);
    }

    /// Paint the course for `state` at `time_secs` (animation clock)
    pub fn paint(&self, state: &GameState, time_secs: f64, reduced_motion: bool) {
        let ctx = &self.ctx;
        let w = self.layout.width as f64;
        let h = self.layout.height as f64;

        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str(&palette::BACKDROP.css());
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str(&palette::SURFACE.with_alpha(0.85).css());
        ctx.fill_rect(0.0, 0.0, w, h);

        // Lane dividers
        ctx.set_fill_style_str(&palette::ON_DARK.with_alpha(0.08).css());
        for x in self.layout.lane_dividers() {
            ctx.fill_rect(x as f64 - 1.0, 0.0, 2.0, h);
        }

        let radius = self.layout.obstacle_corner_radius();
        for obstacle in &state.obstacles {
            let rect = self.layout.obstacle(obstacle);
            if !self.layout.is_visible(&rect) {
                continue;
            }
            ctx.set_fill_style_str(&palette::PRIMARY.with_alpha(0.7).css());
            self.round_rect(&rect, radius);
            ctx.fill();
            ctx.set_stroke_style_str(&palette::ON_DARK.with_alpha(0.18).css());
            ctx.set_line_width((rect.w * 0.05) as f64);
            ctx.stroke();
        }

        let motion = if reduced_motion || !state.is_running {
            PlayerMotion::still()
        } else {
            PlayerMotion::at(time_secs)
        };
        for layer in player_layers(self.layout.player(state.player_lane), motion) {
            ctx.set_fill_style_str(&layer.color.css());
            self.circle(&layer.circle);
            ctx.fill();
        }

        if !state.is_running {
            ctx.set_fill_style_str(&palette::BACKDROP.with_alpha(0.55).css());
            ctx.fill_rect(0.0, 0.0, w, h);
        }
    }

    fn circle(&self, c: &Circle) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(c.cx as f64, c.cy as f64, c.r.max(0.0) as f64, 0.0, TAU);
    }

    fn round_rect(&self, rect: &Rect, radius: f32) {
        let ctx = &self.ctx;
        let (x, y, w, h) = (rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        let r = (radius as f64).min(w / 2.0).min(h / 2.0).max(0.0);
        ctx.begin_path();
        ctx.move_to(x + r, y);
        let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = ctx.arc_to(x, y + h, x, y, r);
        let _ = ctx.arc_to(x, y, x + w, y, r);
        ctx.close_path();
    }
}
