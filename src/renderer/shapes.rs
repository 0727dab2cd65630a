//! Decorative shapes: palette, player glow layers and idle animations
//!
//! Purely visual. Nothing here feeds back into the simulation.

use super::layout::Circle;

/// RGBA color (alpha 0-1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS `rgba()` string for canvas styles
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
    }
}

/// Theme colors
pub mod palette {
    use super::Rgba;

    pub const PRIMARY: Rgba = Rgba::rgb(0x25, 0x97, 0xA6);
    pub const SECONDARY: Rgba = Rgba::rgb(0x5A, 0x3A, 0xC7);
    pub const SURFACE: Rgba = Rgba::rgb(0x10, 0x18, 0x30);
    pub const HIGHLIGHT: Rgba = Rgba::rgb(0xFF, 0x8A, 0x5C);
    pub const ON_DARK: Rgba = Rgba::rgb(0xE3, 0xE9, 0xFF);
    pub const BACKDROP: Rgba = Rgba::rgb(0x04, 0x09, 0x14);
}

/// Glow pulse period (one direction), seconds
const PULSE_SECS: f64 = 1.4;
/// Bob period (one direction), seconds
const BOB_SECS: f64 = 1.8;
/// Ripple period, seconds
const RIPPLE_SECS: f64 = 1.6;

/// Smooth 0→1→0 over two periods
fn ping_pong(time_secs: f64, period: f64) -> f32 {
    let phase = (time_secs / period).rem_euclid(2.0);
    let t = if phase < 1.0 { phase as f32 } else { (2.0 - phase) as f32 };
    // Ease in-out
    t * t * (3.0 - 2.0 * t)
}

/// Idle animation values for the player token
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerMotion {
    /// Glow scale, 0.92 - 1.08
    pub glow_pulse: f32,
    /// Vertical bob in player radii, -0.18 - 0.18
    pub bob: f32,
    /// Ripple progress 0 - 1
    pub ripple: f32,
}

impl PlayerMotion {
    /// No movement (reduced motion)
    pub fn still() -> Self {
        Self {
            glow_pulse: 1.0,
            bob: 0.0,
            ripple: 1.0,
        }
    }

    /// Animation values at a point in time
    pub fn at(time_secs: f64) -> Self {
        Self {
            glow_pulse: 0.92 + 0.16 * ping_pong(time_secs, PULSE_SECS),
            bob: -0.18 + 0.36 * ping_pong(time_secs, BOB_SECS),
            ripple: (time_secs / RIPPLE_SECS).rem_euclid(1.0) as f32,
        }
    }
}

/// One filled circle of the player's glow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowLayer {
    pub circle: Circle,
    pub color: Rgba,
}

/// Layers to paint for the player, back to front
pub fn player_layers(base: Circle, motion: PlayerMotion) -> Vec<GlowLayer> {
    let core = palette::SECONDARY;
    let center = Circle {
        cy: base.cy + motion.bob * base.r,
        ..base
    };
    let scaled = |factor: f32| Circle {
        r: base.r * factor,
        ..center
    };

    let mut layers = Vec::with_capacity(4);
    let ripple_alpha = (1.0 - motion.ripple) * 0.32;
    if ripple_alpha > 0.01 {
        layers.push(GlowLayer {
            circle: scaled(1.2 + motion.ripple * 2.1),
            color: core.with_alpha(ripple_alpha),
        });
    }
    layers.push(GlowLayer {
        circle: scaled(2.2 * motion.glow_pulse),
        color: core.with_alpha(0.25),
    });
    layers.push(GlowLayer {
        circle: scaled(1.35 * motion.glow_pulse),
        color: core.with_alpha(0.55),
    });
    layers.push(GlowLayer {
        circle: scaled(0.95 + motion.glow_pulse * 0.05),
        color: core,
    });
    layers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css() {
        assert_eq!(
            palette::PRIMARY.with_alpha(0.5).css(),
            "rgba(37, 151, 166, 0.500)"
        );
    }

    #[test]
    fn test_motion_ranges() {
        for i in 0..200 {
            let m = PlayerMotion::at(i as f64 * 0.037);
            assert!(m.glow_pulse > 0.919 && m.glow_pulse < 1.081);
            assert!(m.bob.abs() < 0.181);
            assert!((0.0..=1.0).contains(&m.ripple));
        }
    }

    #[test]
    fn test_still_player_has_no_ripple() {
        let base = Circle {
            cx: 10.0,
            cy: 20.0,
            r: 4.0,
        };
        let layers = player_layers(base, PlayerMotion::still());
        assert_eq!(layers.len(), 3);
        let core = layers.last().unwrap();
        assert!((core.circle.r - base.r).abs() < 1e-5);
        assert_eq!(core.circle.cy, base.cy);
        assert_eq!(core.color, palette::SECONDARY);
    }
}
