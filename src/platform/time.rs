//! Frame clock
//!
//! Turns the millisecond timestamps a frame callback receives into second
//! deltas for the simulation. Clamping to a maximum step is the
//! simulation's job, not the clock's.

/// Tracks the previous frame timestamp
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame (0 on the first frame)
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }
        dt
    }

    /// Forget the last frame, e.g. when a new run starts
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), 0.0);
        assert!((clock.delta(1016.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = FrameClock::new();
        clock.delta(500.0);
        assert_eq!(clock.delta(400.0), 0.0);
        assert!((clock.delta(450.0) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.delta(100.0);
        clock.reset();
        assert_eq!(clock.delta(5000.0), 0.0);
    }
}
