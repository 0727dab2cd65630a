//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keys, taps) mapped to game actions
//! - Frame timestamps turned into simulation deltas
//!
//! Storage lives in [`crate::persistence`].

pub mod input;
pub mod time;

pub use input::{InputAction, action_for_key, action_for_tap};
pub use time::FrameClock;
