//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Immutable state values, every transition returns a new state
//! - Injected RNG only (seeded in tests)
//! - Stable obstacle order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Band, find_collision, obstacle_hits_player};
pub use state::{GameState, Obstacle};
pub use tick::{advance, clamp_delta};
