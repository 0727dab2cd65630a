//! Rendering module
//!
//! `layout` maps course coordinates to pixels and is shared by every
//! front-end. `canvas` paints a frame with the browser's 2D context.

pub mod layout;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use layout::{Circle, Layout, Rect};
