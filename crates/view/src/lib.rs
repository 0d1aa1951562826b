//! View: coordinate mapping between screen and world, hit-testing, and the
//! renderer-agnostic read-only interface.
//!
//! # Invariants
//! - `world_to_screen` and `screen_to_world` are inverses.
//! - Zooming about an anchor keeps the world point under it fixed.
//! - Renderers cannot mutate the scene.

pub mod hit;
mod renderer;
pub mod viewport;

pub use hit::{Aabb, ImageSizes, NoImageSizes, bounds, display_size, hit_test, hit_test_screen, screen_bounds};
pub use renderer::{DebugTextRenderer, Renderer};
pub use viewport::{Viewport, ZoomLimits};
