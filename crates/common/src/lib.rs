//! Common: value types and constants shared by every stagecraft crate.
//!
//! # Invariants
//! - Types here are plain values with no identity beyond [`ObjectId`].

pub mod consts;
pub mod types;

pub use consts::*;
pub use types::{ObjectId, Rgb, SpriteShape, Transform};
