//! Persistence: scene file encoding and file-backed save/load.
//!
//! # Invariants
//! - `decode(encode(s)) == s` for every normalized scene.
//! - Loading accepts files missing optional fields; schema changes are additive.
//! - A failed save leaves any previous file intact.

pub mod codec;
pub mod store;

pub use codec::{decode, decode_with_report, encode};
pub use store::{SCENE_EXTENSION, StoreError, list_scenes, load_scene, save_scene};
