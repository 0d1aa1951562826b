//! Scene Model: the authoritative editable scene and its persisted record shape.
//!
//! # Invariants
//! - Objects stay sorted by ascending `z_index`; ties keep insertion order.
//! - Object ids are unique within a scene and never reassigned by edits.
//! - Editing the scene view never touches the game view.

pub mod camera;
pub mod object;
pub mod record;
pub mod scene;

pub use camera::Camera;
pub use object::{Scalar, SceneObject, Size, Sprite};
pub use record::{ObjectRecord, RecordError};
pub use scene::{NormalizeReport, Scene};
