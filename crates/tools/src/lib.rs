//! Developer Tooling: read-only scene inspection for command line and debug
//! panels.
//!
//! # Invariants
//! - Inspection never mutates the scene.

mod inspector;

pub use inspector::{ObjectInfo, SceneInspector, SceneSummary};
