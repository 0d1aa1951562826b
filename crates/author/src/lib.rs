//! Authoring: the editor session, tool drags, property edits and snapshot
//! undo/redo.
//!
//! # Invariants
//! - Every discrete edit commits exactly one history checkpoint.
//! - Drags are computed from their start state and total pointer delta, and
//!   commit once on release only if something changed.
//! - Undo never discards the base checkpoint.
//! - Locked objects never change through transform edits.

pub mod config;
pub mod drag;
pub mod history;
pub mod property;
pub mod session;

pub use config::EditorConfig;
pub use drag::{DragDelta, DragRules, DragStart, Pose, drag_pose};
pub use history::{History, Snapshot};
pub use property::{Property, PropertyValue};
pub use session::{EditError, EditorSession};
