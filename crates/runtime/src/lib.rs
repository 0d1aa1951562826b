//! Runtime bridge: instantiate live drawables from a saved scene, and turn a
//! live object graph back into a scene.
//!
//! Both directions are one-way snapshots. A spawned runtime does not track
//! later edits, and an exported scene does not track the live graph.
//!
//! # Invariants
//! - Drawables keep the scene's draw order.
//! - Every drawable is reachable by a unique name.
//! - Export reads live state only through [`Exportable`]; no reflection.

mod export;
mod handle;

pub use export::{Exportable, LiveGraph, export};
pub use handle::{Drawable, GameView, RuntimeHandle};

use stagecraft_persist::StoreError;

/// Errors from the runtime bridge.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("failed to load scene: {0}")]
    Load(#[from] StoreError),
}
