//! Shared numeric constants for the editor.

// ── Transform limits ────────────────────────────────────────────

/// Smallest scale factor an edit may produce.
pub const MIN_SCALE: f64 = 0.05;

/// Smallest width/height of a primitive, in pixels.
pub const MIN_PRIMITIVE_SIZE: f64 = 4.0;

/// Width/height given to newly added primitives.
pub const DEFAULT_PRIMITIVE_SIZE: f64 = 64.0;

// ── Camera ──────────────────────────────────────────────────────

pub const MIN_ZOOM: f64 = 0.01;
pub const MAX_ZOOM: f64 = 10.0;

/// Zoom multiplier applied per mouse wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

// ── Tools ───────────────────────────────────────────────────────

/// Degrees of rotation per horizontal screen pixel dragged.
pub const ROTATE_SENSITIVITY: f64 = 0.5;

/// Step used when rotation snapping is requested.
pub const ROTATE_SNAP_DEGREES: f64 = 15.0;

/// Changes at or below this magnitude do not count as edits.
pub const CHANGE_EPSILON: f64 = 1e-6;

/// World-space offset applied to pasted copies.
pub const PASTE_OFFSET: f64 = 20.0;

// ── Scene ───────────────────────────────────────────────────────

pub const DEFAULT_GRID_SIZE: u32 = 32;

/// Maximum number of undo snapshots retained.
pub const HISTORY_CAPACITY: usize = 50;

/// Version written into every saved scene file.
pub const SCENE_FORMAT_VERSION: u32 = 1;
