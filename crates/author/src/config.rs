use stagecraft_common::{
    DEFAULT_PRIMITIVE_SIZE, HISTORY_CAPACITY, MIN_PRIMITIVE_SIZE, MIN_SCALE, PASTE_OFFSET,
    ROTATE_SENSITIVITY, ROTATE_SNAP_DEGREES, WHEEL_ZOOM_STEP,
};
use stagecraft_view::ZoomLimits;

/// Tunables for an editor session.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Snapshots kept on the undo stack, including the current state.
    pub history_capacity: usize,
    pub zoom_limits: ZoomLimits,
    pub wheel_zoom_step: f64,
    /// Degrees per horizontal screen pixel.
    pub rotate_sensitivity: f64,
    pub rotate_snap_degrees: f64,
    pub min_scale: f64,
    pub min_primitive_size: f64,
    pub default_primitive_size: f64,
    pub paste_offset: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: HISTORY_CAPACITY,
            zoom_limits: ZoomLimits::default(),
            wheel_zoom_step: WHEEL_ZOOM_STEP,
            rotate_sensitivity: ROTATE_SENSITIVITY,
            rotate_snap_degrees: ROTATE_SNAP_DEGREES,
            min_scale: MIN_SCALE,
            min_primitive_size: MIN_PRIMITIVE_SIZE,
            default_primitive_size: DEFAULT_PRIMITIVE_SIZE,
            paste_offset: PASTE_OFFSET,
        }
    }
}
