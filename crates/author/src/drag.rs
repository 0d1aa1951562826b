//! Drag math for the manipulation tools.
//!
//! Every update is computed from the values captured at drag start plus the
//! total pointer delta since then. Nothing accumulates per event, so the
//! result depends only on where the drag started and where the pointer is.

use glam::DVec2;
use stagecraft_common::CHANGE_EPSILON;
use stagecraft_input::{Modifiers, Tool};
use stagecraft_scene::{SceneObject, Size};

use crate::config::EditorConfig;

/// The editable geometric state of one object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Width/height for primitives.
    pub size: Option<Size>,
}

impl Pose {
    pub fn of(obj: &SceneObject) -> Self {
        let t = obj.transform;
        Self {
            x: t.x,
            y: t.y,
            rotation: t.rotation,
            scale_x: t.scale_x,
            scale_y: t.scale_y,
            size: obj.sprite.primitive_size(),
        }
    }

    pub fn apply_to(&self, obj: &mut SceneObject) {
        obj.transform.x = self.x;
        obj.transform.y = self.y;
        obj.transform.rotation = self.rotation;
        obj.transform.scale_x = self.scale_x;
        obj.transform.scale_y = self.scale_y;
        if let (Some(size), Some(slot)) = (self.size, obj.sprite.primitive_size_mut()) {
            *slot = size;
        }
    }

    /// Whether any component moved by more than [`CHANGE_EPSILON`].
    pub fn differs(&self, other: &Self) -> bool {
        let size_moved = match (self.size, other.size) {
            (Some(a), Some(b)) => moved(a.width, b.width) || moved(a.height, b.height),
            (None, None) => false,
            _ => true,
        };
        size_moved
            || moved(self.x, other.x)
            || moved(self.y, other.y)
            || moved(self.rotation, other.rotation)
            || moved(self.scale_x, other.scale_x)
            || moved(self.scale_y, other.scale_y)
    }
}

fn moved(a: f64, b: f64) -> bool {
    (a - b).abs() > CHANGE_EPSILON
}

/// What is captured per object when a drag begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStart {
    pub pose: Pose,
    /// Screen-space objects follow the pointer in pixels, not world units.
    pub screen_space: bool,
    /// Unscaled size of an image sprite; turns pointer travel into scale.
    pub native_size: DVec2,
}

/// Total pointer travel since drag start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragDelta {
    pub screen: DVec2,
    pub world: DVec2,
    pub modifiers: Modifiers,
}

impl DragDelta {
    fn for_object(&self, start: &DragStart) -> DVec2 {
        if start.screen_space { self.screen } else { self.world }
    }
}

/// Scene and config values the drag math needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRules {
    /// Grid step when snapping is on.
    pub snap_step: Option<f64>,
    pub rotate_sensitivity: f64,
    pub rotate_snap_degrees: f64,
    pub min_scale: f64,
    pub min_primitive_size: f64,
}

impl DragRules {
    pub fn new(config: &EditorConfig, snap_step: Option<f64>) -> Self {
        Self {
            snap_step,
            rotate_sensitivity: config.rotate_sensitivity,
            rotate_snap_degrees: config.rotate_snap_degrees,
            min_scale: config.min_scale,
            min_primitive_size: config.min_primitive_size,
        }
    }

    fn snap(&self, value: f64) -> f64 {
        match self.snap_step {
            Some(step) if step > 0.0 => (value / step).round() * step,
            _ => value,
        }
    }
}

/// Resulting pose for one object under `tool`.
///
/// [`Tool::Select`] leaves the pose untouched.
pub fn drag_pose(tool: Tool, start: &DragStart, delta: &DragDelta, rules: &DragRules) -> Pose {
    match tool {
        Tool::Select => start.pose,
        Tool::Move => move_pose(start, delta, rules),
        Tool::Rotate => rotate_pose(start, delta, rules),
        Tool::Scale => scale_pose(start, delta, rules),
    }
}

fn move_pose(start: &DragStart, delta: &DragDelta, rules: &DragRules) -> Pose {
    let d = delta.for_object(start);
    Pose {
        x: rules.snap(start.pose.x + d.x),
        y: rules.snap(start.pose.y + d.y),
        ..start.pose
    }
}

/// Rotation is not wrapped, so a drag with no horizontal travel leaves the
/// stored angle exactly as it was.
fn rotate_pose(start: &DragStart, delta: &DragDelta, rules: &DragRules) -> Pose {
    if delta.screen.x == 0.0 {
        return start.pose;
    }
    let mut rotation = start.pose.rotation + delta.screen.x * rules.rotate_sensitivity;
    if delta.modifiers.shift && rules.rotate_snap_degrees > 0.0 {
        rotation = (rotation / rules.rotate_snap_degrees).round() * rules.rotate_snap_degrees;
    }
    Pose {
        rotation,
        ..start.pose
    }
}

fn scale_pose(start: &DragStart, delta: &DragDelta, rules: &DragRules) -> Pose {
    let d = delta.for_object(start);
    let (dx, dy) = if delta.modifiers.shift {
        let uniform = (d.x + d.y) / 2.0;
        (uniform, uniform)
    } else {
        (d.x, d.y)
    };

    match start.pose.size {
        Some(size) => Pose {
            size: Some(Size::new(
                (size.width + dx).max(rules.min_primitive_size),
                (size.height + dy).max(rules.min_primitive_size),
            )),
            ..start.pose
        },
        None => {
            let native = start.native_size.max(DVec2::ONE);
            Pose {
                scale_x: (start.pose.scale_x + dx / native.x).max(rules.min_scale),
                scale_y: (start.pose.scale_y + dy / native.y).max(rules.min_scale),
                ..start.pose
            }
        }
    }
}
