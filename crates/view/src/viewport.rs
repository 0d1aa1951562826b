use glam::DVec2;
use stagecraft_common::{MAX_ZOOM, MIN_ZOOM};
use stagecraft_scene::Camera;

use crate::hit::Aabb;

/// Allowed zoom range for the editing view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: MIN_ZOOM,
            max: MAX_ZOOM,
        }
    }
}

impl ZoomLimits {
    /// Clamp `zoom` into range. Non-finite input maps to 1:1 (itself clamped).
    pub fn clamp(&self, zoom: f64) -> f64 {
        if zoom.is_finite() {
            zoom.clamp(self.min, self.max)
        } else {
            1.0_f64.clamp(self.min, self.max)
        }
    }
}

/// Pixel dimensions of the canvas area.
///
/// Maps between screen pixels and world units through the camera's editing
/// view: `world = camera + (screen - center) / zoom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width, self.height) * 0.5
    }

    /// Whether a screen point lies on the canvas.
    pub fn contains(&self, screen: DVec2) -> bool {
        screen.x >= 0.0 && screen.y >= 0.0 && screen.x <= self.width && screen.y <= self.height
    }

    pub fn screen_to_world(&self, camera: &Camera, screen: DVec2) -> DVec2 {
        camera.scene_position() + (screen - self.center()) / camera.scene_zoom
    }

    pub fn world_to_screen(&self, camera: &Camera, world: DVec2) -> DVec2 {
        (world - camera.scene_position()) * camera.scene_zoom + self.center()
    }

    /// Change zoom while keeping the world point under `anchor` fixed.
    ///
    /// Returns the zoom actually applied after clamping.
    pub fn zoom_about(&self, camera: &mut Camera, zoom: f64, anchor: DVec2, limits: ZoomLimits) -> f64 {
        let pinned = self.screen_to_world(camera, anchor);
        camera.scene_zoom = limits.clamp(zoom);
        if camera.scene_zoom != zoom {
            tracing::debug!(requested = zoom, applied = camera.scene_zoom, "zoom clamped");
        }
        camera.set_scene_position(pinned - (anchor - self.center()) / camera.scene_zoom);
        camera.scene_zoom
    }

    /// Drag the view by a screen delta: content follows the pointer.
    pub fn pan_by_screen(&self, camera: &mut Camera, delta: DVec2) {
        let moved = camera.scene_position() - delta / camera.scene_zoom;
        camera.set_scene_position(moved);
    }

    /// World-space rectangle currently on screen.
    pub fn visible_world(&self, camera: &Camera) -> Aabb {
        Aabb::new(
            self.screen_to_world(camera, DVec2::ZERO),
            self.screen_to_world(camera, DVec2::new(self.width, self.height)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < EPS * (1.0 + a.length().max(b.length()))
    }

    fn cameras() -> Vec<Camera> {
        let mut out = Vec::new();
        for &(x, y, zoom) in &[
            (0.0, 0.0, 1.0),
            (150.0, -75.0, 2.5),
            (-3000.5, 12.25, 0.01),
            (1e4, 1e4, 10.0),
            (7.0, 3.0, 0.37),
        ] {
            out.push(Camera {
                scene_x: x,
                scene_y: y,
                scene_zoom: zoom,
                ..Camera::default()
            });
        }
        out
    }

    #[test]
    fn center_maps_to_camera_position() {
        let vp = Viewport::new(800.0, 600.0);
        for cam in cameras() {
            assert!(close(vp.screen_to_world(&cam, vp.center()), cam.scene_position()));
        }
    }

    #[test]
    fn screen_world_roundtrip() {
        let vp = Viewport::new(1024.0, 768.0);
        let points = [
            DVec2::ZERO,
            DVec2::new(400.0, 300.0),
            DVec2::new(1024.0, 768.0),
            DVec2::new(-50.0, 2000.0),
            DVec2::new(13.7, 0.001),
        ];
        for cam in cameras() {
            for p in points {
                let back = vp.world_to_screen(&cam, vp.screen_to_world(&cam, p));
                assert!(close(back, p), "{p:?} -> {back:?} with {cam:?}");
            }
        }
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let vp = Viewport::new(800.0, 600.0);
        let anchors = [DVec2::new(400.0, 300.0), DVec2::new(10.0, 590.0), DVec2::new(733.0, 21.0)];
        for mut cam in cameras() {
            for anchor in anchors {
                let before = vp.screen_to_world(&cam, anchor);
                let target = cam.scene_zoom * 1.1;
                vp.zoom_about(&mut cam, target, anchor, ZoomLimits::default());
                let after = vp.screen_to_world(&cam, anchor);
                assert!(close(before, after), "{before:?} vs {after:?}");
            }
        }
    }

    #[test]
    fn zoom_is_clamped() {
        let vp = Viewport::default();
        let mut cam = Camera::default();
        let applied = vp.zoom_about(&mut cam, 500.0, DVec2::new(100.0, 100.0), ZoomLimits::default());
        assert_eq!(applied, MAX_ZOOM);
        let applied = vp.zoom_about(&mut cam, 0.0, DVec2::new(100.0, 100.0), ZoomLimits::default());
        assert_eq!(applied, MIN_ZOOM);
        let applied = vp.zoom_about(&mut cam, f64::NAN, DVec2::ZERO, ZoomLimits::default());
        assert_eq!(applied, 1.0);
    }

    #[test]
    fn zoom_does_not_touch_game_view() {
        let vp = Viewport::default();
        let mut cam = Camera::default();
        vp.zoom_about(&mut cam, 3.0, DVec2::new(12.0, 40.0), ZoomLimits::default());
        vp.pan_by_screen(&mut cam, DVec2::new(30.0, 30.0));
        assert_eq!(cam.game_position(), DVec2::ZERO);
        assert_eq!(cam.game_zoom, 1.0);
    }

    #[test]
    fn pan_moves_content_with_pointer() {
        let vp = Viewport::default();
        let mut cam = Camera {
            scene_zoom: 2.0,
            ..Camera::default()
        };
        let grab = DVec2::new(100.0, 100.0);
        let world = vp.screen_to_world(&cam, grab);
        vp.pan_by_screen(&mut cam, DVec2::new(40.0, -10.0));
        let world_after = vp.screen_to_world(&cam, grab + DVec2::new(40.0, -10.0));
        assert!(close(world, world_after));
    }

    #[test]
    fn visible_world_spans_viewport() {
        let vp = Viewport::new(200.0, 100.0);
        let cam = Camera {
            scene_zoom: 2.0,
            ..Camera::default()
        };
        let rect = vp.visible_world(&cam);
        assert!(close(rect.min, DVec2::new(-50.0, -25.0)));
        assert!(close(rect.max, DVec2::new(50.0, 25.0)));
    }
}
