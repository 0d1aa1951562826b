use stagecraft_scene::Scene;

use crate::hit::{ImageSizes, NoImageSizes, screen_bounds};
use crate::viewport::Viewport;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the scene and the viewport and produces output. It never
/// mutates the scene; every edit goes through the editor session.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the editing view.
    fn render(&self, scene: &Scene, viewport: &Viewport) -> Self::Output;
}

/// Text renderer for the CLI, logs and tests.
///
/// Lists every visible object in draw order with its on-screen rectangle.
pub struct DebugTextRenderer {
    images: Box<dyn ImageSizes>,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self {
            images: Box::new(NoImageSizes),
        }
    }

    pub fn with_images(images: Box<dyn ImageSizes>) -> Self {
        Self { images }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, viewport: &Viewport) -> String {
        let cam = &scene.camera;
        let mut out = format!(
            "=== Scene '{}' (v{}) ===\nObjects: {}\nView: {:.0}x{:.0} camera=({:.1}, {:.1}) zoom={:.2}\n",
            scene.name,
            scene.version,
            scene.len(),
            viewport.width,
            viewport.height,
            cam.scene_x,
            cam.scene_y,
            cam.scene_zoom,
        );

        for obj in scene.objects().iter().filter(|o| o.visible) {
            let rect = screen_bounds(obj, scene, viewport, self.images.as_ref());
            let on_screen = rect.max.x >= 0.0
                && rect.max.y >= 0.0
                && rect.min.x <= viewport.width
                && rect.min.y <= viewport.height;
            out.push_str(&format!(
                "  z={:<3} {:<10} {:<16} rect=({:.1}, {:.1})..({:.1}, {:.1}){}{}\n",
                obj.z_index,
                obj.shape(),
                obj.name,
                rect.min.x,
                rect.min.y,
                rect.max.x,
                rect.max.y,
                if obj.screen_space { " [screen]" } else { "" },
                if on_screen { "" } else { " (offscreen)" },
            ));
        }

        out
    }
}
