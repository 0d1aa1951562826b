use glam::DVec2;
use stagecraft_common::{MIN_SCALE, Transform};
use stagecraft_scene::{Scene, SceneObject, Size, Sprite};

use crate::handle::{Drawable, GameView, RuntimeHandle};

/// A live object that can describe itself as a scene object.
pub trait Exportable {
    /// Build a scene object for this live object. `name` is the name it is
    /// registered under in its graph.
    fn export_as(&self, name: &str) -> SceneObject;
}

/// A live object graph that can be walked for export.
pub trait LiveGraph {
    /// Call `visit` once per live object, bottom of the draw order first.
    fn visit(&self, visit: &mut dyn FnMut(&str, &dyn Exportable));

    /// The camera the graph is currently viewed through.
    fn view(&self) -> GameView;
}

/// Snapshot a live graph into a new scene.
///
/// Object names mirror the graph's names. The graph's view becomes the game
/// camera; the editing view starts at the origin.
pub fn export(graph: &dyn LiveGraph, name: &str) -> Scene {
    let mut scene = Scene::new(name);
    let view = graph.view();
    scene.camera.game_x = view.position.x;
    scene.camera.game_y = view.position.y;
    scene.camera.game_zoom = view.zoom;

    graph.visit(&mut |entry, live| {
        let mut obj = live.export_as(entry);
        obj.name = entry.to_owned();
        scene.insert(obj);
    });
    scene.normalize();
    tracing::info!(scene = %scene.name, objects = scene.len(), "live graph exported");
    scene
}

impl Exportable for Drawable {
    fn export_as(&self, name: &str) -> SceneObject {
        let size = self.rect.size();
        let (sprite, scale) = match (&self.image, self.native_size) {
            (Some(path), native) => {
                let native = native.unwrap_or(size).max(DVec2::ONE);
                let scale = (size / native).max(DVec2::splat(MIN_SCALE));
                (Sprite::Image { path: path.clone() }, scale)
            }
            (None, _) => {
                let sprite = Sprite::primitive(self.shape, Size::new(size.x, size.y))
                    .unwrap_or(Sprite::Rectangle(Size::new(size.x, size.y)));
                (sprite, DVec2::ONE)
            }
        };
        let center = self.rect.center();
        let mut obj = SceneObject::new(name, sprite, center)
            .with_color(self.color)
            .with_z_index(self.z_index);
        obj.transform = Transform {
            rotation: self.rotation,
            scale_x: scale.x,
            scale_y: scale.y,
            ..Transform::at(center)
        };
        obj.visible = self.visible;
        obj.screen_space = self.screen_space;
        obj
    }
}

impl LiveGraph for RuntimeHandle {
    fn visit(&self, visit: &mut dyn FnMut(&str, &dyn Exportable)) {
        for (name, drawable) in self.iter() {
            visit(name, drawable);
        }
    }

    fn view(&self) -> GameView {
        RuntimeHandle::view(self)
    }
}
