use std::collections::BTreeMap;
use std::path::Path;

use glam::DVec2;
use stagecraft_common::{Rgb, SpriteShape};
use stagecraft_scene::{Camera, Scene, SceneObject};
use stagecraft_view::{Aabb, ImageSizes, display_size};

use crate::RuntimeError;

/// The camera a running game starts with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameView {
    pub position: DVec2,
    pub zoom: f64,
}

impl GameView {
    pub fn of(camera: &Camera) -> Self {
        Self {
            position: camera.game_position(),
            zoom: camera.game_zoom,
        }
    }
}

/// One live object in a running game.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub shape: SpriteShape,
    pub image: Option<String>,
    /// Axis-aligned footprint; world units, or pixels when `screen_space`.
    pub rect: Aabb,
    pub rotation: f64,
    pub color: Rgb,
    pub visible: bool,
    pub screen_space: bool,
    pub z_index: i32,
    /// Unscaled image size the rect was derived from.
    pub native_size: Option<DVec2>,
}

impl Drawable {
    pub fn from_object(obj: &SceneObject, images: &dyn ImageSizes) -> Self {
        let image = obj.sprite.image_path().map(str::to_owned);
        let native_size = image.as_deref().map(|path| {
            images
                .native_size(path)
                .unwrap_or(DVec2::splat(stagecraft_common::DEFAULT_PRIMITIVE_SIZE))
        });
        Self {
            shape: obj.shape(),
            image,
            rect: Aabb::from_center(obj.transform.position(), display_size(obj, images)),
            rotation: obj.transform.rotation,
            color: obj.color,
            visible: obj.visible,
            screen_space: obj.screen_space,
            z_index: obj.z_index,
            native_size,
        }
    }

    /// Move so the rect is centered on `position`.
    pub fn set_center(&mut self, position: DVec2) {
        self.rect = Aabb::from_center(position, self.rect.size());
    }
}

/// A running instance of a scene.
///
/// Drawables are stored in draw order with a name index beside them. Names
/// that repeat in the scene get `_2`, `_3`, ... suffixes here.
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    drawables: Vec<(String, Drawable)>,
    by_name: BTreeMap<String, usize>,
    view: GameView,
}

impl RuntimeHandle {
    /// Load a scene file and instantiate it.
    pub fn spawn(path: impl AsRef<Path>, images: &dyn ImageSizes) -> Result<Self, RuntimeError> {
        let scene = stagecraft_persist::load_scene(path)?;
        Ok(Self::from_scene(&scene, images))
    }

    pub fn from_scene(scene: &Scene, images: &dyn ImageSizes) -> Self {
        let mut handle = Self {
            drawables: Vec::with_capacity(scene.len()),
            by_name: BTreeMap::new(),
            view: GameView::of(&scene.camera),
        };
        for obj in scene.objects() {
            handle.push(&obj.name, Drawable::from_object(obj, images));
        }
        tracing::info!(scene = %scene.name, drawables = handle.len(), "runtime spawned");
        handle
    }

    fn push(&mut self, name: &str, drawable: Drawable) {
        let mut key = name.to_owned();
        let mut n = 2;
        while self.by_name.contains_key(&key) {
            key = format!("{name}_{n}");
            n += 1;
        }
        if key != name {
            tracing::debug!(name, renamed = %key, "duplicate drawable name");
        }
        self.by_name.insert(key.clone(), self.drawables.len());
        self.drawables.push((key, drawable));
    }

    pub fn get(&self, name: &str) -> Option<&Drawable> {
        self.by_name.get(name).map(|&i| &self.drawables[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Drawable> {
        let i = *self.by_name.get(name)?;
        Some(&mut self.drawables[i].1)
    }

    /// Name and drawable pairs in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Drawable)> {
        self.drawables.iter().map(|(name, d)| (name.as_str(), d))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.drawables.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    pub fn view(&self) -> GameView {
        self.view
    }

    pub fn set_view(&mut self, view: GameView) {
        self.view = view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagecraft_scene::{Size, Sprite};
    use stagecraft_view::NoImageSizes;

    fn scene() -> Scene {
        let mut scene = Scene::new("level");
        scene.camera.game_x = 12.0;
        scene.camera.game_zoom = 2.0;
        scene.insert(SceneObject::new("box", Sprite::Rectangle(Size::new(40.0, 20.0)), DVec2::new(10.0, 10.0)));
        scene.insert(SceneObject::new("box", Sprite::Circle(Size::square(8.0)), DVec2::ZERO).with_z_index(-1));
        scene.insert(SceneObject::image("hero", "hero.png", DVec2::new(-5.0, 0.0)).with_z_index(3));
        scene
    }

    #[test]
    fn drawables_follow_draw_order() {
        let handle = RuntimeHandle::from_scene(&scene(), &NoImageSizes);
        let names: Vec<&str> = handle.names().collect();
        assert_eq!(names, ["box", "box_2", "hero"]);
        assert_eq!(handle.get("box").unwrap().shape, SpriteShape::Circle);
        assert_eq!(handle.get("box_2").unwrap().shape, SpriteShape::Rectangle);
    }

    #[test]
    fn rect_comes_from_display_size() {
        let handle = RuntimeHandle::from_scene(&scene(), &NoImageSizes);
        let b = handle.get("box_2").unwrap();
        assert_eq!(b.rect.min, DVec2::new(-10.0, 0.0));
        assert_eq!(b.rect.max, DVec2::new(30.0, 20.0));

        let hero = handle.get("hero").unwrap();
        assert_eq!(hero.native_size, Some(DVec2::splat(64.0)));
        assert_eq!(hero.image.as_deref(), Some("hero.png"));
    }

    #[test]
    fn game_view_is_copied() {
        let handle = RuntimeHandle::from_scene(&scene(), &NoImageSizes);
        assert_eq!(handle.view().position, DVec2::new(12.0, 0.0));
        assert_eq!(handle.view().zoom, 2.0);
    }

    #[test]
    fn drawables_are_mutable_by_name() {
        let mut handle = RuntimeHandle::from_scene(&scene(), &NoImageSizes);
        handle.get_mut("hero").unwrap().set_center(DVec2::new(100.0, 0.0));
        assert_eq!(handle.get("hero").unwrap().rect.center(), DVec2::new(100.0, 0.0));
        assert!(handle.get_mut("nobody").is_none());
    }

    #[test]
    fn spawn_reads_scene_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.json");
        stagecraft_persist::save_scene(&path, &scene()).unwrap();
        let handle = RuntimeHandle::spawn(&path, &NoImageSizes).unwrap();
        assert_eq!(handle.len(), 3);

        let err = RuntimeHandle::spawn(dir.path().join("missing.json"), &NoImageSizes).unwrap_err();
        assert!(matches!(err, RuntimeError::Load(_)));
    }
}
