use glam::DVec2;
use stagecraft_common::DEFAULT_PRIMITIVE_SIZE;
use stagecraft_scene::{Scene, SceneObject, Sprite};

use crate::viewport::Viewport;

/// Source of native pixel sizes for image sprites.
///
/// Asset loading lives outside the editor core; whatever loads images
/// implements this so the hit-tester can size them.
pub trait ImageSizes {
    fn native_size(&self, path: &str) -> Option<DVec2>;
}

/// Knows no images. Every image sizes as the placeholder square.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImageSizes;

impl ImageSizes for NoImageSizes {
    fn native_size(&self, _path: &str) -> Option<DVec2> {
        None
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec2,
    pub max: DVec2,
}

impl Aabb {
    /// Box spanning two corners, in any order.
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center(center: DVec2, size: DVec2) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inclusive on all edges.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }
}

/// Size the object occupies in its own space (world units, or pixels for
/// screen-space objects).
///
/// Images: native size times scale. Primitives: their explicit width/height.
pub fn display_size(obj: &SceneObject, images: &dyn ImageSizes) -> DVec2 {
    match &obj.sprite {
        Sprite::Image { path } => {
            let native = images
                .native_size(path)
                .unwrap_or(DVec2::splat(DEFAULT_PRIMITIVE_SIZE));
            native * obj.transform.scale().abs()
        }
        other => other
            .primitive_size()
            .map(|s| s.as_vec())
            .unwrap_or(DVec2::ZERO),
    }
}

/// Bounds in the object's own space. Rotation is ignored.
pub fn bounds(obj: &SceneObject, images: &dyn ImageSizes) -> Aabb {
    Aabb::from_center(obj.transform.position(), display_size(obj, images))
}

/// Bounds in screen pixels for the scene's current editing view.
pub fn screen_bounds(obj: &SceneObject, scene: &Scene, viewport: &Viewport, images: &dyn ImageSizes) -> Aabb {
    let local = bounds(obj, images);
    if obj.screen_space {
        return local;
    }
    Aabb::new(
        viewport.world_to_screen(&scene.camera, local.min),
        viewport.world_to_screen(&scene.camera, local.max),
    )
}

/// Topmost visible object whose bounding box contains `world`.
///
/// Locked objects are hittable; locking only blocks edits.
pub fn hit_test<'a>(scene: &'a Scene, world: DVec2, images: &dyn ImageSizes) -> Option<&'a SceneObject> {
    scene
        .iter_top_down()
        .filter(|o| o.visible)
        .find(|o| bounds(o, images).contains(world))
}

/// Like [`hit_test`], starting from a screen point.
///
/// Screen-space objects are tested against the raw screen point, all others
/// against its world position. Draw order is preserved across both kinds.
pub fn hit_test_screen<'a>(
    scene: &'a Scene,
    viewport: &Viewport,
    screen: DVec2,
    images: &dyn ImageSizes,
) -> Option<&'a SceneObject> {
    let world = viewport.screen_to_world(&scene.camera, screen);
    scene.iter_top_down().filter(|o| o.visible).find(|o| {
        let point = if o.screen_space { screen } else { world };
        bounds(o, images).contains(point)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagecraft_scene::{Camera, Size};
    use std::collections::HashMap;

    struct Table(HashMap<&'static str, DVec2>);

    impl ImageSizes for Table {
        fn native_size(&self, path: &str) -> Option<DVec2> {
            self.0.get(path).copied()
        }
    }

    fn rect(name: &str, at: DVec2, w: f64, h: f64) -> SceneObject {
        SceneObject::new(name, Sprite::Rectangle(Size::new(w, h)), at)
    }

    #[test]
    fn aabb_contains_edges() {
        let b = Aabb::from_center(DVec2::ZERO, DVec2::new(10.0, 4.0));
        assert!(b.contains(DVec2::new(5.0, 2.0)));
        assert!(b.contains(DVec2::new(-5.0, -2.0)));
        assert!(!b.contains(DVec2::new(5.1, 0.0)));
        assert_eq!(b.size(), DVec2::new(10.0, 4.0));
    }

    #[test]
    fn primitive_size_ignores_scale() {
        let mut obj = rect("r", DVec2::ZERO, 20.0, 10.0);
        obj.transform.scale_x = 3.0;
        assert_eq!(display_size(&obj, &NoImageSizes), DVec2::new(20.0, 10.0));
    }

    #[test]
    fn image_size_is_native_times_scale() {
        let images = Table(HashMap::from([("hero.png", DVec2::new(32.0, 48.0))]));
        let mut obj = SceneObject::image("hero", "hero.png", DVec2::ZERO);
        obj.transform.scale_x = 2.0;
        obj.transform.scale_y = 0.5;
        assert_eq!(display_size(&obj, &images), DVec2::new(64.0, 24.0));

        let unknown = SceneObject::image("ghost", "ghost.png", DVec2::ZERO);
        assert_eq!(
            display_size(&unknown, &images),
            DVec2::splat(DEFAULT_PRIMITIVE_SIZE)
        );
    }

    #[test]
    fn topmost_wins() {
        let mut scene = Scene::default();
        scene.insert(rect("below", DVec2::ZERO, 100.0, 100.0));
        scene.insert(rect("above", DVec2::ZERO, 10.0, 10.0).with_z_index(1));
        scene.insert(rect("same_z_later", DVec2::new(40.0, 0.0), 10.0, 10.0));

        let hit = hit_test(&scene, DVec2::new(1.0, 1.0), &NoImageSizes).unwrap();
        assert_eq!(hit.name, "above");
        let hit = hit_test(&scene, DVec2::new(40.0, 0.0), &NoImageSizes).unwrap();
        assert_eq!(hit.name, "same_z_later");
        let hit = hit_test(&scene, DVec2::new(-45.0, 0.0), &NoImageSizes).unwrap();
        assert_eq!(hit.name, "below");
        assert!(hit_test(&scene, DVec2::new(500.0, 0.0), &NoImageSizes).is_none());
    }

    #[test]
    fn invisible_skipped_locked_kept() {
        let mut scene = Scene::default();
        scene.insert(rect("locked", DVec2::ZERO, 10.0, 10.0));
        let hidden = scene.insert(rect("hidden", DVec2::ZERO, 10.0, 10.0));
        scene.modify(&hidden, |o| o.visible = false);
        let locked = scene.objects()[0].id.clone();
        scene.modify(&locked, |o| o.locked = true);

        let hit = hit_test(&scene, DVec2::ZERO, &NoImageSizes).unwrap();
        assert_eq!(hit.name, "locked");
    }

    #[test]
    fn rotation_is_ignored() {
        let mut scene = Scene::default();
        let id = scene.insert(rect("r", DVec2::ZERO, 100.0, 10.0));
        scene.modify(&id, |o| o.transform.rotation = 90.0);
        assert!(hit_test(&scene, DVec2::new(45.0, 0.0), &NoImageSizes).is_some());
        assert!(hit_test(&scene, DVec2::new(0.0, 45.0), &NoImageSizes).is_none());
    }

    #[test]
    fn screen_space_objects_use_screen_point() {
        let mut scene = Scene::default();
        scene.camera = Camera {
            scene_x: 1000.0,
            scene_zoom: 2.0,
            ..Camera::default()
        };
        let hud = scene.insert(rect("hud", DVec2::new(20.0, 20.0), 40.0, 40.0));
        scene.modify(&hud, |o| o.screen_space = true);
        let vp = Viewport::default();

        let hit = hit_test_screen(&scene, &vp, DVec2::new(25.0, 25.0), &NoImageSizes).unwrap();
        assert_eq!(hit.name, "hud");
        let b = screen_bounds(scene.get(&hud).unwrap(), &scene, &vp, &NoImageSizes);
        assert_eq!(b.min, DVec2::ZERO);
    }

    #[test]
    fn screen_hit_converts_world_objects() {
        let mut scene = Scene::default();
        scene.insert(rect("w", DVec2::new(100.0, 0.0), 10.0, 10.0));
        let vp = Viewport::new(800.0, 600.0);
        // zoom 1, camera at origin: world (100, 0) sits at screen (500, 300).
        assert!(hit_test_screen(&scene, &vp, DVec2::new(500.0, 300.0), &NoImageSizes).is_some());
        assert!(hit_test_screen(&scene, &vp, DVec2::new(100.0, 0.0), &NoImageSizes).is_none());
    }
}
