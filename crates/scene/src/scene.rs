use serde::{Deserialize, Serialize};
use stagecraft_common::{
    DEFAULT_GRID_SIZE, MAX_ZOOM, MIN_ZOOM, ObjectId, SCENE_FORMAT_VERSION,
};
use std::collections::BTreeSet;

use crate::camera::Camera;
use crate::object::SceneObject;

/// The editable scene: camera, grid settings and the object collection.
///
/// Objects are always kept in ascending `z_index` order (stable, so equal
/// z-indices keep insertion order). The last object is drawn on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub version: u32,
    pub name: String,
    pub camera: Camera,
    objects: Vec<SceneObject>,
    grid_size: u32,
    pub grid_visible: bool,
    pub grid_labels_visible: bool,
    pub snap_to_grid: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            version: SCENE_FORMAT_VERSION,
            name: "untitled".into(),
            camera: Camera::default(),
            objects: Vec::new(),
            grid_size: DEFAULT_GRID_SIZE,
            grid_visible: true,
            grid_labels_visible: false,
            snap_to_grid: false,
        }
    }
}

/// What [`Scene::normalize`] had to fix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub reordered: bool,
    pub reassigned_ids: usize,
    pub grid_clamped: bool,
    pub zoom_clamped: bool,
}

impl NormalizeReport {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Objects in draw order, bottom first.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Objects in selection order, topmost first.
    pub fn iter_top_down(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| &o.id == id)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Draw-order index of an object.
    pub fn position(&self, id: &ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| &o.id == id)
    }

    /// Add an object, keeping z-order. Returns the id it was stored under.
    ///
    /// An id already present in the scene is replaced with a fresh one.
    pub fn insert(&mut self, mut object: SceneObject) -> ObjectId {
        if self.contains(&object.id) {
            let fresh = ObjectId::generate();
            tracing::warn!(old = %object.id, new = %fresh, "duplicate object id reassigned");
            object.id = fresh;
        }
        let id = object.id.clone();
        self.objects.push(object);
        self.sort();
        id
    }

    pub fn remove(&mut self, id: &ObjectId) -> Option<SceneObject> {
        let idx = self.position(id)?;
        Some(self.objects.remove(idx))
    }

    /// Edit one object in place. Re-sorts if its z-index changed.
    ///
    /// The object's id cannot be changed through this call.
    pub fn modify<R>(&mut self, id: &ObjectId, f: impl FnOnce(&mut SceneObject) -> R) -> Option<R> {
        let idx = self.position(id)?;
        let obj = &mut self.objects[idx];
        let z_before = obj.z_index;
        let out = f(obj);
        if obj.id != *id {
            obj.id = id.clone();
        }
        if obj.z_index != z_before {
            self.sort();
        }
        Some(out)
    }

    /// Replace the whole object collection (used when restoring history).
    pub fn set_objects(&mut self, objects: Vec<SceneObject>) {
        self.objects = objects;
        self.sort();
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Set the grid spacing; values below 1 are raised to 1.
    pub fn set_grid_size(&mut self, size: u32) {
        self.grid_size = size.max(1);
    }

    /// Highest z-index in use, if any.
    pub fn max_z(&self) -> Option<i32> {
        self.objects.last().map(|o| o.z_index)
    }

    /// Lowest z-index in use, if any.
    pub fn min_z(&self) -> Option<i32> {
        self.objects.first().map(|o| o.z_index)
    }

    /// A display name based on `base` that no object uses yet.
    pub fn unique_name(&self, base: &str) -> String {
        if !self.objects.iter().any(|o| o.name == base) {
            return base.to_owned();
        }
        (2..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !self.objects.iter().any(|o| &o.name == candidate))
            .unwrap_or_else(|| base.to_owned())
    }

    /// Restore the collection invariants after an external edit, such as
    /// loading a hand-written file.
    pub fn normalize(&mut self) -> NormalizeReport {
        let mut report = NormalizeReport::default();

        let mut seen = BTreeSet::new();
        for obj in &mut self.objects {
            if !seen.insert(obj.id.clone()) {
                obj.id = ObjectId::generate();
                seen.insert(obj.id.clone());
                report.reassigned_ids += 1;
            }
        }

        report.reordered = !self.objects.is_sorted_by_key(|o| o.z_index);
        self.sort();

        if self.grid_size == 0 {
            self.grid_size = 1;
            report.grid_clamped = true;
        }

        for zoom in [&mut self.camera.scene_zoom, &mut self.camera.game_zoom] {
            let fixed = if zoom.is_finite() {
                zoom.clamp(MIN_ZOOM, MAX_ZOOM)
            } else {
                1.0
            };
            if fixed != *zoom {
                *zoom = fixed;
                report.zoom_clamped = true;
            }
        }

        if !report.is_clean() {
            tracing::debug!(?report, scene = %self.name, "scene normalized");
        }
        report
    }

    fn sort(&mut self) {
        self.objects.sort_by_key(|o| o.z_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Size, Sprite};
    use glam::DVec2;

    fn named(name: &str, z: i32) -> SceneObject {
        SceneObject::new(name, Sprite::Rectangle(Size::square(10.0)), DVec2::ZERO).with_z_index(z)
    }

    fn names(scene: &Scene) -> Vec<&str> {
        scene.objects().iter().map(|o| o.name.as_str()).collect()
    }

    #[test]
    fn scene_starts_empty() {
        let s = Scene::new("level");
        assert!(s.is_empty());
        assert_eq!(s.grid_size(), DEFAULT_GRID_SIZE);
        assert_eq!(s.version, SCENE_FORMAT_VERSION);
    }

    #[test]
    fn equal_z_keeps_insertion_order() {
        let mut s = Scene::default();
        s.insert(named("Foo", 0));
        s.insert(named("Bar", 0));
        s.insert(named("Baz", -1));
        assert_eq!(names(&s), ["Baz", "Foo", "Bar"]);
    }

    #[test]
    fn modify_resorts_on_z_change() {
        let mut s = Scene::default();
        let a = s.insert(named("a", 0));
        s.insert(named("b", 1));
        s.modify(&a, |o| o.z_index = 5).unwrap();
        assert_eq!(names(&s), ["b", "a"]);
        assert_eq!(s.max_z(), Some(5));
        assert_eq!(s.min_z(), Some(1));
    }

    #[test]
    fn modify_cannot_change_identity() {
        let mut s = Scene::default();
        let a = s.insert(named("a", 0));
        s.modify(&a, |o| o.id = ObjectId::from("hijack")).unwrap();
        assert!(s.contains(&a));
    }

    #[test]
    fn modify_missing_is_none() {
        let mut s = Scene::default();
        assert!(s.modify(&ObjectId::from("nope"), |_| ()).is_none());
    }

    #[test]
    fn duplicate_insert_gets_new_id() {
        let mut s = Scene::default();
        let obj = named("a", 0);
        let first = s.insert(obj.clone());
        let second = s.insert(obj);
        assert_ne!(first, second);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn remove_returns_object() {
        let mut s = Scene::default();
        let a = s.insert(named("a", 0));
        assert_eq!(s.remove(&a).unwrap().name, "a");
        assert!(s.remove(&a).is_none());
    }

    #[test]
    fn grid_size_never_zero() {
        let mut s = Scene::default();
        s.set_grid_size(0);
        assert_eq!(s.grid_size(), 1);
    }

    #[test]
    fn unique_name_appends_counter() {
        let mut s = Scene::default();
        assert_eq!(s.unique_name("rectangle"), "rectangle");
        s.insert(named("rectangle", 0));
        assert_eq!(s.unique_name("rectangle"), "rectangle_2");
        s.insert(named("rectangle_2", 0));
        assert_eq!(s.unique_name("rectangle"), "rectangle_3");
    }

    #[test]
    fn normalize_repairs_hand_edited_scene() {
        let json = r#"{
            "name": "hand",
            "grid_size": 0,
            "camera": {"scene_zoom": 50.0},
            "objects": [
                {"id": "a", "name": "top", "sprite_shape": "rectangle", "z_index": 3},
                {"id": "a", "name": "bottom", "sprite_shape": "rectangle", "z_index": 1}
            ]
        }"#;
        let mut s: Scene = serde_json::from_str(json).unwrap();
        let report = s.normalize();
        assert!(report.reordered);
        assert_eq!(report.reassigned_ids, 1);
        assert!(report.grid_clamped);
        assert!(report.zoom_clamped);
        assert_eq!(names(&s), ["bottom", "top"]);
        assert_eq!(s.camera.scene_zoom, MAX_ZOOM);
        assert!(s.normalize().is_clean());
    }
}
