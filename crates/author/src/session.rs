use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glam::DVec2;
use stagecraft_common::{ObjectId, Rgb, SpriteShape};
use stagecraft_input::{Action, Button, Modifiers, Tool};
use stagecraft_persist::StoreError;
use stagecraft_scene::{Scene, SceneObject, Size, Sprite};
use stagecraft_view::{ImageSizes, NoImageSizes, Viewport, hit_test_screen};

use crate::config::EditorConfig;
use crate::drag::{DragDelta, DragRules, DragStart, Pose, drag_pose};
use crate::history::History;
use crate::property::{self, Property};

/// Errors from editor session operations.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("unknown property '{0}'")]
    UnknownProperty(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What the pointer is currently doing.
#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    Panning {
        start_screen: DVec2,
        start_camera: DVec2,
    },
    Dragging {
        tool: Tool,
        start_screen: DVec2,
        start_world: DVec2,
        entries: BTreeMap<ObjectId, DragStart>,
        dirty: bool,
    },
}

/// One editing session over one scene.
///
/// All mutation of the scene goes through this type. Every discrete edit
/// commits exactly one history checkpoint; pointer drags commit once on
/// release, and only if something moved.
pub struct EditorSession {
    scene: Scene,
    history: History,
    config: EditorConfig,
    viewport: Viewport,
    images: Box<dyn ImageSizes>,
    tool: Tool,
    /// Selected ids, in selection order.
    selection: Vec<ObjectId>,
    clipboard: Vec<SceneObject>,
    gesture: Gesture,
    modified: bool,
    path: Option<PathBuf>,
    status: Option<String>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self::from_scene(Scene::default(), config)
    }

    /// Start editing an existing scene. It becomes the history base.
    pub fn from_scene(mut scene: Scene, config: EditorConfig) -> Self {
        scene.normalize();
        let history = History::new(&scene, config.history_capacity);
        Self {
            scene,
            history,
            config,
            viewport: Viewport::default(),
            images: Box::new(NoImageSizes),
            tool: Tool::default(),
            selection: Vec::new(),
            clipboard: Vec::new(),
            gesture: Gesture::Idle,
            modified: false,
            path: None,
            status: None,
        }
    }

    /// Use `images` to size image sprites for hit-testing and scaling.
    pub fn with_images(mut self, images: Box<dyn ImageSizes>) -> Self {
        self.images = images;
        self
    }

    // --- read access ---

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn selection(&self) -> &[ObjectId] {
        &self.selection
    }

    pub fn is_selected(&self, id: &ObjectId) -> bool {
        self.selection.contains(id)
    }

    /// Selected objects in draw order.
    pub fn selected_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.scene.objects().iter().filter(|o| self.selection.contains(&o.id))
    }

    pub fn clipboard_len(&self) -> usize {
        self.clipboard.len()
    }

    /// Whether there are edits since the last save, load or new scene.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Outcome of the last operation, for a status bar.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        self.viewport.screen_to_world(&self.scene.camera, screen)
    }

    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        self.viewport.world_to_screen(&self.scene.camera, world)
    }

    /// Topmost visible object under a screen point.
    pub fn object_at(&self, screen: DVec2) -> Option<&SceneObject> {
        hit_test_screen(&self.scene, &self.viewport, screen, self.images.as_ref())
    }

    // --- adding and removing ---

    /// Add an image sprite at a world position and select it.
    pub fn add_image(&mut self, path: &str, position: DVec2) -> Result<ObjectId, EditError> {
        let path = path.trim();
        if path.is_empty() {
            return self.reject(EditError::Validation("image path cannot be empty".into()));
        }
        let stem = Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        let name = self.scene.unique_name(stem);
        let object = SceneObject::image(name, path, position);
        Ok(self.add_object(object))
    }

    /// Add a primitive of the default size at a world position and select it.
    pub fn add_primitive(&mut self, shape: SpriteShape, position: DVec2) -> Result<ObjectId, EditError> {
        let size = Size::square(self.config.default_primitive_size);
        let Some(sprite) = Sprite::primitive(shape, size) else {
            return self.reject(EditError::Validation(format!("{shape} is not a primitive shape")));
        };
        let name = self.scene.unique_name(shape.label());
        let object = SceneObject::new(name, sprite, position).with_color(Rgb::DEFAULT_FILL);
        Ok(self.add_object(object))
    }

    fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let object = object.with_z_index(self.scene.max_z().unwrap_or(0));
        let name = object.name.clone();
        let id = self.scene.insert(object);
        self.selection = vec![id.clone()];
        self.commit();
        self.set_status(format!("added {name}"));
        id
    }

    /// Remove every selected object. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids = std::mem::take(&mut self.selection);
        let removed = ids.iter().filter(|id| self.scene.remove(id).is_some()).count();
        if removed > 0 {
            self.commit();
            self.set_status(format!("deleted {removed} object(s)"));
        }
        removed
    }

    /// Copy the selection to the clipboard. The scene is untouched.
    pub fn copy_selected(&mut self) -> usize {
        self.clipboard = self.selected_objects().cloned().collect();
        let count = self.clipboard.len();
        if count > 0 {
            self.set_status(format!("copied {count} object(s)"));
        }
        count
    }

    /// Insert the clipboard under fresh ids, offset from the originals.
    ///
    /// The pasted objects become the selection. Repeated pastes cascade.
    pub fn paste(&mut self) -> Vec<ObjectId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }
        let offset = DVec2::splat(self.config.paste_offset);
        let mut pasted = Vec::with_capacity(self.clipboard.len());
        for source in &mut self.clipboard {
            let position = source.transform.position() + offset;
            source.transform.set_position(position);
            pasted.push(self.scene.insert(source.duplicate()));
        }
        self.selection = pasted.clone();
        self.commit();
        self.set_status(format!("pasted {} object(s)", pasted.len()));
        pasted
    }

    // --- selection ---

    /// Select an object. With `additive`, toggle it within the selection.
    ///
    /// Returns false if the id does not exist.
    pub fn select(&mut self, id: &ObjectId, additive: bool) -> bool {
        if !self.scene.contains(id) {
            tracing::warn!(%id, "select ignored: no such object");
            return false;
        }
        if !additive {
            self.selection = vec![id.clone()];
        } else if let Some(idx) = self.selection.iter().position(|s| s == id) {
            self.selection.remove(idx);
        } else {
            self.selection.push(id.clone());
        }
        true
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    /// Select every visible object.
    pub fn select_all(&mut self) {
        self.selection = self
            .scene
            .objects()
            .iter()
            .filter(|o| o.visible)
            .map(|o| o.id.clone())
            .collect();
    }

    fn prune_selection(&mut self) {
        let before = self.selection.len();
        let scene = &self.scene;
        self.selection.retain(|id| scene.contains(id));
        let dropped = before - self.selection.len();
        if dropped > 0 {
            tracing::debug!(dropped, "stale selection entries dropped");
        }
    }

    // --- camera and grid ---

    /// Zoom the editing view, keeping the world point under `anchor` fixed.
    ///
    /// Returns the zoom actually applied. Not recorded in history.
    pub fn set_zoom(&mut self, zoom: f64, anchor: DVec2) -> f64 {
        self.viewport
            .zoom_about(&mut self.scene.camera, zoom, anchor, self.config.zoom_limits)
    }

    /// Zoom by whole or fractional wheel notches about `anchor`.
    pub fn wheel(&mut self, anchor: DVec2, notches: f64) -> f64 {
        let zoom = self.scene.camera.scene_zoom * self.config.wheel_zoom_step.powf(notches);
        self.set_zoom(zoom, anchor)
    }

    /// Shift the editing view so content follows a screen-space drag.
    pub fn pan_by(&mut self, screen_delta: DVec2) {
        self.viewport.pan_by_screen(&mut self.scene.camera, screen_delta);
    }

    pub fn reset_camera(&mut self) {
        self.scene.camera.reset_scene();
    }

    /// Publish the editing view as the runtime view.
    pub fn copy_camera_to_game(&mut self) {
        self.scene.camera.copy_scene_to_game();
        self.commit();
        self.set_status("game camera updated");
    }

    pub fn set_grid_size(&mut self, size: u32) -> Result<(), EditError> {
        if size == 0 {
            return self.reject(EditError::Validation("grid size must be at least 1".into()));
        }
        if size != self.scene.grid_size() {
            self.scene.set_grid_size(size);
            self.commit();
        }
        Ok(())
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        if self.scene.grid_visible != visible {
            self.scene.grid_visible = visible;
            self.commit();
        }
    }

    pub fn set_grid_labels_visible(&mut self, visible: bool) {
        if self.scene.grid_labels_visible != visible {
            self.scene.grid_labels_visible = visible;
            self.commit();
        }
    }

    pub fn set_snap_to_grid(&mut self, snap: bool) {
        if self.scene.snap_to_grid != snap {
            self.scene.snap_to_grid = snap;
            self.commit();
        }
    }

    // --- property edits ---

    /// Parse and write `value` into `name` on every selected object that
    /// accepts it. Returns how many objects changed.
    ///
    /// Nothing is mutated when the name or value is rejected.
    pub fn set_property(&mut self, name: &str, value: &str) -> Result<usize, EditError> {
        let parsed = name
            .parse::<Property>()
            .and_then(|prop| property::parse_value(prop, value, &self.config).map(|v| (prop, v)));
        let (prop, value) = match parsed {
            Ok(ok) => ok,
            Err(err) => return self.reject(err),
        };
        let changed = self.edit_selected(prop, |obj| property::set(obj, prop, &value));
        if changed > 0 {
            self.commit();
            self.set_status(format!("{} set on {changed} object(s)", prop.name()));
        }
        Ok(changed)
    }

    /// Step a numeric property by `delta` on the selection, clamped to its
    /// floor. Returns how many objects changed.
    pub fn adjust_property(&mut self, name: &str, delta: f64) -> Result<usize, EditError> {
        let prop = match name.parse::<Property>() {
            Ok(prop) => prop,
            Err(err) => return self.reject(err),
        };
        if !prop.is_numeric() {
            return self.reject(EditError::Validation(format!("{} cannot be adjusted", prop.name())));
        }
        if !delta.is_finite() {
            return self.reject(EditError::Validation(format!("{}: delta must be finite", prop.name())));
        }
        let config = self.config.clone();
        self.prune_selection();
        let invalid = self
            .selected_objects()
            .filter(|o| prop.applies_to(o))
            .find_map(|o| property::adjust(&mut o.clone(), prop, delta, &config).err());
        if let Some(err) = invalid {
            return self.reject(err);
        }
        let changed = self.edit_selected(prop, |obj| {
            property::adjust(obj, prop, delta, &config).unwrap_or(false)
        });
        if changed > 0 {
            self.commit();
        }
        Ok(changed)
    }

    /// Rename one object.
    pub fn rename(&mut self, id: &ObjectId, name: &str) -> Result<bool, EditError> {
        let name = name.trim();
        if name.is_empty() {
            return self.reject(EditError::Validation("name cannot be empty".into()));
        }
        let Some(changed) = self.scene.modify(id, |o| {
            let changed = o.name != name;
            o.name = name.to_owned();
            changed
        }) else {
            tracing::warn!(%id, "rename ignored: no such object");
            return Ok(false);
        };
        if changed {
            self.commit();
        }
        Ok(changed)
    }

    pub fn toggle_visible(&mut self) -> usize {
        self.toggle_flag(|o| o.visible = !o.visible)
    }

    /// Lock or unlock each selected object. Locked objects still accept this.
    pub fn toggle_locked(&mut self) -> usize {
        self.toggle_flag(|o| o.locked = !o.locked)
    }

    fn toggle_flag(&mut self, flip: impl Fn(&mut SceneObject)) -> usize {
        self.prune_selection();
        let ids = self.selection.clone();
        for id in &ids {
            self.scene.modify(id, &flip);
        }
        if !ids.is_empty() {
            self.commit();
        }
        ids.len()
    }

    /// Draw the selection above everything else, keeping its relative order.
    pub fn bring_to_front(&mut self) -> usize {
        let top = self.scene.max_z().unwrap_or(0).saturating_add(1);
        self.restack(top, true)
    }

    /// Draw the selection below everything else, keeping its relative order.
    pub fn send_to_back(&mut self) -> usize {
        let bottom = self.scene.min_z().unwrap_or(0).saturating_sub(1);
        self.restack(bottom, false)
    }

    fn restack(&mut self, z_index: i32, to_front: bool) -> usize {
        self.prune_selection();
        let mut ids: Vec<ObjectId> = self.selected_objects().map(|o| o.id.clone()).collect();
        // Each re-sort lands the edited object after its new z peers.
        if to_front {
            ids.reverse();
        }
        let mut changed = 0;
        for id in &ids {
            let moved = self.scene.modify(id, |o| {
                let moved = o.z_index != z_index;
                o.z_index = z_index;
                moved
            });
            if moved == Some(true) {
                changed += 1;
            }
        }
        if changed > 0 {
            self.commit();
        }
        changed
    }

    /// Move every unlocked selected object by a world offset.
    ///
    /// Rejected without moving anything if any position would stop being finite.
    pub fn nudge(&mut self, offset: DVec2) -> Result<usize, EditError> {
        self.prune_selection();
        let overflows = self
            .selected_objects()
            .filter(|o| Property::X.applies_to(o))
            .any(|o| !(o.transform.position() + offset).is_finite());
        if overflows {
            return self.reject(EditError::Validation("nudge: position is out of range".into()));
        }
        let changed = self.edit_selected(Property::X, |o| {
            let position = o.transform.position() + offset;
            let moved = position != o.transform.position();
            o.transform.set_position(position);
            moved
        });
        if changed > 0 {
            self.commit();
        }
        Ok(changed)
    }

    /// Apply `edit` to each selected object that accepts `prop`.
    fn edit_selected(&mut self, prop: Property, mut edit: impl FnMut(&mut SceneObject) -> bool) -> usize {
        self.prune_selection();
        let ids = self.selection.clone();
        let mut changed = 0;
        for id in &ids {
            let applied = self.scene.modify(id, |o| prop.applies_to(o) && edit(o));
            if applied == Some(true) {
                changed += 1;
            }
        }
        changed
    }

    // --- history ---

    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        if !self.history.undo(&mut self.scene) {
            self.set_status("nothing to undo");
            return false;
        }
        self.after_restore();
        self.set_status("undo");
        true
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        if !self.history.redo(&mut self.scene) {
            self.set_status("nothing to redo");
            return false;
        }
        self.after_restore();
        self.set_status("redo");
        true
    }

    fn after_restore(&mut self) {
        self.prune_selection();
        self.modified = true;
    }

    fn commit(&mut self) {
        self.history.commit(&self.scene);
        self.modified = true;
    }

    // --- files ---

    /// Save to `path`. On success it becomes the session's file.
    ///
    /// A failed save keeps the modified flag and the previous path.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), EditError> {
        let path = path.as_ref();
        if let Err(err) = stagecraft_persist::save_scene(path, &self.scene) {
            return self.reject(err.into());
        }
        self.path = Some(path.to_path_buf());
        self.modified = false;
        self.set_status(format!("saved {}", path.display()));
        Ok(())
    }

    /// Save to the file last saved to or loaded from.
    pub fn save_current(&mut self) -> Result<(), EditError> {
        match self.path.clone() {
            Some(path) => self.save(path),
            None => self.reject(EditError::Validation("scene has no file path yet".into())),
        }
    }

    /// Replace the scene with the contents of `path` and restart history.
    ///
    /// A failed load leaves the current scene untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), EditError> {
        let path = path.as_ref();
        let scene = match stagecraft_persist::load_scene(path) {
            Ok(scene) => scene,
            Err(err) => return self.reject(err.into()),
        };
        self.replace_scene(scene);
        self.path = Some(path.to_path_buf());
        self.set_status(format!("loaded {}", path.display()));
        Ok(())
    }

    /// Start over with an empty scene.
    pub fn new_scene(&mut self, name: &str) {
        self.replace_scene(Scene::new(name));
        self.path = None;
        self.set_status(format!("new scene {name}"));
    }

    fn replace_scene(&mut self, mut scene: Scene) {
        scene.normalize();
        self.cancel_gesture();
        self.scene = scene;
        self.history.reset(&self.scene);
        self.selection.clear();
        self.modified = false;
    }

    // --- tools and input ---

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            tracing::debug!(tool = tool.label(), "tool changed");
        }
        self.tool = tool;
    }

    /// Run a discrete editor command.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::SetTool(tool) => self.set_tool(tool),
            Action::Undo => {
                self.undo();
            }
            Action::Redo => {
                self.redo();
            }
            Action::DeleteSelected => {
                self.delete_selected();
            }
            Action::Copy => {
                self.copy_selected();
            }
            Action::Paste => {
                self.paste();
            }
            Action::SelectAll => self.select_all(),
            Action::DeselectAll => self.deselect_all(),
            Action::ToggleGrid => self.set_grid_visible(!self.scene.grid_visible),
            Action::ToggleGridLabels => self.set_grid_labels_visible(!self.scene.grid_labels_visible),
            Action::ToggleSnap => self.set_snap_to_grid(!self.scene.snap_to_grid),
            Action::ZoomIn => {
                self.wheel(self.viewport.center(), 1.0);
            }
            Action::ZoomOut => {
                self.wheel(self.viewport.center(), -1.0);
            }
            Action::ResetCamera => self.reset_camera(),
            Action::CopyCameraToGame => self.copy_camera_to_game(),
            Action::BringToFront => {
                self.bring_to_front();
            }
            Action::SendToBack => {
                self.send_to_back();
            }
            Action::Nudge(offset) => {
                // Rejections are already reported through the status.
                let _ = self.nudge(offset);
            }
            Action::Noop => {}
        }
    }

    /// Pointer pressed at a screen position.
    ///
    /// Panning buttons start a camera drag. The primary button selects under
    /// the pointer and, with a transform tool, captures the drag start of
    /// every unlocked selected object.
    pub fn pointer_down(&mut self, screen: DVec2, button: Button, modifiers: Modifiers) {
        if !matches!(self.gesture, Gesture::Idle) {
            return;
        }
        if button.pans() {
            self.gesture = Gesture::Panning {
                start_screen: screen,
                start_camera: self.scene.camera.scene_position(),
            };
            return;
        }
        if !self.viewport.contains(screen) {
            return;
        }

        let hit = self.object_at(screen).map(|o| o.id.clone());
        match hit {
            Some(id) if modifiers.ctrl => {
                self.select(&id, true);
            }
            Some(id) => {
                if !self.is_selected(&id) {
                    self.select(&id, false);
                }
            }
            None if self.tool == Tool::Select && !modifiers.ctrl => self.deselect_all(),
            None => {}
        }

        if self.tool.transforms() {
            self.begin_drag(screen);
        }
    }

    fn begin_drag(&mut self, screen: DVec2) {
        self.prune_selection();
        let default_size = DVec2::splat(self.config.default_primitive_size);
        let entries: BTreeMap<ObjectId, DragStart> = self
            .selected_objects()
            .filter(|o| !o.locked)
            .map(|o| {
                let native_size = o
                    .sprite
                    .image_path()
                    .and_then(|p| self.images.native_size(p))
                    .unwrap_or(default_size);
                let start = DragStart {
                    pose: Pose::of(o),
                    screen_space: o.screen_space,
                    native_size,
                };
                (o.id.clone(), start)
            })
            .collect();
        if entries.is_empty() {
            return;
        }
        tracing::debug!(tool = self.tool.label(), objects = entries.len(), "drag started");
        self.gesture = Gesture::Dragging {
            tool: self.tool,
            start_screen: screen,
            start_world: self.screen_to_world(screen),
            entries,
            dirty: false,
        };
    }

    /// Pointer moved while a button may be held.
    pub fn pointer_move(&mut self, screen: DVec2, modifiers: Modifiers) {
        match &self.gesture {
            Gesture::Idle => {}
            Gesture::Panning {
                start_screen,
                start_camera,
            } => {
                let (start_screen, start_camera) = (*start_screen, *start_camera);
                self.scene.camera.set_scene_position(start_camera);
                self.viewport
                    .pan_by_screen(&mut self.scene.camera, screen - start_screen);
            }
            Gesture::Dragging { .. } => self.update_drag(screen, modifiers),
        }
    }

    /// Pointer released. Returns true if the drag produced a history commit.
    pub fn pointer_up(&mut self, screen: DVec2, modifiers: Modifiers) -> bool {
        self.pointer_move(screen, modifiers);
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Dragging { tool, dirty: true, .. } => {
                self.commit();
                self.set_status(format!("{} applied", tool.label()));
                true
            }
            _ => false,
        }
    }

    fn update_drag(&mut self, screen: DVec2, modifiers: Modifiers) {
        let world_now = self.viewport.screen_to_world(&self.scene.camera, screen);
        let snap_step = self
            .scene
            .snap_to_grid
            .then(|| f64::from(self.scene.grid_size()));
        let rules = DragRules::new(&self.config, snap_step);

        let Gesture::Dragging {
            tool,
            start_screen,
            start_world,
            entries,
            dirty,
        } = &mut self.gesture
        else {
            return;
        };
        let delta = DragDelta {
            screen: screen - *start_screen,
            world: world_now - *start_world,
            modifiers,
        };

        let mut any_changed = false;
        let mut stale = Vec::new();
        for (id, start) in entries.iter() {
            let pose = drag_pose(*tool, start, &delta, &rules);
            if self.scene.modify(id, |o| pose.apply_to(o)).is_none() {
                stale.push(id.clone());
                continue;
            }
            any_changed |= pose.differs(&start.pose);
        }
        for id in stale {
            tracing::warn!(%id, "dragged object vanished; dropped from drag");
            entries.remove(&id);
        }
        *dirty = any_changed;
    }

    /// Abandon an in-progress gesture without committing.
    fn cancel_gesture(&mut self) {
        if let Gesture::Dragging { entries, .. } = std::mem::replace(&mut self.gesture, Gesture::Idle) {
            for (id, start) in &entries {
                self.scene.modify(id, |o| start.pose.apply_to(o));
            }
        }
    }

    // --- status ---

    fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(status = %message);
        self.status = Some(message);
    }

    fn reject<T>(&mut self, err: EditError) -> Result<T, EditError> {
        tracing::warn!(error = %err, "edit rejected");
        self.status = Some(err.to_string());
        Err(err)
    }
}
