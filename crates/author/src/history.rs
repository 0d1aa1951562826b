use std::collections::VecDeque;

use stagecraft_scene::{Camera, Scene, SceneObject};

/// Full copy of the undoable part of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    objects: Vec<SceneObject>,
    camera: Camera,
    grid_size: u32,
    grid_visible: bool,
    grid_labels_visible: bool,
    snap_to_grid: bool,
}

impl Snapshot {
    pub fn capture(scene: &Scene) -> Self {
        Self {
            objects: scene.objects().to_vec(),
            camera: scene.camera,
            grid_size: scene.grid_size(),
            grid_visible: scene.grid_visible,
            grid_labels_visible: scene.grid_labels_visible,
            snap_to_grid: scene.snap_to_grid,
        }
    }

    /// Replace the scene's objects, camera and grid settings with this state.
    pub fn restore(&self, scene: &mut Scene) {
        scene.set_objects(self.objects.clone());
        scene.camera = self.camera;
        scene.set_grid_size(self.grid_size);
        scene.grid_visible = self.grid_visible;
        scene.grid_labels_visible = self.grid_labels_visible;
        scene.snap_to_grid = self.snap_to_grid;
    }
}

/// Bounded snapshot history.
///
/// The top of the undo stack always mirrors the live scene as of the last
/// commit. The bottom entry is never popped by `undo`, only aged out when
/// the stack exceeds capacity.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    capacity: usize,
}

impl History {
    /// Start a history whose base entry is `initial`.
    pub fn new(initial: &Scene, capacity: usize) -> Self {
        let mut history = Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        };
        history.reset(initial);
        history
    }

    /// Forget everything and start over from `scene`.
    pub fn reset(&mut self, scene: &Scene) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.undo_stack.push_back(Snapshot::capture(scene));
    }

    /// Record the current scene as a new checkpoint.
    pub fn commit(&mut self, scene: &Scene) {
        self.undo_stack.push_back(Snapshot::capture(scene));
        self.redo_stack.clear();
        while self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
        tracing::debug!(depth = self.undo_stack.len(), "history commit");
    }

    /// Step back one checkpoint. Returns false when already at the base.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        if self.undo_stack.len() <= 1 {
            return false;
        }
        let Some(current) = self.undo_stack.pop_back() else {
            return false;
        };
        self.redo_stack.push(current);
        if let Some(previous) = self.undo_stack.back() {
            previous.restore(scene);
        }
        tracing::debug!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "undo");
        true
    }

    /// Re-apply the last undone checkpoint. Returns false if there is none.
    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        next.restore(scene);
        self.undo_stack.push_back(next);
        tracing::debug!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "redo");
        true
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
