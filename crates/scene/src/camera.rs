use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Two independent views onto the scene.
///
/// `scene_*` is the view used while editing. `game_*` is the view shipped to
/// the runtime. Editing never writes the game view; only
/// [`Camera::copy_scene_to_game`] bridges them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub scene_x: f64,
    pub scene_y: f64,
    pub scene_zoom: f64,
    pub game_x: f64,
    pub game_y: f64,
    pub game_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            scene_x: 0.0,
            scene_y: 0.0,
            scene_zoom: 1.0,
            game_x: 0.0,
            game_y: 0.0,
            game_zoom: 1.0,
        }
    }
}

impl Camera {
    /// World point at the center of the editing view.
    pub fn scene_position(&self) -> DVec2 {
        DVec2::new(self.scene_x, self.scene_y)
    }

    pub fn set_scene_position(&mut self, position: DVec2) {
        self.scene_x = position.x;
        self.scene_y = position.y;
    }

    pub fn game_position(&self) -> DVec2 {
        DVec2::new(self.game_x, self.game_y)
    }

    /// Make the runtime view match the editing view.
    pub fn copy_scene_to_game(&mut self) {
        self.game_x = self.scene_x;
        self.game_y = self.scene_y;
        self.game_zoom = self.scene_zoom;
    }

    /// Return the editing view to the origin at 1:1. The game view is kept.
    pub fn reset_scene(&mut self) {
        self.scene_x = 0.0;
        self.scene_y = 0.0;
        self.scene_zoom = 1.0;
    }
}
