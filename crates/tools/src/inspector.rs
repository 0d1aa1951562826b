use glam::DVec2;
use stagecraft_common::{ObjectId, Rgb, SpriteShape};
use stagecraft_scene::{Camera, Scene};

/// Scene inspector for developer tooling.
///
/// Read-only queries against a scene for debugging and command line output.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene.
    pub fn summary(scene: &Scene) -> SceneSummary {
        let objects = scene.objects();
        SceneSummary {
            name: scene.name.clone(),
            version: scene.version,
            object_count: objects.len(),
            visible_count: objects.iter().filter(|o| o.visible).count(),
            locked_count: objects.iter().filter(|o| o.locked).count(),
            screen_space_count: objects.iter().filter(|o| o.screen_space).count(),
            grid_size: scene.grid_size(),
            snap_to_grid: scene.snap_to_grid,
            camera: scene.camera,
        }
    }

    /// Details of one object, if it exists.
    pub fn inspect_object(scene: &Scene, id: &ObjectId) -> Option<ObjectInfo> {
        let obj = scene.get(id)?;
        Some(ObjectInfo {
            id: obj.id.clone(),
            name: obj.name.clone(),
            shape: obj.shape(),
            image: obj.sprite.image_path().map(str::to_owned),
            position: obj.transform.position(),
            rotation: obj.transform.rotation,
            scale: obj.transform.scale(),
            size: obj.sprite.primitive_size().map(|s| s.as_vec()),
            color: obj.color,
            z_index: obj.z_index,
            draw_index: scene.position(id)?,
            visible: obj.visible,
            locked: obj.locked,
            screen_space: obj.screen_space,
            extra_fields: obj.extra.len(),
        })
    }

    /// Object ids in draw order, bottom first.
    pub fn list_objects(scene: &Scene) -> Vec<ObjectId> {
        scene.objects().iter().map(|o| o.id.clone()).collect()
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub name: String,
    pub version: u32,
    pub object_count: usize,
    pub visible_count: usize,
    pub locked_count: usize,
    pub screen_space_count: usize,
    pub grid_size: u32,
    pub snap_to_grid: bool,
    pub camera: Camera,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = &self.camera;
        writeln!(
            f,
            "Scene '{}' v{}: objects={} visible={} locked={} screen_space={}",
            self.name,
            self.version,
            self.object_count,
            self.visible_count,
            self.locked_count,
            self.screen_space_count
        )?;
        writeln!(f, "  grid={} snap={}", self.grid_size, self.snap_to_grid)?;
        writeln!(
            f,
            "  scene camera=({:.2}, {:.2}) zoom={:.3}",
            c.scene_x, c.scene_y, c.scene_zoom
        )?;
        write!(
            f,
            "  game camera=({:.2}, {:.2}) zoom={:.3}",
            c.game_x, c.game_y, c.game_zoom
        )
    }
}

/// Detailed info about a single object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInfo {
    pub id: ObjectId,
    pub name: String,
    pub shape: SpriteShape,
    pub image: Option<String>,
    pub position: DVec2,
    pub rotation: f64,
    pub scale: DVec2,
    /// Width and height of primitives.
    pub size: Option<DVec2>,
    pub color: Rgb,
    pub z_index: i32,
    /// Position in draw order, 0 is drawn first.
    pub draw_index: usize,
    pub visible: bool,
    pub locked: bool,
    pub screen_space: bool,
    pub extra_fields: usize,
}

impl std::fmt::Display for ObjectInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Object [{}] '{}' {} pos=({:.2}, {:.2}) rot={:.1} scale=({:.2}, {:.2}) z={} #{}",
            self.id,
            self.name,
            self.shape,
            self.position.x,
            self.position.y,
            self.rotation,
            self.scale.x,
            self.scale.y,
            self.z_index,
            self.draw_index,
        )?;
        if let Some(size) = self.size {
            write!(f, " size={:.1}x{:.1}", size.x, size.y)?;
        }
        if let Some(image) = &self.image {
            write!(f, " image={image}")?;
        }
        let Rgb(r, g, b) = self.color;
        write!(f, " color=({r}, {g}, {b})")?;
        for (flag, label) in [
            (!self.visible, "hidden"),
            (self.locked, "locked"),
            (self.screen_space, "screen"),
        ] {
            if flag {
                write!(f, " [{label}]")?;
            }
        }
        Ok(())
    }
}
