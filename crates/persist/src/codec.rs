use stagecraft_common::SCENE_FORMAT_VERSION;
use stagecraft_scene::{NormalizeReport, Scene};

use crate::store::StoreError;

/// Serialize a scene to its file representation.
///
/// Output is deterministic: fields in declaration order, objects in draw
/// order, `custom_data` keys sorted.
pub fn encode(scene: &Scene) -> Result<Vec<u8>, StoreError> {
    let mut bytes = serde_json::to_vec_pretty(scene)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parse a scene file. Missing optional fields take their defaults.
pub fn decode(bytes: &[u8]) -> Result<Scene, StoreError> {
    decode_with_report(bytes).map(|(scene, _)| scene)
}

/// Parse a scene file and report what had to be normalized.
pub fn decode_with_report(bytes: &[u8]) -> Result<(Scene, NormalizeReport), StoreError> {
    let mut scene: Scene = serde_json::from_slice(bytes)?;
    if scene.version > SCENE_FORMAT_VERSION {
        tracing::warn!(
            file_version = scene.version,
            supported = SCENE_FORMAT_VERSION,
            "scene written by a newer version; unknown fields are ignored"
        );
    }
    let report = scene.normalize();
    Ok((scene, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use stagecraft_common::{ObjectId, Rgb, SpriteShape};
    use stagecraft_scene::{Scalar, SceneObject, Size, Sprite};

    fn sample() -> Scene {
        let mut scene = Scene::new("level-1");
        scene.camera.scene_x = 12.5;
        scene.camera.scene_zoom = 1.75;
        scene.camera.game_y = -40.0;
        scene.set_grid_size(16);
        scene.snap_to_grid = true;
        scene.grid_labels_visible = true;

        let mut hero = SceneObject::image("hero", "sprites/hero.png", DVec2::new(0.1, 0.2))
            .with_id("hero-id")
            .with_z_index(2);
        hero.transform.rotation = 33.3;
        hero.transform.scale_x = 1.0 / 3.0;
        hero.extra.insert("health".into(), Scalar::Int(100));
        hero.extra.insert("tag".into(), Scalar::Text("player".into()));
        hero.extra.insert("boss".into(), Scalar::Bool(false));
        hero.extra.insert("speed".into(), Scalar::Float(2.5));
        scene.insert(hero);

        let mut hud = SceneObject::new(
            "hud",
            Sprite::Rectangle(Size::new(200.0, 24.0)),
            DVec2::new(100.0, 12.0),
        )
        .with_color(Rgb(0, 0, 0))
        .with_z_index(10);
        hud.screen_space = true;
        hud.locked = true;
        scene.insert(hud);

        let mut ghost = SceneObject::new(
            "ghost",
            Sprite::Ellipse(Size::new(7.25, 3.5)),
            DVec2::new(-1e6, 3.0e-7),
        )
        .with_color(Rgb(1, 2, 3))
        .with_z_index(-3);
        ghost.visible = false;
        scene.insert(ghost);

        scene.insert(SceneObject::new(
            "coin",
            Sprite::Circle(Size::square(16.0)),
            DVec2::new(0.30000000000000004, 7.0),
        ));
        scene
    }

    #[test]
    fn roundtrip_is_field_exact() {
        let scene = sample();
        let bytes = encode(&scene).unwrap();
        let loaded = decode(&bytes).unwrap();
        assert_eq!(loaded, scene);
    }

    #[test]
    fn encoding_is_deterministic() {
        let scene = sample();
        assert_eq!(encode(&scene).unwrap(), encode(&scene.clone()).unwrap());
    }

    #[test]
    fn file_layout_uses_record_fields() {
        let bytes = encode(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        for key in [
            "version",
            "name",
            "camera",
            "objects",
            "grid_size",
            "grid_visible",
            "grid_labels_visible",
            "snap_to_grid",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        let cam = &value["camera"];
        assert_eq!(cam["scene_zoom"], 1.75);
        assert_eq!(cam["game_y"], -40.0);

        let first = &value["objects"][0];
        assert_eq!(first["name"], "ghost");
        assert_eq!(first["sprite_shape"], "ellipse");
        assert_eq!(first["sprite_color"], serde_json::json!([1, 2, 3]));
        assert_eq!(first["custom_data"]["width"], 7.25);
        assert_eq!(first["sprite_path"], "");
    }

    #[test]
    fn minimal_file_loads_with_defaults() {
        let scene = decode(br#"{"name": "tiny"}"#).unwrap();
        assert_eq!(scene.name, "tiny");
        assert_eq!(scene.version, SCENE_FORMAT_VERSION);
        assert!(scene.is_empty());
        assert!(scene.grid_visible);
        assert!(!scene.snap_to_grid);
        assert_eq!(scene.camera.game_zoom, 1.0);
    }

    #[test]
    fn older_object_records_load() {
        let json = br#"{
            "version": 1,
            "objects": [
                {"id": "p", "name": "player", "sprite_path": "p.png",
                 "transform": {"x": 5.0, "y": 6.0}}
            ]
        }"#;
        let scene = decode(json).unwrap();
        let obj = scene.get(&ObjectId::from("p")).unwrap();
        assert_eq!(obj.shape(), SpriteShape::Image);
        assert_eq!(obj.transform.scale_x, 1.0);
        assert!(obj.visible);
        assert!(!obj.locked);
    }

    #[test]
    fn newer_version_still_loads() {
        let json = br#"{"version": 99, "future_field": [1, 2], "name": "next"}"#;
        let scene = decode(json).unwrap();
        assert_eq!(scene.name, "next");
    }

    #[test]
    fn unsorted_file_is_normalized() {
        let json = br#"{"objects": [
            {"id": "a", "sprite_shape": "circle", "z_index": 5},
            {"id": "b", "sprite_shape": "circle", "z_index": 0}
        ]}"#;
        let (scene, report) = decode_with_report(json).unwrap();
        assert!(report.reordered);
        assert_eq!(scene.objects()[0].id, ObjectId::from("b"));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(matches!(decode(b"not json"), Err(StoreError::Json(_))));
        let bad_object = br#"{"objects": [{"id": "x", "sprite_shape": "image"}]}"#;
        assert!(decode(bad_object).is_err());
    }
}
