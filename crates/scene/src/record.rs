//! On-disk shape of a scene object.
//!
//! [`SceneObject`] keeps primitive sizes in its [`Sprite`]; the persisted record
//! keeps them in `custom_data` under `width`/`height`, next to any other named
//! values a newer writer may have added.

use serde::{Deserialize, Serialize};
use stagecraft_common::{DEFAULT_PRIMITIVE_SIZE, ObjectId, Rgb, SpriteShape, Transform};
use std::collections::BTreeMap;

use crate::object::{Scalar, SceneObject, Size, Sprite};

const WIDTH_KEY: &str = "width";
const HEIGHT_KEY: &str = "height";

/// Errors converting a persisted record into a live object.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("object {0} is an image but has no sprite_path")]
    MissingImagePath(ObjectId),
    #[error("object {id} has invalid {field}: {value}")]
    InvalidSize {
        id: ObjectId,
        field: &'static str,
        value: f64,
    },
}

/// Flat object record as written to scene files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    #[serde(default = "ObjectId::generate")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sprite_path: String,
    #[serde(default)]
    pub sprite_shape: SpriteShape,
    #[serde(default)]
    pub sprite_color: Rgb,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default)]
    pub screen_space: bool,
    #[serde(default = "visible_default")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub custom_data: BTreeMap<String, Scalar>,
}

fn visible_default() -> bool {
    true
}

impl From<SceneObject> for ObjectRecord {
    fn from(obj: SceneObject) -> Self {
        let mut custom_data = obj.extra;
        let sprite_path = match &obj.sprite {
            Sprite::Image { path } => path.clone(),
            _ => String::new(),
        };
        if let Some(size) = obj.sprite.primitive_size() {
            custom_data.insert(WIDTH_KEY.into(), Scalar::Float(size.width));
            custom_data.insert(HEIGHT_KEY.into(), Scalar::Float(size.height));
        }
        Self {
            id: obj.id,
            name: obj.name,
            sprite_path,
            sprite_shape: obj.sprite.shape(),
            sprite_color: obj.color,
            transform: obj.transform,
            z_index: obj.z_index,
            screen_space: obj.screen_space,
            visible: obj.visible,
            locked: obj.locked,
            custom_data,
        }
    }
}

impl TryFrom<ObjectRecord> for SceneObject {
    type Error = RecordError;

    fn try_from(mut record: ObjectRecord) -> Result<Self, Self::Error> {
        let sprite = if record.sprite_shape.is_primitive() {
            let width = take_dimension(&record.id, &mut record.custom_data, WIDTH_KEY)?;
            let height = take_dimension(&record.id, &mut record.custom_data, HEIGHT_KEY)?;
            Sprite::primitive(record.sprite_shape, Size::new(width, height))
                .unwrap_or(Sprite::Rectangle(Size::new(width, height)))
        } else {
            if record.sprite_path.is_empty() {
                return Err(RecordError::MissingImagePath(record.id));
            }
            Sprite::Image {
                path: record.sprite_path,
            }
        };

        Ok(Self {
            id: record.id,
            name: record.name,
            sprite,
            color: record.sprite_color,
            transform: record.transform,
            z_index: record.z_index,
            screen_space: record.screen_space,
            visible: record.visible,
            locked: record.locked,
            extra: record.custom_data,
        })
    }
}

/// Pull a primitive dimension out of the property bag, defaulting when absent.
fn take_dimension(
    id: &ObjectId,
    data: &mut BTreeMap<String, Scalar>,
    field: &'static str,
) -> Result<f64, RecordError> {
    let Some(raw) = data.remove(field) else {
        return Ok(DEFAULT_PRIMITIVE_SIZE);
    };
    match raw.as_f64() {
        Some(value) if value.is_finite() && value > 0.0 => Ok(value),
        Some(value) => Err(RecordError::InvalidSize {
            id: id.clone(),
            field,
            value,
        }),
        None => Err(RecordError::InvalidSize {
            id: id.clone(),
            field,
            value: f64::NAN,
        }),
    }
}
