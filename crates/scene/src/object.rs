use glam::DVec2;
use serde::{Deserialize, Serialize};
use stagecraft_common::{ObjectId, Rgb, SpriteShape, Transform};
use std::collections::BTreeMap;

use crate::record::ObjectRecord;

/// A primitive value stored in an object's open property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Bool(_) | Self::Text(_) => None,
        }
    }
}

/// Explicit pixel size of a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }

    pub fn as_vec(self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

/// What an object draws, keyed by its sprite kind.
///
/// Images carry a path and take their size from the asset; primitives carry
/// their own size.
#[derive(Debug, Clone, PartialEq)]
pub enum Sprite {
    Image { path: String },
    Rectangle(Size),
    Circle(Size),
    Ellipse(Size),
}

impl Sprite {
    /// Build a primitive sprite. Returns `None` for [`SpriteShape::Image`].
    pub fn primitive(shape: SpriteShape, size: Size) -> Option<Self> {
        match shape {
            SpriteShape::Image => None,
            SpriteShape::Rectangle => Some(Self::Rectangle(size)),
            SpriteShape::Circle => Some(Self::Circle(size)),
            SpriteShape::Ellipse => Some(Self::Ellipse(size)),
        }
    }

    pub fn shape(&self) -> SpriteShape {
        match self {
            Self::Image { .. } => SpriteShape::Image,
            Self::Rectangle(_) => SpriteShape::Rectangle,
            Self::Circle(_) => SpriteShape::Circle,
            Self::Ellipse(_) => SpriteShape::Ellipse,
        }
    }

    pub fn image_path(&self) -> Option<&str> {
        match self {
            Self::Image { path } => Some(path),
            _ => None,
        }
    }

    pub fn primitive_size(&self) -> Option<Size> {
        match self {
            Self::Image { .. } => None,
            Self::Rectangle(size) | Self::Circle(size) | Self::Ellipse(size) => Some(*size),
        }
    }

    pub fn primitive_size_mut(&mut self) -> Option<&mut Size> {
        match self {
            Self::Image { .. } => None,
            Self::Rectangle(size) | Self::Circle(size) | Self::Ellipse(size) => Some(size),
        }
    }
}

/// One placed entity in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ObjectRecord", try_from = "ObjectRecord")]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub sprite: Sprite,
    /// Fill color; only drawn for primitives but always persisted.
    pub color: Rgb,
    pub transform: Transform,
    pub z_index: i32,
    /// Drawn in viewport pixels, unaffected by camera pan and zoom.
    pub screen_space: bool,
    pub visible: bool,
    /// Blocks transform edits. Selection and flag toggles still apply.
    pub locked: bool,
    /// Named values carried through load/save untouched.
    pub extra: BTreeMap<String, Scalar>,
}

impl SceneObject {
    /// A new object with a fresh id at `position`.
    pub fn new(name: impl Into<String>, sprite: Sprite, position: DVec2) -> Self {
        Self {
            id: ObjectId::generate(),
            name: name.into(),
            sprite,
            color: Rgb::WHITE,
            transform: Transform::at(position),
            z_index: 0,
            screen_space: false,
            visible: true,
            locked: false,
            extra: BTreeMap::new(),
        }
    }

    pub fn image(name: impl Into<String>, path: impl Into<String>, position: DVec2) -> Self {
        Self::new(name, Sprite::Image { path: path.into() }, position)
    }

    pub fn with_id(mut self, id: impl Into<ObjectId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn shape(&self) -> SpriteShape {
        self.sprite.shape()
    }

    pub fn is_primitive(&self) -> bool {
        self.shape().is_primitive()
    }

    /// Copy of this object under a fresh id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: ObjectId::generate(),
            ..self.clone()
        }
    }
}
