use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, stable identifier for a scene object.
///
/// Generated once at creation and never reassigned. Ids read from a scene file
/// are kept verbatim, so any string is a valid id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Mint a fresh id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ObjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Planar transform of a scene object.
///
/// `x`/`y` is the world-space center, `rotation` is in degrees (clockwise on
/// screen) and the scale factors never drop below [`crate::MIN_SCALE`] once
/// edited through the editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "one")]
    pub scale_x: f64,
    #[serde(default = "one")]
    pub scale_y: f64,
}

fn one() -> f64 {
    1.0
}

impl Transform {
    /// Identity transform centered on `position`.
    pub fn at(position: DVec2) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..Self::default()
        }
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn scale(&self) -> DVec2 {
        DVec2::new(self.scale_x, self.scale_y)
    }

    pub fn set_position(&mut self, position: DVec2) {
        self.x = position.x;
        self.y = position.y;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

/// 8-bit RGB color, persisted as a three element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Self = Self(255, 255, 255);
    /// Fill used for freshly added primitives.
    pub const DEFAULT_FILL: Self = Self(100, 150, 255);
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// What a scene object draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpriteShape {
    #[default]
    Image,
    Rectangle,
    Circle,
    Ellipse,
}

impl SpriteShape {
    /// Procedurally drawn shapes, sized by explicit width/height.
    pub fn is_primitive(self) -> bool {
        !matches!(self, Self::Image)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
        }
    }
}

impl fmt::Display for SpriteShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl std::str::FromStr for SpriteShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "rectangle" | "rect" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "ellipse" => Ok(Self::Ellipse),
            other => Err(format!("unknown sprite shape '{other}'")),
        }
    }
}
