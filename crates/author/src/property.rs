//! Named, user-editable object properties.
//!
//! Values arrive as text from inspector fields or as numeric deltas from
//! slider buttons. Parsing and range checks happen before anything is
//! touched, so a rejected edit never mutates the scene.

use std::str::FromStr;

use stagecraft_scene::SceneObject;

use crate::config::EditorConfig;
use crate::session::EditError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    X,
    Y,
    Rotation,
    ScaleX,
    ScaleY,
    Width,
    Height,
    ZIndex,
    Name,
    Visible,
    Locked,
    ScreenSpace,
    ColorR,
    ColorG,
    ColorB,
}

impl Property {
    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Rotation => "rotation",
            Self::ScaleX => "scale_x",
            Self::ScaleY => "scale_y",
            Self::Width => "width",
            Self::Height => "height",
            Self::ZIndex => "z_index",
            Self::Name => "name",
            Self::Visible => "visible",
            Self::Locked => "locked",
            Self::ScreenSpace => "screen_space",
            Self::ColorR => "color_r",
            Self::ColorG => "color_g",
            Self::ColorB => "color_b",
        }
    }

    /// Properties that locked objects refuse.
    pub fn is_transform(self) -> bool {
        matches!(
            self,
            Self::X | Self::Y | Self::Rotation | Self::ScaleX | Self::ScaleY | Self::Width | Self::Height
        )
    }

    /// Properties that only exist on primitives.
    pub fn is_primitive_only(self) -> bool {
        matches!(self, Self::Width | Self::Height)
    }

    /// Properties that `adjust` can step.
    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::Name | Self::Visible | Self::Locked | Self::ScreenSpace)
    }

    fn is_flag(self) -> bool {
        matches!(self, Self::Visible | Self::Locked | Self::ScreenSpace)
    }

    /// Whether this object accepts edits of this property.
    pub fn applies_to(self, obj: &SceneObject) -> bool {
        if obj.locked && self.is_transform() {
            return false;
        }
        !self.is_primitive_only() || obj.is_primitive()
    }
}

impl FromStr for Property {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let prop = match s.trim().to_ascii_lowercase().as_str() {
            "x" => Self::X,
            "y" => Self::Y,
            "rotation" => Self::Rotation,
            "scale_x" => Self::ScaleX,
            "scale_y" => Self::ScaleY,
            "width" => Self::Width,
            "height" => Self::Height,
            "z_index" | "z" => Self::ZIndex,
            "name" => Self::Name,
            "visible" => Self::Visible,
            "locked" => Self::Locked,
            "screen_space" => Self::ScreenSpace,
            "color_r" => Self::ColorR,
            "color_g" => Self::ColorG,
            "color_b" => Self::ColorB,
            other => return Err(EditError::UnknownProperty(other.to_owned())),
        };
        Ok(prop)
    }
}

/// A validated value ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

/// Parse and range-check text input for `prop`.
pub fn parse_value(prop: Property, raw: &str, config: &EditorConfig) -> Result<PropertyValue, EditError> {
    let raw = raw.trim();
    if prop == Property::Name {
        if raw.is_empty() {
            return Err(EditError::Validation("name cannot be empty".into()));
        }
        return Ok(PropertyValue::Text(raw.to_owned()));
    }
    if prop.is_flag() {
        return match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(PropertyValue::Flag(true)),
            "false" | "0" | "no" | "off" => Ok(PropertyValue::Flag(false)),
            _ => Err(EditError::Validation(format!(
                "{} expects true or false, got '{raw}'",
                prop.name()
            ))),
        };
    }
    let number: f64 = raw.parse().map_err(|_| {
        EditError::Validation(format!("{} expects a number, got '{raw}'", prop.name()))
    })?;
    check_number(prop, number, config)?;
    Ok(PropertyValue::Number(number))
}

fn check_number(prop: Property, value: f64, config: &EditorConfig) -> Result<(), EditError> {
    let reject = |why: &str| Err(EditError::Validation(format!("{}: {why}", prop.name())));
    if !value.is_finite() {
        return reject("value must be finite");
    }
    match prop {
        Property::ScaleX | Property::ScaleY if value < config.min_scale => {
            reject(&format!("must be at least {}", config.min_scale))
        }
        Property::Width | Property::Height if value < config.min_primitive_size => {
            reject(&format!("must be at least {}", config.min_primitive_size))
        }
        Property::ZIndex
            if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) =>
        {
            reject("must be a whole number")
        }
        Property::ColorR | Property::ColorG | Property::ColorB
            if value.fract() != 0.0 || !(0.0..=255.0).contains(&value) =>
        {
            reject("must be a whole number from 0 to 255")
        }
        _ => Ok(()),
    }
}

/// Write a validated value. Returns whether the object changed.
pub fn set(obj: &mut SceneObject, prop: Property, value: &PropertyValue) -> bool {
    match (prop, value) {
        (Property::Name, PropertyValue::Text(text)) => replace(&mut obj.name, text.clone()),
        (Property::Visible, PropertyValue::Flag(flag)) => replace(&mut obj.visible, *flag),
        (Property::Locked, PropertyValue::Flag(flag)) => replace(&mut obj.locked, *flag),
        (Property::ScreenSpace, PropertyValue::Flag(flag)) => replace(&mut obj.screen_space, *flag),
        (_, PropertyValue::Number(n)) => write_number(obj, prop, *n),
        _ => false,
    }
}

/// Add `delta` to a numeric property, clamping to its floor.
pub fn adjust(obj: &mut SceneObject, prop: Property, delta: f64, config: &EditorConfig) -> Result<bool, EditError> {
    let Some(current) = read_number(obj, prop) else {
        return Err(EditError::Validation(format!("{} cannot be adjusted", prop.name())));
    };
    if !delta.is_finite() {
        return Err(EditError::Validation(format!("{}: delta must be finite", prop.name())));
    }
    let next = match prop {
        Property::ScaleX | Property::ScaleY => (current + delta).max(config.min_scale),
        Property::Width | Property::Height => (current + delta).max(config.min_primitive_size),
        Property::ZIndex => (current + delta.round()).clamp(f64::from(i32::MIN), f64::from(i32::MAX)),
        Property::ColorR | Property::ColorG | Property::ColorB => (current + delta.round()).clamp(0.0, 255.0),
        Property::Rotation => (current + delta).rem_euclid(360.0),
        _ => current + delta,
    };
    if !next.is_finite() {
        return Err(EditError::Validation(format!("{}: result is out of range", prop.name())));
    }
    Ok(write_number(obj, prop, next))
}

/// Current numeric value, if the property is numeric for this object.
pub fn read_number(obj: &SceneObject, prop: Property) -> Option<f64> {
    let t = &obj.transform;
    match prop {
        Property::X => Some(t.x),
        Property::Y => Some(t.y),
        Property::Rotation => Some(t.rotation),
        Property::ScaleX => Some(t.scale_x),
        Property::ScaleY => Some(t.scale_y),
        Property::Width => obj.sprite.primitive_size().map(|s| s.width),
        Property::Height => obj.sprite.primitive_size().map(|s| s.height),
        Property::ZIndex => Some(f64::from(obj.z_index)),
        Property::ColorR => Some(f64::from(obj.color.0)),
        Property::ColorG => Some(f64::from(obj.color.1)),
        Property::ColorB => Some(f64::from(obj.color.2)),
        Property::Name | Property::Visible | Property::Locked | Property::ScreenSpace => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn write_number(obj: &mut SceneObject, prop: Property, value: f64) -> bool {
    let t = &mut obj.transform;
    match prop {
        Property::X => replace(&mut t.x, value),
        Property::Y => replace(&mut t.y, value),
        Property::Rotation => replace(&mut t.rotation, value),
        Property::ScaleX => replace(&mut t.scale_x, value),
        Property::ScaleY => replace(&mut t.scale_y, value),
        Property::Width => match obj.sprite.primitive_size_mut() {
            Some(size) => replace(&mut size.width, value),
            None => false,
        },
        Property::Height => match obj.sprite.primitive_size_mut() {
            Some(size) => replace(&mut size.height, value),
            None => false,
        },
        Property::ZIndex => replace(&mut obj.z_index, value as i32),
        Property::ColorR => replace(&mut obj.color.0, value as u8),
        Property::ColorG => replace(&mut obj.color.1, value as u8),
        Property::ColorB => replace(&mut obj.color.2, value as u8),
        Property::Name | Property::Visible | Property::Locked | Property::ScreenSpace => false,
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
