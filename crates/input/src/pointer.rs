/// Modifier keys held during an event.
///
/// `shift` requests snapping while rotating and uniform scaling; `ctrl`
/// makes a click add to the selection instead of replacing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left button: tool interaction.
    Primary,
    /// Middle button: camera pan.
    Middle,
    /// Right button: camera pan.
    Secondary,
}

impl Button {
    /// Buttons that drag the camera instead of objects.
    pub fn pans(self) -> bool {
        matches!(self, Self::Middle | Self::Secondary)
    }
}
