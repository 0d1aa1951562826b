use glam::DVec2;

use crate::action::{Action, Tool};
use crate::pointer::Modifiers;

/// A keyboard key, reduced to what the default bindings need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Delete,
    Backspace,
    Escape,
    Home,
    Left,
    Right,
    Up,
    Down,
}

/// Default key bindings.
pub fn map_key(key: Key, mods: Modifiers) -> Action {
    let action = match key {
        Key::Char(c) if mods.ctrl => match c.to_ascii_lowercase() {
            'z' if mods.shift => Action::Redo,
            'z' => Action::Undo,
            'y' => Action::Redo,
            'c' => Action::Copy,
            'v' => Action::Paste,
            'a' => Action::SelectAll,
            _ => Action::Noop,
        },
        Key::Char(c) => match c.to_ascii_lowercase() {
            'v' => Action::SetTool(Tool::Select),
            'm' => Action::SetTool(Tool::Move),
            'r' => Action::SetTool(Tool::Rotate),
            's' => Action::SetTool(Tool::Scale),
            'g' => Action::ToggleGrid,
            'l' => Action::ToggleGridLabels,
            'n' => Action::ToggleSnap,
            'c' if mods.shift => Action::CopyCameraToGame,
            ']' => Action::BringToFront,
            '[' => Action::SendToBack,
            '+' | '=' => Action::ZoomIn,
            '-' => Action::ZoomOut,
            _ => Action::Noop,
        },
        Key::Delete | Key::Backspace => Action::DeleteSelected,
        Key::Escape => Action::DeselectAll,
        Key::Home => Action::ResetCamera,
        Key::Left => nudge(DVec2::NEG_X, mods),
        Key::Right => nudge(DVec2::X, mods),
        Key::Up => nudge(DVec2::NEG_Y, mods),
        Key::Down => nudge(DVec2::Y, mods),
    };
    if action == Action::Noop {
        tracing::trace!(?key, ?mods, "unbound key");
    }
    action
}

/// Arrow keys move one unit, or ten with shift held.
fn nudge(dir: DVec2, mods: Modifiers) -> Action {
    let step = if mods.shift { 10.0 } else { 1.0 };
    Action::Nudge(dir * step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_shortcuts() {
        assert_eq!(map_key(Key::Char('z'), Modifiers::ctrl()), Action::Undo);
        assert_eq!(map_key(Key::Char('y'), Modifiers::ctrl()), Action::Redo);
        let ctrl_shift = Modifiers {
            ctrl: true,
            shift: true,
            alt: false,
        };
        assert_eq!(map_key(Key::Char('Z'), ctrl_shift), Action::Redo);
    }

    #[test]
    fn tool_letters() {
        assert_eq!(map_key(Key::Char('m'), Modifiers::NONE), Action::SetTool(Tool::Move));
        assert_eq!(map_key(Key::Char('R'), Modifiers::NONE), Action::SetTool(Tool::Rotate));
        assert_eq!(map_key(Key::Char('s'), Modifiers::NONE), Action::SetTool(Tool::Scale));
        assert_eq!(map_key(Key::Char('v'), Modifiers::NONE), Action::SetTool(Tool::Select));
    }

    #[test]
    fn ctrl_letters_do_not_switch_tools() {
        assert_eq!(map_key(Key::Char('v'), Modifiers::ctrl()), Action::Paste);
        assert_eq!(map_key(Key::Char('s'), Modifiers::ctrl()), Action::Noop);
    }

    #[test]
    fn editing_keys() {
        assert_eq!(map_key(Key::Delete, Modifiers::NONE), Action::DeleteSelected);
        assert_eq!(map_key(Key::Backspace, Modifiers::NONE), Action::DeleteSelected);
        assert_eq!(map_key(Key::Escape, Modifiers::NONE), Action::DeselectAll);
        assert_eq!(map_key(Key::Char('C'), Modifiers::shift()), Action::CopyCameraToGame);
    }

    #[test]
    fn arrows_nudge() {
        assert_eq!(
            map_key(Key::Left, Modifiers::NONE),
            Action::Nudge(DVec2::new(-1.0, 0.0))
        );
        assert_eq!(
            map_key(Key::Down, Modifiers::shift()),
            Action::Nudge(DVec2::new(0.0, 10.0))
        );
    }

    #[test]
    fn unbound_is_noop() {
        assert_eq!(map_key(Key::Char('q'), Modifiers::NONE), Action::Noop);
    }
}
