use glam::DVec2;

/// Which manipulation tool interprets pointer drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pick objects; drags do not transform.
    #[default]
    Select,
    Move,
    Rotate,
    Scale,
}

impl Tool {
    pub fn label(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Move => "move",
            Self::Rotate => "rotate",
            Self::Scale => "scale",
        }
    }

    /// Whether drags with this tool edit transforms.
    pub fn transforms(self) -> bool {
        !matches!(self, Self::Select)
    }
}

/// A discrete editor command.
///
/// Key bindings, toolbar buttons and menus all produce actions; the editor
/// session consumes actions, never raw key events.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Switch the active tool.
    SetTool(Tool),
    /// Undo the last committed edit.
    Undo,
    /// Redo the last undone edit.
    Redo,
    DeleteSelected,
    /// Copy the selection to the clipboard.
    Copy,
    /// Insert the clipboard contents.
    Paste,
    SelectAll,
    DeselectAll,
    ToggleGrid,
    ToggleGridLabels,
    ToggleSnap,
    /// Zoom in one step about the viewport center.
    ZoomIn,
    /// Zoom out one step about the viewport center.
    ZoomOut,
    ResetCamera,
    /// Make the runtime camera match the editing camera.
    CopyCameraToGame,
    BringToFront,
    SendToBack,
    /// Move the selection by a world-space offset.
    Nudge(DVec2),
    /// Unbound input.
    Noop,
}
