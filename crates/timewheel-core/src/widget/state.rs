//! Drag gesture and handle presentation states.

use super::handles::HandleLabel;

/// State of the drag gesture. At most one handle is captured at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No handle captured.
    #[default]
    Idle,
    /// A handle follows the pointer.
    Dragging(HandleLabel),
}

impl DragState {
    /// The captured handle, if any.
    pub fn active(&self) -> Option<HandleLabel> {
        match self {
            Self::Dragging(label) => Some(*label),
            Self::Idle => None,
        }
    }
}

/// How a handle should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleState {
    #[default]
    Normal,
    /// Pointer is over the handle.
    Hovered,
    /// Handle is being dragged.
    Dragging,
}

impl HandleState {
    /// Hovered and dragged handles are both highlighted.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}
