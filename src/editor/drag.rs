//! Pointer gesture state.
//!
//! The editor is driven by three abstract pointer events rather than any
//! toolkit's event model. A UI layer translates its own mouse or touch
//! events into [`PointerEvent`]s and forwards every one of them, including
//! moves and releases that happen outside the canvas.
//!
//! ```text
//!            Press on field
//!   Idle ─────────────────────▶ Dragging { field, offset }
//!    ▲                              │  Move: reposition field
//!    └──────────── Release ─────────┘
//! ```

use crate::geometry::Point;

/// Input to the editor's gesture state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed at `position`. `target` is the placed field under the
    /// pointer, if any.
    Press {
        position: Point,
        target: Option<String>,
    },
    /// Pointer moved to `position`, inside or outside the canvas.
    Move { position: Point },
    /// Pointer released anywhere.
    Release,
}

/// Whether a placed field is currently being dragged.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Field being moved.
        field: String,
        /// Pointer position minus the field's anchor, in rendered pixels,
        /// captured at press time.
        offset: Point,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// Id of the field being dragged.
    pub fn field(&self) -> Option<&str> {
        match self {
            DragState::Dragging { field, .. } => Some(field),
            DragState::Idle => None,
        }
    }
}
