#![forbid(unsafe_code)]

//! Canonical pointer/touch events.
//!
//! The embedding host owns the raw input devices and normalizes whatever it
//! receives (mouse, touch, pen) into these events before handing them to the
//! engine. Coordinates are container-relative pixels.
//!
//! # Design Notes
//!
//! - Pointer-down carries the gesture target resolved by the host's hit
//!   test: either a widget body or a widget's resize handle. The handle
//!   intercepts the pointer before the body, so a resize can never start on
//!   a widget that is already being dragged.
//! - Move and up events carry no target: once a gesture is active the engine
//!   tracks the captured widget itself, so the drag survives the pointer
//!   leaving the widget's bounds.

use crate::geometry::PxPoint;
use crate::id::WidgetId;
use bitflags::bitflags;

/// A pointer event delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,
    /// Container-relative pixel position.
    pub position: PxPoint,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event with no modifiers.
    #[must_use]
    pub fn new(kind: PointerEventKind, position: PxPoint) -> Self {
        Self {
            kind,
            position,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Primary-button press on a widget body.
    #[must_use]
    pub fn down_on_body(id: impl Into<WidgetId>, position: PxPoint) -> Self {
        Self::new(
            PointerEventKind::Down {
                button: PointerButton::Primary,
                target: GestureTarget::WidgetBody(id.into()),
            },
            position,
        )
    }

    /// Primary-button press on a widget's resize handle.
    #[must_use]
    pub fn down_on_handle(id: impl Into<WidgetId>, position: PxPoint) -> Self {
        Self::new(
            PointerEventKind::Down {
                button: PointerButton::Primary,
                target: GestureTarget::ResizeHandle(id.into()),
            },
            position,
        )
    }

    /// Pointer moved to a new position.
    #[must_use]
    pub fn moved(position: PxPoint) -> Self {
        Self::new(PointerEventKind::Move, position)
    }

    /// Primary button released.
    #[must_use]
    pub fn up(position: PxPoint) -> Self {
        Self::new(
            PointerEventKind::Up {
                button: PointerButton::Primary,
            },
            position,
        )
    }

    /// Gesture cancelled by the host.
    #[must_use]
    pub fn cancel(reason: CancelReason, position: PxPoint) -> Self {
        Self::new(PointerEventKind::Cancel { reason }, position)
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEventKind {
    /// Button pressed on a gesture target.
    Down {
        /// Which button went down.
        button: PointerButton,
        /// What the host's hit test resolved under the pointer.
        target: GestureTarget,
    },

    /// Pointer moved (document-level: delivered regardless of what is under
    /// the pointer while a gesture is active).
    Move,

    /// Button released.
    Up {
        /// Which button went up.
        button: PointerButton,
    },

    /// Gesture aborted without a release.
    Cancel {
        /// Why the gesture was aborted.
        reason: CancelReason,
    },
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureTarget {
    /// The draggable body of a widget.
    WidgetBody(WidgetId),
    /// A widget's resize handle. Handles stop propagation, so a down on a
    /// handle never doubles as a down on the body.
    ResizeHandle(WidgetId),
}

impl GestureTarget {
    /// The widget this target belongs to.
    #[must_use]
    pub fn widget_id(&self) -> &WidgetId {
        match self {
            Self::WidgetBody(id) | Self::ResizeHandle(id) => id,
        }
    }
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button / primary touch.
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button.
    Middle,
}

/// Why a gesture was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The host delivered a pointer-cancel (e.g. touch interrupted).
    PointerCancel,
    /// The container lost focus mid-gesture.
    FocusLost,
    /// An explicit programmatic cancel call.
    Programmatic,
    /// The captured widget was removed from the model mid-gesture.
    WidgetRemoved,
}

bitflags! {
    /// Modifier keys that can be held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}
