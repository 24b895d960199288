#![forbid(unsafe_code)]

//! Widget placements and add-requests.

use gridboard_core::geometry::{CellPos, CellRect, Span};
use gridboard_core::id::WidgetId;
use std::any::Any;

/// Opaque renderable payload.
///
/// The engine never inspects widget content; it stores the payload and hands
/// it back to the renderer alongside a pixel rectangle, keyed by widget id.
/// Content is excluded from snapshots — restoring a layout re-binds content
/// by id on the caller's side.
pub trait WidgetContent: Any {
    /// Access the payload for downcasting on the renderer side.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> WidgetContent for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One committed entry in the grid model.
///
/// Placements are pure geometry plus interaction flags; the content payload
/// lives next to them in the model, keyed by id, so that policy code can
/// clone and shuffle placements freely.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetPlacement {
    /// Unique id within the model.
    pub id: WidgetId,
    /// Committed cell rectangle.
    pub rect: CellRect,
    /// Whether the widget body starts a move gesture.
    pub draggable: bool,
    /// Whether the widget shows a resize handle.
    pub resizable: bool,
    /// Smallest span a resize may shrink to.
    pub min_span: Span,
    /// Fixed pixel height for every row this widget occupies; rows carrying
    /// an override leave the flex pool.
    pub height: Option<f32>,
}

impl WidgetPlacement {
    /// Top-left cell.
    #[inline]
    #[must_use]
    pub const fn pos(&self) -> CellPos {
        self.rect.pos()
    }

    /// Cell-count extent.
    #[inline]
    #[must_use]
    pub const fn span(&self) -> Span {
        self.rect.span()
    }
}

/// An add-request for [`GridModel::add_widget`](crate::model::GridModel::add_widget).
///
/// Omitting [`WidgetSpec::at`] selects auto-placement: the first free cell
/// in row-major scan order that fits the requested span.
pub struct WidgetSpec {
    pub(crate) id: WidgetId,
    pub(crate) position: Option<CellPos>,
    pub(crate) span: Span,
    pub(crate) draggable: bool,
    pub(crate) resizable: bool,
    pub(crate) min_span: Span,
    pub(crate) height: Option<f32>,
    pub(crate) content: Option<Box<dyn WidgetContent>>,
}

impl WidgetSpec {
    /// Start a spec for the given widget id with a 1×1 span, draggable and
    /// resizable, auto-placed.
    #[must_use]
    pub fn new(id: impl Into<WidgetId>) -> Self {
        Self {
            id: id.into(),
            position: None,
            span: Span::UNIT,
            draggable: true,
            resizable: true,
            min_span: Span::UNIT,
            height: None,
            content: None,
        }
    }

    /// Place at explicit coordinates instead of auto-placement.
    #[must_use]
    pub fn at(mut self, col: u16, row: u16) -> Self {
        self.position = Some(CellPos::new(col, row));
        self
    }

    /// Set the requested span.
    #[must_use]
    pub fn span(mut self, dx: u16, dy: u16) -> Self {
        self.span = Span::new(dx, dy);
        self
    }

    /// Allow or forbid move gestures.
    #[must_use]
    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Allow or forbid resize gestures.
    #[must_use]
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Set the minimum span a resize may shrink to.
    #[must_use]
    pub fn min_span(mut self, dx: u16, dy: u16) -> Self {
        self.min_span = Span::new(dx, dy);
        self
    }

    /// Pin the rows this widget occupies to a fixed pixel height.
    #[must_use]
    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    /// Attach an opaque content payload.
    #[must_use]
    pub fn content(mut self, content: Box<dyn WidgetContent>) -> Self {
        self.content = Some(content);
        self
    }
}

impl std::fmt::Debug for WidgetSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetSpec")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("span", &self.span)
            .field("draggable", &self.draggable)
            .field("resizable", &self.resizable)
            .field("min_span", &self.min_span)
            .field("height", &self.height)
            .field("content", &self.content.as_ref().map(|_| ".."))
            .finish()
    }
}
