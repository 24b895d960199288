#![forbid(unsafe_code)]

//! Pointer gesture state machine: drag to move, drag to resize.
//!
//! The controller is deterministic: every pointer event produces exactly one
//! [`GestureTransition`] describing the state change and its effect, and
//! events that change nothing still produce a transition with a
//! [`GestureEffect::Noop`] carrying the reason. Previews never mutate the
//! model; geometry commits only on pointer release, and only through the
//! drop policy.
//!
//! A press arms a gesture without starting it. The gesture begins once the
//! pointer travels [`DRAG_THRESHOLD_PX`] from the press point; a release
//! before that is a click. This keeps plain clicks on widget bodies from
//! jittering the layout.

use crate::model::GridModel;
use crate::placement::WidgetPlacement;
use crate::policy::{self, DropResolution};
use crate::resolver::ResolvedGeometry;
use gridboard_core::config::GridConfig;
use gridboard_core::event::{
    CancelReason, GestureTarget, PointerButton, PointerEvent, PointerEventKind,
};
use gridboard_core::geometry::{CellPos, CellRect, PxPoint, PxRect, Span};
use gridboard_core::id::WidgetId;
use tracing::debug;

/// Pointer travel, in pixels, required to turn a press into a drag.
pub const DRAG_THRESHOLD_PX: f32 = 4.0;

/// Controller state, reported in transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    /// No pointer capture.
    Idle,
    /// Pressed, below the drag threshold.
    Armed,
    /// Move gesture in flight.
    Moving,
    /// Resize gesture in flight.
    Resizing,
}

/// What a transition did.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEffect {
    /// A press captured the pointer; the gesture has not started yet.
    Armed { id: WidgetId, resize: bool },
    /// Press and release without crossing the drag threshold.
    Clicked { id: WidgetId },
    /// A move gesture crossed the threshold.
    DragStarted { id: WidgetId },
    /// The floating preview and its snap candidate changed.
    DragPreview { preview: PxRect, candidate: CellPos },
    /// The drop committed; the widget now sits at `pos`.
    DragCommitted { id: WidgetId, pos: CellPos },
    /// The drop was rejected; the widget stays at `snap_back`.
    DragRejected { id: WidgetId, snap_back: CellRect },
    /// A resize gesture crossed the threshold.
    ResizeStarted { id: WidgetId },
    /// The clamped resize preview changed.
    ResizePreview { span: Span, preview: PxRect },
    /// The resize committed at `span`.
    ResizeCommitted { id: WidgetId, span: Span },
    /// The gesture ended without committing anything.
    Cancelled { reason: CancelReason },
    /// The event changed nothing.
    Noop { reason: NoopReason },
}

/// Why an event produced no state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoopReason {
    /// Only the primary button drives gestures.
    NoButton,
    /// The pressed widget has `draggable: false`.
    NotDraggable,
    /// The pressed handle belongs to a widget with `resizable: false`.
    NotResizable,
    /// Move or release arrived with no gesture in flight.
    NoGesture,
    /// The event names an id the model does not contain.
    UnknownWidget,
    /// A press arrived while another gesture holds the pointer.
    GestureInProgress,
    /// Pointer travel has not reached [`DRAG_THRESHOLD_PX`] yet.
    BelowThreshold,
}

impl NoopReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoButton => "no-button",
            Self::NotDraggable => "not-draggable",
            Self::NotResizable => "not-resizable",
            Self::NoGesture => "no-gesture",
            Self::UnknownWidget => "unknown-widget",
            Self::GestureInProgress => "gesture-in-progress",
            Self::BelowThreshold => "below-threshold",
        }
    }
}

/// One step of the state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureTransition {
    pub from: GestureState,
    pub to: GestureState,
    pub effect: GestureEffect,
}

enum State {
    Idle,
    Armed {
        id: WidgetId,
        press: PxPoint,
        resize: bool,
    },
    Moving {
        id: WidgetId,
        grab_offset: PxPoint,
        candidate: CellPos,
        preview: PxRect,
    },
    Resizing {
        id: WidgetId,
        span: Span,
        preview: PxRect,
    },
}

impl State {
    const fn report(&self) -> GestureState {
        match self {
            Self::Idle => GestureState::Idle,
            Self::Armed { .. } => GestureState::Armed,
            Self::Moving { .. } => GestureState::Moving,
            Self::Resizing { .. } => GestureState::Resizing,
        }
    }
}

/// The pointer gesture state machine.
///
/// One controller per dashboard instance; it holds at most one gesture at a
/// time and borrows the model and resolved geometry per event instead of
/// owning them.
pub struct InteractionController {
    state: State,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    #[must_use]
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Current state, for rendering decisions.
    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state.report()
    }

    /// The floating preview rectangle, if a gesture is past the threshold.
    #[must_use]
    pub fn preview_rect(&self) -> Option<PxRect> {
        match &self.state {
            State::Moving { preview, .. } | State::Resizing { preview, .. } => Some(*preview),
            _ => None,
        }
    }

    /// Abort any gesture in flight without committing.
    pub fn cancel(&mut self, model: &mut GridModel) -> GestureTransition {
        self.cancel_with(model, CancelReason::Programmatic)
    }

    /// Feed one pointer event through the machine.
    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        model: &mut GridModel,
        geometry: &ResolvedGeometry,
    ) -> GestureTransition {
        let transition = match &event.kind {
            PointerEventKind::Down { button, target } => {
                self.on_down(*button, target, event.position, model)
            }
            PointerEventKind::Move => self.on_move(event.position, model, geometry),
            PointerEventKind::Up { button } => self.on_up(*button, model),
            PointerEventKind::Cancel { reason } => self.cancel_with(model, *reason),
        };
        debug!(
            from = ?transition.from,
            to = ?transition.to,
            effect = ?transition.effect,
            "gesture transition"
        );
        transition
    }

    fn on_down(
        &mut self,
        button: PointerButton,
        target: &GestureTarget,
        position: PxPoint,
        model: &GridModel,
    ) -> GestureTransition {
        if !matches!(self.state, State::Idle) {
            return self.noop(NoopReason::GestureInProgress);
        }
        if button != PointerButton::Primary {
            return self.noop(NoopReason::NoButton);
        }
        let id = target.widget_id();
        let Some(widget) = model.widget(id) else {
            return self.noop(NoopReason::UnknownWidget);
        };
        let resize = match target {
            GestureTarget::WidgetBody(_) => {
                if !widget.draggable {
                    return self.noop(NoopReason::NotDraggable);
                }
                false
            }
            GestureTarget::ResizeHandle(_) => {
                if !widget.resizable {
                    return self.noop(NoopReason::NotResizable);
                }
                true
            }
        };
        self.transition(
            State::Armed {
                id: id.clone(),
                press: position,
                resize,
            },
            GestureEffect::Armed {
                id: id.clone(),
                resize,
            },
        )
    }

    fn on_move(
        &mut self,
        position: PxPoint,
        model: &mut GridModel,
        geometry: &ResolvedGeometry,
    ) -> GestureTransition {
        match &self.state {
            State::Idle => self.noop(NoopReason::NoGesture),
            State::Armed { id, press, resize } => {
                let id = id.clone();
                let (press, resize) = (*press, *resize);
                let Some(widget) = model.widget(&id) else {
                    return self.abandon(model, CancelReason::WidgetRemoved);
                };
                let dx = position.x - press.x;
                let dy = position.y - press.y;
                if (dx * dx + dy * dy).sqrt() < DRAG_THRESHOLD_PX {
                    return self.noop(NoopReason::BelowThreshold);
                }
                let rect = widget.rect;
                if resize {
                    let span = resize_candidate(widget, position, model, geometry);
                    let preview = geometry.rect_of(rect.with_span(span));
                    model.notify_resize_start(&id);
                    self.transition(
                        State::Resizing {
                            id: id.clone(),
                            span,
                            preview,
                        },
                        GestureEffect::ResizeStarted { id },
                    )
                } else {
                    let committed = geometry.rect_of(rect);
                    let grab_offset = PxPoint::new(press.x - committed.left, press.y - committed.top);
                    let preview = committed
                        .translated(position.x - press.x, position.y - press.y);
                    let candidate = drop_candidate(preview, rect.span(), geometry, model.config());
                    model.notify_drag_start(&id);
                    self.transition(
                        State::Moving {
                            id: id.clone(),
                            grab_offset,
                            candidate,
                            preview,
                        },
                        GestureEffect::DragStarted { id },
                    )
                }
            }
            State::Moving {
                id, grab_offset, ..
            } => {
                let id = id.clone();
                let grab_offset = *grab_offset;
                let Some(widget) = model.widget(&id) else {
                    return self.abandon(model, CancelReason::WidgetRemoved);
                };
                let span = widget.span();
                let committed = geometry.rect_of(widget.rect);
                let preview = PxRect::new(
                    position.x - grab_offset.x,
                    position.y - grab_offset.y,
                    committed.width,
                    committed.height,
                );
                let candidate = drop_candidate(preview, span, geometry, model.config());
                self.transition(
                    State::Moving {
                        id,
                        grab_offset,
                        candidate,
                        preview,
                    },
                    GestureEffect::DragPreview { preview, candidate },
                )
            }
            State::Resizing { id, .. } => {
                let id = id.clone();
                let Some(widget) = model.widget(&id) else {
                    return self.abandon(model, CancelReason::WidgetRemoved);
                };
                let span = resize_candidate(widget, position, model, geometry);
                let preview = geometry.rect_of(widget.rect.with_span(span));
                self.transition(
                    State::Resizing { id, span, preview },
                    GestureEffect::ResizePreview { span, preview },
                )
            }
        }
    }

    fn on_up(&mut self, button: PointerButton, model: &mut GridModel) -> GestureTransition {
        if button != PointerButton::Primary {
            return match self.state {
                State::Idle => self.noop(NoopReason::NoGesture),
                _ => self.noop(NoopReason::NoButton),
            };
        }
        match &self.state {
            State::Idle => self.noop(NoopReason::NoGesture),
            State::Armed { id, .. } => {
                let id = id.clone();
                model.notify_click(&id);
                self.transition(State::Idle, GestureEffect::Clicked { id })
            }
            State::Moving { id, candidate, .. } => {
                let id = id.clone();
                let candidate = *candidate;
                let Some(widget) = model.widget(&id) else {
                    return self.abandon(model, CancelReason::WidgetRemoved);
                };
                let snap_back = widget.rect;
                let resolution =
                    policy::resolve_drop(&id, candidate, model.widgets(), model.config());
                let effect = match &resolution {
                    DropResolution::Unchanged => GestureEffect::DragCommitted {
                        id: id.clone(),
                        pos: snap_back.pos(),
                    },
                    DropResolution::Committed { .. } => {
                        if model.apply_resolution(&resolution) {
                            GestureEffect::DragCommitted {
                                id: id.clone(),
                                pos: candidate,
                            }
                        } else {
                            GestureEffect::DragRejected {
                                id: id.clone(),
                                snap_back,
                            }
                        }
                    }
                    DropResolution::Rejected(_) => GestureEffect::DragRejected {
                        id: id.clone(),
                        snap_back,
                    },
                };
                model.notify_drag_end(&id);
                self.transition(State::Idle, effect)
            }
            State::Resizing { id, span, .. } => {
                let id = id.clone();
                let span = *span;
                if model.widget(&id).is_none() {
                    return self.abandon(model, CancelReason::WidgetRemoved);
                }
                model.resize_widget(&id, span);
                let committed = model.widget(&id).map_or(span, WidgetPlacement::span);
                model.notify_resize_end(&id);
                self.transition(
                    State::Idle,
                    GestureEffect::ResizeCommitted {
                        id,
                        span: committed,
                    },
                )
            }
        }
    }

    fn cancel_with(&mut self, model: &mut GridModel, reason: CancelReason) -> GestureTransition {
        match &self.state {
            State::Idle => self.noop(NoopReason::NoGesture),
            State::Armed { .. } => {
                self.transition(State::Idle, GestureEffect::Cancelled { reason })
            }
            State::Moving { id, .. } => {
                let id = id.clone();
                model.notify_drag_end(&id);
                self.transition(State::Idle, GestureEffect::Cancelled { reason })
            }
            State::Resizing { id, .. } => {
                let id = id.clone();
                model.notify_resize_end(&id);
                self.transition(State::Idle, GestureEffect::Cancelled { reason })
            }
        }
    }

    /// The gesture's widget disappeared under the pointer.
    fn abandon(&mut self, model: &mut GridModel, reason: CancelReason) -> GestureTransition {
        self.cancel_with(model, reason)
    }

    fn transition(&mut self, next: State, effect: GestureEffect) -> GestureTransition {
        let from = self.state.report();
        let to = next.report();
        self.state = next;
        GestureTransition { from, to, effect }
    }

    fn noop(&self, reason: NoopReason) -> GestureTransition {
        let state = self.state.report();
        GestureTransition {
            from: state,
            to: state,
            effect: GestureEffect::Noop { reason },
        }
    }
}

/// Snap candidate for a floating move preview.
///
/// Probes half a cell in from the preview's top-left corner, so the widget
/// snaps to the cell its leading corner region covers most, then clamps the
/// column and row so the whole span stays on the grid.
fn drop_candidate(
    preview: PxRect,
    span: Span,
    geometry: &ResolvedGeometry,
    config: &GridConfig,
) -> CellPos {
    let row_guess = geometry.row_at(preview.top);
    let (half_w, half_h) = geometry.half_cell(row_guess);
    let cell = geometry.cell_at(PxPoint::new(preview.left + half_w, preview.top + half_h));
    CellPos::new(
        cell.col.min(config.columns.saturating_sub(span.dx)),
        cell.row.min(config.rows.saturating_sub(span.dy)),
    )
}

/// Clamped span candidate for a resize preview: the span that stretches the
/// widget's top-left cell to the cell under the pointer.
fn resize_candidate(
    placement: &WidgetPlacement,
    pointer: PxPoint,
    model: &GridModel,
    geometry: &ResolvedGeometry,
) -> Span {
    let cell = geometry.cell_at(pointer);
    let raw = Span::new(
        cell.col.saturating_sub(placement.rect.col) + 1,
        cell.row.saturating_sub(placement.rect.row) + 1,
    );
    policy::clamp_resize(placement, raw, model.widgets(), model.config())
}
