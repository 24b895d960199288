#![forbid(unsafe_code)]

//! Per-instance façade wiring the model, controller, resolver and coalescer.
//!
//! A [`Dashboard`] is the unit an embedding host creates per grid container.
//! It owns the pieces and keeps the resolved geometry consistent: every
//! committed mutation triggers exactly one relayout, previews trigger none,
//! and container resizes relayout at most once per [`Dashboard::run_frame`]
//! tick.

use crate::controller::{GestureEffect, GestureTransition, InteractionController};
use crate::frame_coalescer::{CoalescerStats, FrameCoalescer};
use crate::model::{GridModel, GridObserver};
use crate::placement::WidgetSpec;
use crate::resolver::ResolvedGeometry;
use crate::snapshot::LayoutSnapshot;
use gridboard_core::config::{GridConfig, GridConfigError};
use gridboard_core::event::PointerEvent;
use gridboard_core::geometry::{CellPos, PxRect, PxSize, Span};
use gridboard_core::id::WidgetId;
use tracing::debug;

/// One dashboard instance: model, gesture controller, resolved geometry and
/// resize coalescing behind a single API.
pub struct Dashboard {
    model: GridModel,
    controller: InteractionController,
    coalescer: FrameCoalescer,
    geometry: ResolvedGeometry,
    container: PxSize,
}

impl Dashboard {
    /// Create a dashboard over the given configuration.
    ///
    /// This is the loud validation point: a malformed configuration fails
    /// here, so every later operation can reject silently instead.
    pub fn new(config: GridConfig) -> Result<Self, GridConfigError> {
        config.validate()?;
        let model = GridModel::new(config);
        let container = PxSize::default();
        let geometry = ResolvedGeometry::resolve(model.config(), model.widgets(), container);
        Ok(Self {
            model,
            controller: InteractionController::new(),
            coalescer: FrameCoalescer::new(),
            geometry,
            container,
        })
    }

    /// Read access to the grid model.
    #[must_use]
    pub fn model(&self) -> &GridModel {
        &self.model
    }

    /// The most recently resolved pixel geometry.
    #[must_use]
    pub fn resolved(&self) -> &ResolvedGeometry {
        &self.geometry
    }

    /// Register a model observer.
    pub fn subscribe(&mut self, observer: Box<dyn GridObserver>) {
        self.model.subscribe(observer);
    }

    /// Add a widget; relayouts on success.
    pub fn add_widget(&mut self, spec: WidgetSpec) -> bool {
        let added = self.model.add_widget(spec);
        if added {
            self.relayout();
        }
        added
    }

    /// Remove a widget; relayouts on success.
    ///
    /// A gesture holding the removed widget cancels on its next pointer
    /// event with [`CancelReason::WidgetRemoved`](gridboard_core::event::CancelReason).
    pub fn remove_widget(&mut self, id: &WidgetId) -> bool {
        let removed = self.model.remove_widget(id);
        if removed {
            self.relayout();
        }
        removed
    }

    /// Move a widget to an explicit legal position; relayouts on success.
    pub fn move_widget(&mut self, id: &WidgetId, to: CellPos) -> bool {
        let moved = self.model.move_widget(id, to);
        if moved {
            self.relayout();
        }
        moved
    }

    /// Resize a widget, clamping the span; relayouts on success.
    pub fn resize_widget(&mut self, id: &WidgetId, span: Span) -> bool {
        let resized = self.model.resize_widget(id, span);
        if resized {
            self.relayout();
        }
        resized
    }

    /// Capture the current layout.
    #[must_use]
    pub fn serialize(&self) -> LayoutSnapshot {
        self.model.serialize()
    }

    /// Restore a captured layout; relayouts on success.
    pub fn restore(&mut self, snapshot: &LayoutSnapshot) -> bool {
        let restored = self.model.restore(snapshot);
        if restored {
            self.relayout();
        }
        restored
    }

    /// Feed one pointer event through the gesture machine.
    ///
    /// Commits relayout immediately; previews do not touch geometry, so the
    /// host can render the floating preview from [`Dashboard::preview_rect`]
    /// against stable cell rectangles.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> GestureTransition {
        let transition = self
            .controller
            .handle_event(event, &mut self.model, &self.geometry);
        if matches!(
            transition.effect,
            GestureEffect::DragCommitted { .. } | GestureEffect::ResizeCommitted { .. }
        ) {
            self.relayout();
        }
        transition
    }

    /// Abort any gesture in flight.
    pub fn cancel_gesture(&mut self) -> GestureTransition {
        self.controller.cancel(&mut self.model)
    }

    /// The floating preview rectangle, when a gesture is past the threshold.
    #[must_use]
    pub fn preview_rect(&self) -> Option<PxRect> {
        self.controller.preview_rect()
    }

    /// Record an observed container size.
    ///
    /// Bursts coalesce; geometry changes on the next [`Dashboard::run_frame`]
    /// call, not here.
    pub fn set_container_size(&mut self, size: PxSize) {
        self.coalescer.observe(size);
    }

    /// Frame tick: apply at most one pending container size.
    ///
    /// Returns `true` when a relayout happened.
    pub fn run_frame(&mut self) -> bool {
        let Some(size) = self.coalescer.poll_frame() else {
            return false;
        };
        self.container = size;
        self.relayout();
        debug!(width = size.width, height = size.height, "container resized");
        true
    }

    /// Recompute pixel geometry from the current model and container size.
    pub fn relayout(&mut self) {
        self.geometry =
            ResolvedGeometry::resolve(self.model.config(), self.model.widgets(), self.container);
    }

    /// Pixel rectangles for every committed widget, in model order.
    #[must_use]
    pub fn rects(&self) -> Vec<(WidgetId, PxRect)> {
        self.model
            .widgets()
            .iter()
            .map(|p| (p.id.clone(), self.geometry.rect_of(p.rect)))
            .collect()
    }

    /// Coalescer counters, for diagnostics.
    #[must_use]
    pub fn coalescer_stats(&self) -> CoalescerStats {
        self.coalescer.stats()
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("model", &self.model)
            .field("container", &self.container)
            .finish_non_exhaustive()
    }
}
