#![forbid(unsafe_code)]

//! Gridboard public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for embedders. It
//! re-exports the common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! # Quick start
//!
//! ```
//! use gridboard::prelude::*;
//!
//! let config = GridConfig::new(4, 3)?;
//! let mut dash = Dashboard::new(config)?;
//! dash.add_widget(WidgetSpec::new("chart").span(2, 1));
//! dash.add_widget(WidgetSpec::new("table").at(2, 0));
//!
//! dash.set_container_size(PxSize::new(1280.0, 720.0));
//! dash.run_frame();
//! for (id, rect) in dash.rects() {
//!     println!("{id}: {rect:?}");
//! }
//! # Ok::<(), gridboard::core::config::GridConfigError>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use gridboard_core::config::{GridConfig, GridConfigError, MIN_CELL_EXTENT};
pub use gridboard_core::event::{
    CancelReason, GestureTarget, Modifiers, PointerButton, PointerEvent, PointerEventKind,
};
pub use gridboard_core::geometry::{
    CellPos, CellRect, PxPoint, PxRect, PxSize, Sides, Span,
};
pub use gridboard_core::id::WidgetId;

// --- Engine re-exports -----------------------------------------------------

pub use gridboard_engine::{
    CoalescerStats, DRAG_THRESHOLD_PX, Dashboard, DropPolicy, DropRejection, DropResolution,
    FrameCoalescer, GestureEffect, GestureState, GestureTransition, GridModel, GridObserver,
    InteractionController, LayoutSnapshot, NoopReason, NullGridObserver, ResolvedGeometry,
    SnapshotEntry, WidgetContent, WidgetPlacement, WidgetSpec,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CancelReason, CellPos, CellRect, Dashboard, GestureEffect, GestureState, GridConfig,
        GridModel, GridObserver, LayoutSnapshot, PointerEvent, PxPoint, PxRect, PxSize, Span,
        WidgetId, WidgetSpec,
    };

    pub use crate::{core, engine};
}

pub use gridboard_core as core;
pub use gridboard_engine as engine;
