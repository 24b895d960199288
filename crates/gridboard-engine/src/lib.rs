#![forbid(unsafe_code)]

//! Grid-based widget layout and interaction engine.
//!
//! This crate implements the dashboard grid behind gridboard:
//!
//! - [`resolver`] - pure cell→pixel geometry resolution
//! - [`policy`] - collision checks, auto-placement, and the shift/swap drop
//!   policies
//! - [`model`] - the grid model and its imperative API
//! - [`controller`] - the pointer gesture state machine (drag to move, drag
//!   to resize)
//! - [`frame_coalescer`] - resize-observer coalescing (one relayout per
//!   animation frame)
//! - [`dashboard`] - per-instance façade tying the pieces together
//!
//! # Concurrency
//!
//! The engine is single-threaded and event-driven. All mutation happens
//! synchronously inside the caller's event handlers; the only deferred work
//! is the coalesced relayout, and even that runs on the caller's frame tick.

pub mod controller;
pub mod dashboard;
pub mod frame_coalescer;
pub mod model;
pub mod placement;
pub mod policy;
pub mod resolver;
pub mod snapshot;

pub use controller::{
    DRAG_THRESHOLD_PX, GestureEffect, GestureState, GestureTransition, InteractionController,
    NoopReason,
};
pub use dashboard::Dashboard;
pub use frame_coalescer::{CoalescerStats, FrameCoalescer};
pub use model::{GridModel, GridObserver, NullGridObserver};
pub use placement::{WidgetContent, WidgetPlacement, WidgetSpec};
pub use policy::{
    DropPolicy, DropRejection, DropResolution, clamp_resize, find_first_free_cell, is_legal,
    resolve_drop, select_drop_policy,
};
pub use resolver::ResolvedGeometry;
pub use snapshot::{LayoutSnapshot, SnapshotEntry};
