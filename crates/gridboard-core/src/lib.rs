#![forbid(unsafe_code)]

//! Foundation types for the gridboard layout engine.
//!
//! This crate defines the primitives shared by the engine and by embedding
//! hosts:
//!
//! - [`geometry`] - cell-space and pixel-space rectangles
//! - [`config`] - per-layout grid configuration with loud construction-time
//!   validation
//! - [`event`] - canonical pointer/touch events delivered by the host
//! - [`id`] - widget identity
//! - [`logging`] - tracing macro shims (feature-gated)
//!
//! Everything here is renderer-agnostic: the engine consumes pointer events
//! and produces pixel rectangles, and never touches an input device or a
//! paint surface itself.

pub mod config;
pub mod event;
pub mod geometry;
pub mod id;
pub mod logging;

pub use config::{GridConfig, GridConfigError, MIN_CELL_EXTENT};
pub use event::{
    CancelReason, GestureTarget, Modifiers, PointerButton, PointerEvent, PointerEventKind,
};
pub use geometry::{CellPos, CellRect, PxPoint, PxRect, PxSize, Sides, Span};
pub use id::WidgetId;
