#![forbid(unsafe_code)]

//! Per-layout grid configuration.
//!
//! `GridConfig` is immutable for the lifetime of a layout. Invalid
//! configurations are programmer errors, so construction is the one place in
//! the engine that fails loudly; every runtime-invalid placement afterwards
//! is a silent rejection handled as a state transition.

use crate::geometry::{CellRect, Sides};
use std::fmt;

/// Floor for computed column widths and row heights, in pixels.
///
/// Prevents degenerate zero or negative cell sizes while the container is
/// transiently collapsed (e.g. mid window-resize).
pub const MIN_CELL_EXTENT: f32 = 50.0;

/// Immutable per-layout grid configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Number of columns, ≥ 1.
    pub columns: u16,
    /// Number of rows, ≥ 1.
    pub rows: u16,
    /// Fixed column width in pixels; `None` means computed from the
    /// container width.
    pub cell_width: Option<f32>,
    /// Fixed row height in pixels; `None` means flex rows split the
    /// remaining container height.
    pub cell_height: Option<f32>,
    /// Gap between adjacent cells, in pixels.
    pub cell_margin: f32,
    /// Padding between the container edge and the grid.
    pub padding: Sides,
}

impl GridConfig {
    /// Create a configuration with computed cell sizes, no margin and no
    /// padding.
    ///
    /// Zero columns or rows is a contract violation and fails here rather
    /// than surfacing later as a runtime rejection.
    pub fn new(columns: u16, rows: u16) -> Result<Self, GridConfigError> {
        if columns == 0 {
            return Err(GridConfigError::ZeroColumns);
        }
        if rows == 0 {
            return Err(GridConfigError::ZeroRows);
        }
        Ok(Self {
            columns,
            rows,
            cell_width: None,
            cell_height: None,
            cell_margin: 0.0,
            padding: Sides::default(),
        })
    }

    /// Use a fixed column width instead of computing one from the container.
    #[must_use]
    pub fn with_cell_width(mut self, width: f32) -> Self {
        self.cell_width = Some(width);
        self
    }

    /// Use a fixed row height for every row without a placement override.
    #[must_use]
    pub fn with_cell_height(mut self, height: f32) -> Self {
        self.cell_height = Some(height);
        self
    }

    /// Set the gap between adjacent cells.
    #[must_use]
    pub fn with_cell_margin(mut self, margin: f32) -> Self {
        self.cell_margin = margin;
        self
    }

    /// Set the padding between the container edge and the grid.
    #[must_use]
    pub fn with_padding(mut self, padding: impl Into<Sides>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Validate the pixel dimensions picked up by the builder methods.
    ///
    /// Called by the dashboard at mount; separate from [`GridConfig::new`]
    /// so builders stay infallible.
    pub fn validate(&self) -> Result<(), GridConfigError> {
        if self.columns == 0 {
            return Err(GridConfigError::ZeroColumns);
        }
        if self.rows == 0 {
            return Err(GridConfigError::ZeroRows);
        }
        let dims = [
            ("cell_width", self.cell_width.unwrap_or(0.0)),
            ("cell_height", self.cell_height.unwrap_or(0.0)),
            ("cell_margin", self.cell_margin),
            ("padding.top", self.padding.top),
            ("padding.right", self.padding.right),
            ("padding.bottom", self.padding.bottom),
            ("padding.left", self.padding.left),
        ];
        for (field, value) in dims {
            if !value.is_finite() {
                return Err(GridConfigError::NonFiniteDimension { field, value });
            }
            if value < 0.0 {
                return Err(GridConfigError::NegativeDimension { field, value });
            }
        }
        Ok(())
    }

    /// Check that a cell rectangle lies fully inside the grid.
    #[inline]
    pub fn in_bounds(&self, rect: CellRect) -> bool {
        !rect.is_empty() && rect.right() <= self.columns && rect.bottom() <= self.rows
    }

    /// Total number of cells.
    #[inline]
    pub const fn cell_count(&self) -> u32 {
        self.columns as u32 * self.rows as u32
    }
}

/// Contract violations detected at configuration time.
#[derive(Debug, Clone, PartialEq)]
pub enum GridConfigError {
    ZeroColumns,
    ZeroRows,
    NonFiniteDimension { field: &'static str, value: f32 },
    NegativeDimension { field: &'static str, value: f32 },
}

impl fmt::Display for GridConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroColumns => write!(f, "grid must have at least one column"),
            Self::ZeroRows => write!(f, "grid must have at least one row"),
            Self::NonFiniteDimension { field, value } => {
                write!(f, "grid dimension {field} must be finite (got {value})")
            }
            Self::NegativeDimension { field, value } => {
                write!(f, "grid dimension {field} must be non-negative (got {value})")
            }
        }
    }
}

impl std::error::Error for GridConfigError {}
