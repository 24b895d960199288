#![forbid(unsafe_code)]

//! Serializable layout snapshots.
//!
//! A snapshot captures geometry only: ids and cell rectangles. Interaction
//! flags and content payloads are configuration, not layout state, so
//! [`GridModel::restore`](crate::model::GridModel::restore) patches positions
//! onto the live model by id instead of rebuilding widgets from scratch.

use gridboard_core::geometry::CellRect;
use serde::{Deserialize, Serialize};

/// One widget's geometry in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub id: String,
    pub col: u16,
    pub row: u16,
    pub dx: u16,
    pub dy: u16,
}

impl SnapshotEntry {
    /// The cell rectangle this entry describes.
    #[must_use]
    pub const fn rect(&self) -> CellRect {
        CellRect::new(self.col, self.row, self.dx, self.dy)
    }
}

/// A full layout capture, ordered by id for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub entries: Vec<SnapshotEntry>,
}

impl LayoutSnapshot {
    /// Number of captured widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SnapshotEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}
