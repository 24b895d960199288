#![forbid(unsafe_code)]

//! Pure cell→pixel geometry resolution.
//!
//! `ResolvedGeometry` is derived state: it is recomputed from
//! `(config, placements, container size)` whenever any of the three change,
//! and carries no hidden state of its own. Rows without a fixed height split
//! the remaining container height evenly ("flex" rows); a row occupied by
//! any placement with a `height` override is fixed at the largest such
//! override and leaves the flex pool.
//!
//! Computed column widths and row heights never drop below
//! [`MIN_CELL_EXTENT`], so a transiently collapsed container cannot produce
//! degenerate zero or negative cells.

use crate::placement::WidgetPlacement;
use gridboard_core::config::{GridConfig, MIN_CELL_EXTENT};
use gridboard_core::geometry::{CellPos, CellRect, PxPoint, PxRect, PxSize, Sides};

/// Pixel geometry resolved for one `(config, placements, container)` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGeometry {
    /// Measured container size this geometry was resolved for.
    pub container: PxSize,
    /// Width of every column.
    pub column_width: f32,
    /// Height of each row, `rows` entries.
    pub row_heights: Vec<f32>,
    /// Top edge of each row, `rows` entries, cumulative.
    pub row_offsets: Vec<f32>,
    columns: u16,
    margin: f32,
    padding: Sides,
}

impl ResolvedGeometry {
    /// Resolve pixel geometry for the given configuration, placements and
    /// measured container size.
    #[must_use]
    pub fn resolve(config: &GridConfig, placements: &[WidgetPlacement], container: PxSize) -> Self {
        let column_width = Self::column_width(config, container.width);
        let row_heights = Self::row_heights(config, placements, container.height);

        let mut row_offsets = Vec::with_capacity(row_heights.len());
        let mut top = config.padding.top;
        for height in &row_heights {
            row_offsets.push(top);
            top += height + config.cell_margin;
        }

        Self {
            container,
            column_width,
            row_heights,
            row_offsets,
            columns: config.columns,
            margin: config.cell_margin,
            padding: config.padding,
        }
    }

    /// Resolved column width: the fixed `cell_width` if configured, else an
    /// even split of the container width after padding and margins, floored
    /// at [`MIN_CELL_EXTENT`].
    #[must_use]
    pub fn column_width(config: &GridConfig, container_width: f32) -> f32 {
        if let Some(width) = config.cell_width {
            return width;
        }
        let columns = f32::from(config.columns);
        let usable = container_width
            - config.padding.horizontal_sum()
            - config.cell_margin * (columns - 1.0);
        (usable / columns).max(MIN_CELL_EXTENT)
    }

    /// Resolved per-row heights.
    ///
    /// Rows with a placement `height` override are fixed (largest override
    /// wins); the rest take the configured `cell_height` if any, else an
    /// even split of the remaining container height, floored at
    /// [`MIN_CELL_EXTENT`].
    #[must_use]
    pub fn row_heights(
        config: &GridConfig,
        placements: &[WidgetPlacement],
        container_height: f32,
    ) -> Vec<f32> {
        let rows = usize::from(config.rows);
        let mut fixed: Vec<Option<f32>> = vec![None; rows];
        for placement in placements {
            let Some(height) = placement.height else {
                continue;
            };
            for row in placement.rect.row..placement.rect.bottom().min(config.rows) {
                let slot = &mut fixed[usize::from(row)];
                *slot = Some(slot.map_or(height, |h| h.max(height)));
            }
        }

        if let Some(cell_height) = config.cell_height {
            return fixed.iter().map(|f| f.unwrap_or(cell_height)).collect();
        }

        let fixed_total: f32 = fixed.iter().flatten().sum();
        let flex_count = fixed.iter().filter(|f| f.is_none()).count();
        let flex_height = if flex_count == 0 {
            MIN_CELL_EXTENT
        } else {
            let usable = container_height
                - config.padding.vertical_sum()
                - config.cell_margin * (f32::from(config.rows) - 1.0)
                - fixed_total;
            (usable / flex_count as f32).max(MIN_CELL_EXTENT)
        };
        fixed.iter().map(|f| f.unwrap_or(flex_height)).collect()
    }

    /// Pixel rectangle of a cell rectangle.
    ///
    /// Spanning widgets absorb the margins between the cells they cover.
    #[must_use]
    pub fn rect_of(&self, rect: CellRect) -> PxRect {
        let left = self.padding.left + f32::from(rect.col) * (self.column_width + self.margin);
        let width = f32::from(rect.dx) * self.column_width
            + f32::from(rect.dx.saturating_sub(1)) * self.margin;

        let top_row = usize::from(rect.row).min(self.row_heights.len().saturating_sub(1));
        let top = self.row_offsets.get(top_row).copied().unwrap_or(0.0);
        let mut height = 0.0;
        for row in rect.row..rect.bottom() {
            let Some(h) = self.row_heights.get(usize::from(row)) else {
                break;
            };
            height += h;
        }
        height += f32::from(rect.dy.saturating_sub(1)) * self.margin;

        PxRect::new(left, top, width, height)
    }

    /// The grid cell containing a pixel point, clamped to
    /// `[0, columns−1] × [0, rows−1]`.
    #[must_use]
    pub fn cell_at(&self, point: PxPoint) -> CellPos {
        CellPos::new(self.col_at(point.x), self.row_at(point.y))
    }

    /// Column containing an x coordinate, clamped.
    #[must_use]
    pub fn col_at(&self, x: f32) -> u16 {
        let step = self.column_width + self.margin;
        let raw = ((x - self.padding.left) / step).floor();
        clamp_index(raw, self.columns)
    }

    /// Row containing a y coordinate, clamped.
    ///
    /// Rows can have uneven heights, so this walks the cumulative offsets
    /// rather than dividing.
    #[must_use]
    pub fn row_at(&self, y: f32) -> u16 {
        let rows = self.row_heights.len();
        for row in (0..rows).rev() {
            if y >= self.row_offsets[row] {
                return row as u16;
            }
        }
        0
    }

    /// Half a cell extent at the given row, used to probe the cell under a
    /// rectangle's leading corner region.
    #[must_use]
    pub fn half_cell(&self, row: u16) -> (f32, f32) {
        let row_height = self
            .row_heights
            .get(usize::from(row))
            .copied()
            .unwrap_or(MIN_CELL_EXTENT);
        (self.column_width * 0.5, row_height * 0.5)
    }
}

fn clamp_index(raw: f32, count: u16) -> u16 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    let max = count.saturating_sub(1);
    if raw >= f32::from(max) {
        max
    } else {
        raw as u16
    }
}
