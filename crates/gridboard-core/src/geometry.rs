#![forbid(unsafe_code)]

//! Geometric primitives in two coordinate spaces.
//!
//! The engine works on a coarse cell grid (`u16` columns/rows) and maps it
//! onto continuous pixel geometry (`f32`). Cell rectangles are half-open:
//! `[col, col+dx) × [row, row+dy)`, so adjacent widgets share an edge
//! without overlapping.

/// A grid cell position (column, row), 0-indexed, origin at top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellPos {
    /// Column index.
    pub col: u16,
    /// Row index.
    pub row: u16,
}

impl CellPos {
    /// Create a new cell position.
    #[inline]
    pub const fn new(col: u16, row: u16) -> Self {
        Self { col, row }
    }
}

/// A cell-count extent (column span, row span).
///
/// Committed placements always have both components ≥ 1; a zero component
/// only appears in transient candidate math and makes the rectangle empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Width in columns.
    pub dx: u16,
    /// Height in rows.
    pub dy: u16,
}

impl Span {
    /// A 1×1 span.
    pub const UNIT: Self = Self { dx: 1, dy: 1 };

    /// Create a new span.
    #[inline]
    pub const fn new(dx: u16, dy: u16) -> Self {
        Self { dx, dy }
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.dx as u32 * self.dy as u32
    }

    /// True for a 1×1 span.
    #[inline]
    pub const fn is_unit(&self) -> bool {
        self.dx == 1 && self.dy == 1
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::UNIT
    }
}

/// A widget's rectangle in cell space.
///
/// Half-open on both axes: left/top inclusive, right/bottom exclusive. All
/// arithmetic saturates so extreme values cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellRect {
    /// Left column (inclusive).
    pub col: u16,
    /// Top row (inclusive).
    pub row: u16,
    /// Width in columns.
    pub dx: u16,
    /// Height in rows.
    pub dy: u16,
}

impl CellRect {
    /// Create a new cell rectangle.
    #[inline]
    pub const fn new(col: u16, row: u16, dx: u16, dy: u16) -> Self {
        Self { col, row, dx, dy }
    }

    /// Assemble a rectangle from a position and a span.
    #[inline]
    pub const fn from_pos_span(pos: CellPos, span: Span) -> Self {
        Self::new(pos.col, pos.row, span.dx, span.dy)
    }

    /// Top-left cell.
    #[inline]
    pub const fn pos(&self) -> CellPos {
        CellPos::new(self.col, self.row)
    }

    /// Cell-count extent.
    #[inline]
    pub const fn span(&self) -> Span {
        Span::new(self.dx, self.dy)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.col.saturating_add(self.dx)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.row.saturating_add(self.dy)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.dx as u32 * self.dy as u32
    }

    /// Check if the rectangle covers zero cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.dx == 0 || self.dy == 0
    }

    /// Check if a cell lies inside the rectangle.
    #[inline]
    pub const fn contains_cell(&self, cell: CellPos) -> bool {
        cell.col >= self.col
            && cell.col < self.right()
            && cell.row >= self.row
            && cell.row < self.bottom()
    }

    /// Check whether two rectangles share at least one cell.
    ///
    /// Empty rectangles intersect nothing, not even themselves.
    #[inline]
    pub const fn intersects(&self, other: &CellRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.col < other.right()
            && other.col < self.right()
            && self.row < other.bottom()
            && other.row < self.bottom()
    }

    /// The same rectangle at a different top-left cell.
    #[inline]
    pub const fn with_pos(&self, pos: CellPos) -> Self {
        Self::new(pos.col, pos.row, self.dx, self.dy)
    }

    /// The same rectangle with a different span.
    #[inline]
    pub const fn with_span(&self, span: Span) -> Self {
        Self::new(self.col, self.row, span.dx, span.dy)
    }
}

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PxPoint {
    pub x: f32,
    pub y: f32,
}

impl PxPoint {
    /// Create a new pixel point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise offset.
    #[inline]
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A size in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PxSize {
    pub width: f32,
    pub height: f32,
}

impl PxSize {
    /// Create a new pixel size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A pixel rectangle handed to the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PxRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl PxRect {
    /// Create a new pixel rectangle.
    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Check if a point is inside the rectangle (right/bottom exclusive).
    #[inline]
    pub fn contains(&self, p: PxPoint) -> bool {
        p.x >= self.left && p.x < self.right() && p.y >= self.top && p.y < self.bottom()
    }

    /// The same rectangle translated by a pixel delta.
    #[inline]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.width, self.height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> PxPoint {
        PxPoint::new(self.left, self.top)
    }
}

/// Sides for padding, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sides {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Sides {
    /// Create new sides with equal values.
    pub const fn all(val: f32) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new sides with horizontal values only.
    pub const fn horizontal(val: f32) -> Self {
        Self {
            top: 0.0,
            right: val,
            bottom: 0.0,
            left: val,
        }
    }

    /// Create new sides with vertical values only.
    pub const fn vertical(val: f32) -> Self {
        Self {
            top: val,
            right: 0.0,
            bottom: val,
            left: 0.0,
        }
    }

    /// Create new sides with specific values.
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub fn horizontal_sum(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical_sum(&self) -> f32 {
        self.top + self.bottom
    }
}

impl From<f32> for Sides {
    fn from(val: f32) -> Self {
        Self::all(val)
    }
}

impl From<(f32, f32)> for Sides {
    fn from((vertical, horizontal): (f32, f32)) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

impl From<(f32, f32, f32, f32)> for Sides {
    fn from((top, right, bottom, left): (f32, f32, f32, f32)) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}
