#![forbid(unsafe_code)]

//! Collision checks, auto-placement and drop resolution.
//!
//! All functions here are pure: they read placements and produce decisions,
//! and the grid model applies the decisions. Overlap checking is an O(n)
//! scan per candidate — dashboards hold tens of widgets, not thousands.
//!
//! # Drop policies
//!
//! A drop that lands on occupied cells is reconciled by one of two named
//! policies, selected once per drop by a pure predicate over the grid shape:
//!
//! - **Shift** — effectively one-dimensional grids (a single column or a
//!   single row) where every placement is unit-span behave like a
//!   reorderable list: the widgets between the old and the target position
//!   slide one step against the direction of travel.
//! - **Swap** — general 2D grids exchange positions with the single
//!   occupant of the target rectangle. Spans are never exchanged, and a
//!   target covered by zero or several occupants rejects the drop outright
//!   (partial swaps of differently-sized widgets have no sane semantics).

use crate::placement::WidgetPlacement;
use gridboard_core::config::GridConfig;
use gridboard_core::geometry::{CellPos, CellRect, Span};
use gridboard_core::id::WidgetId;

/// Check that a candidate rectangle is in bounds and overlaps none of the
/// given rectangles.
///
/// Callers exclude the candidate's own placement from `others`.
pub fn is_legal<'a, I>(candidate: CellRect, others: I, config: &GridConfig) -> bool
where
    I: IntoIterator<Item = &'a CellRect>,
{
    config.in_bounds(candidate) && !others.into_iter().any(|r| candidate.intersects(r))
}

/// Find the first cell, scanning row-major, where a widget of the given span
/// fits without overlap.
///
/// Returns `None` when the grid is full for that span; the caller decides
/// whether that is a silent no-op (auto-placement) or something louder.
#[must_use]
pub fn find_first_free_cell(
    placements: &[WidgetPlacement],
    span: Span,
    config: &GridConfig,
) -> Option<CellPos> {
    if span.dx == 0 || span.dy == 0 || span.dx > config.columns || span.dy > config.rows {
        return None;
    }
    for row in 0..=(config.rows - span.dy) {
        for col in 0..=(config.columns - span.dx) {
            let candidate = CellRect::new(col, row, span.dx, span.dy);
            if is_legal(candidate, placements.iter().map(|p| &p.rect), config) {
                return Some(CellPos::new(col, row));
            }
        }
    }
    None
}

/// How an occupied drop target is reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPolicy {
    /// Reorderable-list sliding along the single axis.
    Shift,
    /// Exchange positions with the single occupant.
    Swap,
}

/// Select the drop policy for the current grid shape.
///
/// Shift applies only to effectively one-dimensional grids in which every
/// placement is unit-span; anything else swaps.
#[must_use]
pub fn select_drop_policy(config: &GridConfig, placements: &[WidgetPlacement]) -> DropPolicy {
    let one_dimensional = config.columns == 1 || config.rows == 1;
    if one_dimensional && placements.iter().all(|p| p.span().is_unit()) {
        DropPolicy::Shift
    } else {
        DropPolicy::Swap
    }
}

/// Outcome of resolving a drop.
///
/// `Committed` carries every position change of the drop as one atomic
/// batch; the model applies all of them or none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropResolution {
    /// The target equals the current position; nothing to do.
    Unchanged,
    /// The drop is legal; apply these moves atomically.
    Committed {
        /// `(widget, new top-left)` pairs, dragged widget included.
        moves: Vec<(WidgetId, CellPos)>,
    },
    /// The drop cannot be applied; the dragged widget snaps back.
    Rejected(DropRejection),
}

impl DropResolution {
    /// True unless the drop was rejected.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// Why a drop was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejection {
    /// The dragged id is not in the model.
    UnknownWidget,
    /// The candidate rectangle does not fit the grid.
    OutOfBounds,
    /// Swap policy: several occupants overlap the target rectangle.
    MultipleOccupants,
    /// Swap policy: exchanging positions would leave residual overlap or an
    /// out-of-bounds rectangle (spans differ too much).
    SwapCollision,
}

/// Resolve a drop of `dragged` onto `target`.
///
/// The decision tree, in order: legal placements commit as-is; a drop on the
/// widget's own position is a no-op; otherwise the shape-selected policy
/// (shift or swap) reconciles the conflict or rejects.
#[must_use]
pub fn resolve_drop(
    dragged: &WidgetId,
    target: CellPos,
    placements: &[WidgetPlacement],
    config: &GridConfig,
) -> DropResolution {
    let Some(widget) = placements.iter().find(|p| &p.id == dragged) else {
        return DropResolution::Rejected(DropRejection::UnknownWidget);
    };
    let candidate = widget.rect.with_pos(target);

    if candidate == widget.rect {
        return DropResolution::Unchanged;
    }

    let others: Vec<&WidgetPlacement> = placements.iter().filter(|p| &p.id != dragged).collect();
    if is_legal(candidate, others.iter().map(|p| &p.rect), config) {
        return DropResolution::Committed {
            moves: vec![(dragged.clone(), target)],
        };
    }
    if !config.in_bounds(candidate) {
        return DropResolution::Rejected(DropRejection::OutOfBounds);
    }

    match select_drop_policy(config, placements) {
        DropPolicy::Shift => resolve_shift(widget, target, &others, config),
        DropPolicy::Swap => resolve_swap(widget, candidate, &others, config),
    }
}

/// Reorderable-list semantics for 1-D grids: every placement strictly
/// between the old and the target position slides one step against the
/// direction of travel, and the dragged widget lands on the target.
fn resolve_shift(
    widget: &WidgetPlacement,
    target: CellPos,
    others: &[&WidgetPlacement],
    config: &GridConfig,
) -> DropResolution {
    // Shift only runs on single-column or single-row grids; pick the axis
    // with room to move.
    let along_rows = config.columns == 1;
    let coord = |pos: CellPos| if along_rows { pos.row } else { pos.col };
    let with_coord = |pos: CellPos, c: u16| {
        if along_rows {
            CellPos::new(pos.col, c)
        } else {
            CellPos::new(c, pos.row)
        }
    };

    let old = coord(widget.pos());
    let new = coord(target);
    let mut moves = Vec::new();
    for other in others {
        let c = coord(other.pos());
        let shifted = if new > old && c > old && c <= new {
            Some(c - 1)
        } else if new < old && c >= new && c < old {
            Some(c + 1)
        } else {
            None
        };
        if let Some(shifted) = shifted {
            moves.push((other.id.clone(), with_coord(other.pos(), shifted)));
        }
    }
    moves.push((widget.id.clone(), target));
    DropResolution::Committed { moves }
}

/// Swap semantics for 2-D grids: exchange `(col,row)` with the single
/// occupant of the candidate rectangle, then re-validate the pair.
fn resolve_swap(
    widget: &WidgetPlacement,
    candidate: CellRect,
    others: &[&WidgetPlacement],
    config: &GridConfig,
) -> DropResolution {
    let occupants: Vec<&&WidgetPlacement> = others
        .iter()
        .filter(|p| candidate.intersects(&p.rect))
        .collect();
    let [occupant] = occupants.as_slice() else {
        // Zero occupants cannot reach here (the candidate would have been
        // legal); several occupants always reject.
        return DropResolution::Rejected(DropRejection::MultipleOccupants);
    };

    // Positions swap, spans do not. With differing spans the exchange can
    // leave residual overlap; re-validate instead of committing a broken
    // board.
    let new_dragged = widget.rect.with_pos(occupant.pos());
    let new_occupant = occupant.rect.with_pos(widget.pos());
    let bystanders: Vec<&CellRect> = others
        .iter()
        .filter(|p| p.id != occupant.id)
        .map(|p| &p.rect)
        .collect();

    let dragged_ok = !new_dragged.intersects(&new_occupant)
        && is_legal(new_dragged, bystanders.iter().copied(), config);
    let occupant_ok = is_legal(new_occupant, bystanders.iter().copied(), config);
    if !dragged_ok || !occupant_ok {
        return DropResolution::Rejected(DropRejection::SwapCollision);
    }

    DropResolution::Committed {
        moves: vec![
            (widget.id.clone(), occupant.pos()),
            (occupant.id.clone(), widget.pos()),
        ],
    }
}

/// Clamp a resize candidate span.
///
/// Resizing never rejects: the returned span is the candidate pulled back
/// inside `min_span`, the grid bounds, and away from neighbors. When the
/// candidate collides, the grown axes shrink back toward the span the
/// gesture started from — width first, then height — until the rectangle is
/// legal. A span no larger than the starting span on both axes is always
/// legal, so the loop terminates.
#[must_use]
pub fn clamp_resize(
    placement: &WidgetPlacement,
    candidate: Span,
    placements: &[WidgetPlacement],
    config: &GridConfig,
) -> Span {
    let min = placement.min_span;
    let pos = placement.pos();
    let start = placement.span();

    let max_dx = config.columns.saturating_sub(pos.col).max(1);
    let max_dy = config.rows.saturating_sub(pos.row).max(1);
    // Bounds cap wins over min_span for widgets parked near the edge
    let mut dx = candidate.dx.max(min.dx.max(1)).min(max_dx);
    let mut dy = candidate.dy.max(min.dy.max(1)).min(max_dy);

    let others: Vec<&CellRect> = placements
        .iter()
        .filter(|p| p.id != placement.id)
        .map(|p| &p.rect)
        .collect();

    loop {
        let rect = CellRect::from_pos_span(pos, Span::new(dx, dy));
        if is_legal(rect, others.iter().copied(), config) {
            return Span::new(dx, dy);
        }
        if dx > start.dx.min(max_dx) {
            dx -= 1;
        } else if dy > start.dy.min(max_dy) {
            dy -= 1;
        } else {
            // Start span (or smaller) — legal by the model invariant.
            return Span::new(dx, dy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridboard_core::geometry::Span;

    fn placement(id: &str, col: u16, row: u16, dx: u16, dy: u16) -> WidgetPlacement {
        WidgetPlacement {
            id: WidgetId::from(id),
            rect: CellRect::new(col, row, dx, dy),
            draggable: true,
            resizable: true,
            min_span: Span::UNIT,
            height: None,
        }
    }

    fn moves_of(res: &DropResolution) -> Vec<(&str, CellPos)> {
        match res {
            DropResolution::Committed { moves } => {
                moves.iter().map(|(id, pos)| (id.as_str(), *pos)).collect()
            }
            other => unreachable!("expected Committed, got {other:?}"),
        }
    }

    // === is_legal ===

    #[test]
    fn legal_requires_bounds_and_no_overlap() {
        let config = GridConfig::new(3, 3).unwrap();
        let a = CellRect::new(0, 0, 2, 2);
        assert!(is_legal(CellRect::new(2, 0, 1, 3), [&a], &config));
        assert!(!is_legal(CellRect::new(1, 1, 1, 1), [&a], &config));
        assert!(!is_legal(CellRect::new(2, 2, 2, 1), [&a], &config));
    }

    // === find_first_free_cell ===

    #[test]
    fn first_free_cell_scans_row_major() {
        let config = GridConfig::new(2, 2).unwrap();
        let placements = [placement("a", 0, 0, 1, 1)];
        assert_eq!(
            find_first_free_cell(&placements, Span::UNIT, &config),
            Some(CellPos::new(1, 0))
        );
        let placements = [placement("a", 0, 0, 1, 1), placement("b", 1, 0, 1, 1)];
        assert_eq!(
            find_first_free_cell(&placements, Span::UNIT, &config),
            Some(CellPos::new(0, 1))
        );
    }

    #[test]
    fn first_free_cell_respects_span() {
        let config = GridConfig::new(3, 2).unwrap();
        let placements = [placement("a", 1, 0, 1, 1)];
        // A 2×1 widget cannot straddle `a`; first fit is (0, 1)
        assert_eq!(
            find_first_free_cell(&placements, Span::new(2, 1), &config),
            Some(CellPos::new(0, 1))
        );
    }

    #[test]
    fn first_free_cell_none_when_full() {
        let config = GridConfig::new(1, 1).unwrap();
        let placements = [placement("a", 0, 0, 1, 1)];
        assert_eq!(find_first_free_cell(&placements, Span::UNIT, &config), None);
        // Oversized spans never fit
        assert_eq!(find_first_free_cell(&[], Span::new(2, 1), &config), None);
    }

    #[test]
    fn first_free_cell_is_deterministic() {
        let config = GridConfig::new(4, 4).unwrap();
        let placements = [placement("a", 0, 0, 2, 2), placement("b", 2, 0, 1, 1)];
        let first = find_first_free_cell(&placements, Span::new(2, 1), &config);
        for _ in 0..10 {
            assert_eq!(find_first_free_cell(&placements, Span::new(2, 1), &config), first);
        }
        assert_eq!(first, Some(CellPos::new(0, 2)));
    }

    // === Policy selection ===

    #[test]
    fn shift_for_unit_span_single_column() {
        let config = GridConfig::new(1, 5).unwrap();
        let placements = [placement("a", 0, 0, 1, 1), placement("b", 0, 1, 1, 1)];
        assert_eq!(select_drop_policy(&config, &placements), DropPolicy::Shift);
    }

    #[test]
    fn shift_for_unit_span_single_row() {
        let config = GridConfig::new(5, 1).unwrap();
        let placements = [placement("a", 0, 0, 1, 1)];
        assert_eq!(select_drop_policy(&config, &placements), DropPolicy::Shift);
    }

    #[test]
    fn swap_for_two_dimensional_grids() {
        let config = GridConfig::new(3, 3).unwrap();
        assert_eq!(select_drop_policy(&config, &[]), DropPolicy::Swap);
    }

    #[test]
    fn swap_when_single_column_has_spans() {
        let config = GridConfig::new(1, 5).unwrap();
        let placements = [placement("a", 0, 0, 1, 2)];
        assert_eq!(select_drop_policy(&config, &placements), DropPolicy::Swap);
    }

    // === resolve_drop: direct cases ===

    #[test]
    fn drop_on_free_cells_commits_single_move() {
        let config = GridConfig::new(3, 3).unwrap();
        let placements = [placement("a", 0, 0, 1, 1), placement("b", 1, 0, 1, 1)];
        let res = resolve_drop(&WidgetId::from("a"), CellPos::new(2, 2), &placements, &config);
        assert_eq!(moves_of(&res), vec![("a", CellPos::new(2, 2))]);
    }

    #[test]
    fn drop_on_own_position_is_unchanged() {
        let config = GridConfig::new(3, 3).unwrap();
        let placements = [placement("a", 1, 1, 1, 1)];
        let res = resolve_drop(&WidgetId::from("a"), CellPos::new(1, 1), &placements, &config);
        assert_eq!(res, DropResolution::Unchanged);
    }

    #[test]
    fn drop_out_of_bounds_rejects() {
        let config = GridConfig::new(3, 3).unwrap();
        let placements = [placement("a", 0, 0, 2, 1)];
        let res = resolve_drop(&WidgetId::from("a"), CellPos::new(2, 0), &placements, &config);
        assert_eq!(res, DropResolution::Rejected(DropRejection::OutOfBounds));
    }

    #[test]
    fn drop_of_unknown_widget_rejects() {
        let config = GridConfig::new(3, 3).unwrap();
        let res = resolve_drop(&WidgetId::from("ghost"), CellPos::new(0, 0), &[], &config);
        assert_eq!(res, DropResolution::Rejected(DropRejection::UnknownWidget));
    }

    // === resolve_drop: shift policy ===

    #[test]
    fn shift_down_slides_intermediates_up() {
        let config = GridConfig::new(1, 3).unwrap();
        let placements = [
            placement("a", 0, 0, 1, 1),
            placement("b", 0, 1, 1, 1),
            placement("c", 0, 2, 1, 1),
        ];
        let res = resolve_drop(&WidgetId::from("a"), CellPos::new(0, 2), &placements, &config);
        let moves = moves_of(&res);
        assert!(moves.contains(&("b", CellPos::new(0, 0))));
        assert!(moves.contains(&("c", CellPos::new(0, 1))));
        assert!(moves.contains(&("a", CellPos::new(0, 2))));
    }

    #[test]
    fn shift_up_slides_intermediates_down() {
        let config = GridConfig::new(1, 3).unwrap();
        let placements = [
            placement("a", 0, 0, 1, 1),
            placement("b", 0, 1, 1, 1),
            placement("c", 0, 2, 1, 1),
        ];
        let res = resolve_drop(&WidgetId::from("c"), CellPos::new(0, 0), &placements, &config);
        let moves = moves_of(&res);
        assert!(moves.contains(&("a", CellPos::new(0, 1))));
        assert!(moves.contains(&("b", CellPos::new(0, 2))));
        assert!(moves.contains(&("c", CellPos::new(0, 0))));
    }

    #[test]
    fn shift_along_single_row() {
        let config = GridConfig::new(3, 1).unwrap();
        let placements = [
            placement("a", 0, 0, 1, 1),
            placement("b", 1, 0, 1, 1),
            placement("c", 2, 0, 1, 1),
        ];
        let res = resolve_drop(&WidgetId::from("b"), CellPos::new(2, 0), &placements, &config);
        let moves = moves_of(&res);
        assert!(moves.contains(&("c", CellPos::new(1, 0))));
        assert!(moves.contains(&("b", CellPos::new(2, 0))));
        assert_eq!(moves.len(), 2);
    }

    // === resolve_drop: swap policy ===

    #[test]
    fn swap_exchanges_positions() {
        let config = GridConfig::new(3, 3).unwrap();
        let placements = [placement("a", 0, 0, 1, 1), placement("b", 1, 0, 1, 1)];
        let res = resolve_drop(&WidgetId::from("a"), CellPos::new(1, 0), &placements, &config);
        let moves = moves_of(&res);
        assert!(moves.contains(&("a", CellPos::new(1, 0))));
        assert!(moves.contains(&("b", CellPos::new(0, 0))));
    }

    #[test]
    fn swap_keeps_spans() {
        let config = GridConfig::new(4, 4).unwrap();
        // 2×1 "a" swaps with 1×1 "b": positions exchange, spans stay put
        let placements = [placement("a", 0, 0, 2, 1), placement("b", 2, 0, 1, 1)];
        let res = resolve_drop(&WidgetId::from("a"), CellPos::new(2, 0), &placements, &config);
        let moves = moves_of(&res);
        assert!(moves.contains(&("a", CellPos::new(2, 0))));
        assert!(moves.contains(&("b", CellPos::new(0, 0))));
    }

    #[test]
    fn swap_rejects_multiple_occupants() {
        let config = GridConfig::new(4, 4).unwrap();
        // Dragging 2×1 "a" onto cells covered by both "b" and "c"
        let placements = [
            placement("a", 0, 2, 2, 1),
            placement("b", 0, 0, 1, 1),
            placement("c", 1, 0, 1, 1),
        ];
        let res = resolve_drop(&WidgetId::from("a"), CellPos::new(0, 0), &placements, &config);
        assert_eq!(res, DropResolution::Rejected(DropRejection::MultipleOccupants));
    }

    #[test]
    fn swap_rejects_residual_overlap() {
        let config = GridConfig::new(3, 3).unwrap();
        // Dropping 1×1 "a" onto 2×1 "b" would park b at a's old cell (2,0),
        // where b's 2-wide span overflows the grid.
        let placements = [placement("a", 2, 0, 1, 1), placement("b", 0, 1, 2, 1)];
        let res = resolve_drop(&WidgetId::from("a"), CellPos::new(0, 1), &placements, &config);
        assert_eq!(res, DropResolution::Rejected(DropRejection::SwapCollision));
    }

    // === clamp_resize ===

    #[test]
    fn resize_clamps_to_grid_bounds() {
        let config = GridConfig::new(3, 3).unwrap();
        let placements = [placement("a", 1, 1, 1, 1)];
        let span = clamp_resize(&placements[0], Span::new(5, 5), &placements, &config);
        assert_eq!(span, Span::new(2, 2));
    }

    #[test]
    fn resize_clamps_to_min_span() {
        let config = GridConfig::new(3, 3).unwrap();
        let mut a = placement("a", 0, 0, 2, 2);
        a.min_span = Span::new(2, 1);
        let placements = [a.clone()];
        let span = clamp_resize(&a, Span::new(1, 1), &placements, &config);
        assert_eq!(span, Span::new(2, 1));
    }

    #[test]
    fn resize_stops_at_neighbor() {
        let config = GridConfig::new(4, 4).unwrap();
        let placements = [placement("a", 0, 0, 1, 1), placement("b", 2, 0, 1, 1)];
        // Growing a to 4×1 would cross b; clamp pulls width back to 2
        let span = clamp_resize(&placements[0], Span::new(4, 1), &placements, &config);
        assert_eq!(span, Span::new(2, 1));
    }

    #[test]
    fn resize_shrinks_width_before_height() {
        let config = GridConfig::new(4, 4).unwrap();
        // b blocks the grown rectangle; pulling width back to 1 frees it
        // while height stays grown.
        let placements = [placement("a", 0, 0, 1, 1), placement("b", 1, 1, 1, 1)];
        let span = clamp_resize(&placements[0], Span::new(2, 3), &placements, &config);
        assert_eq!(span, Span::new(1, 3));
    }

    #[test]
    fn resize_never_rejects() {
        let config = GridConfig::new(2, 2).unwrap();
        let placements = [placement("a", 0, 0, 1, 1), placement("b", 1, 0, 1, 1)];
        // Every candidate yields some legal span, worst case the start span
        let span = clamp_resize(&placements[0], Span::new(9, 9), &placements, &config);
        assert_eq!(span, Span::new(1, 2));
    }
}
