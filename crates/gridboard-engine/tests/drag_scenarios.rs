#![forbid(unsafe_code)]

//! End-to-end gesture scenarios through the [`Dashboard`] facade.
//!
//! Each test feeds a realistic pointer sequence and asserts both the
//! transition effects and the committed geometry. The fixture grid uses
//! exact 100px cells so pixel positions map to cells without arithmetic
//! noise.

use gridboard_core::config::GridConfig;
use gridboard_core::event::{CancelReason, PointerEvent};
use gridboard_core::geometry::{CellPos, CellRect, PxPoint, PxSize, Span};
use gridboard_core::id::WidgetId;
use gridboard_engine::{Dashboard, GestureEffect, GestureState, WidgetSpec};

fn dashboard(columns: u16, rows: u16) -> Dashboard {
    let config = GridConfig::new(columns, rows)
        .unwrap()
        .with_cell_width(100.0)
        .with_cell_height(100.0);
    Dashboard::new(config).unwrap()
}

fn rect(dash: &Dashboard, id: &str) -> CellRect {
    dash.model().widget(&WidgetId::from(id)).unwrap().rect
}

fn press(dash: &mut Dashboard, id: &str, x: f32, y: f32) {
    dash.handle_pointer(&PointerEvent::down_on_body(id, PxPoint::new(x, y)));
}

fn press_handle(dash: &mut Dashboard, id: &str, x: f32, y: f32) {
    dash.handle_pointer(&PointerEvent::down_on_handle(id, PxPoint::new(x, y)));
}

fn drag(dash: &mut Dashboard, x: f32, y: f32) {
    dash.handle_pointer(&PointerEvent::moved(PxPoint::new(x, y)));
}

fn release(dash: &mut Dashboard, x: f32, y: f32) -> GestureEffect {
    dash.handle_pointer(&PointerEvent::up(PxPoint::new(x, y))).effect
}

// === Auto-placement ===

#[test]
fn auto_placement_fills_row_major_and_overflow_is_a_no_op() {
    let mut dash = dashboard(2, 2);
    for id in ["a", "b", "c", "d"] {
        assert!(dash.add_widget(WidgetSpec::new(id)));
    }
    assert_eq!(rect(&dash, "a"), CellRect::new(0, 0, 1, 1));
    assert_eq!(rect(&dash, "b"), CellRect::new(1, 0, 1, 1));
    assert_eq!(rect(&dash, "c"), CellRect::new(0, 1, 1, 1));
    assert_eq!(rect(&dash, "d"), CellRect::new(1, 1, 1, 1));

    // Grid full: the fifth add changes nothing
    assert!(!dash.add_widget(WidgetSpec::new("e")));
    assert_eq!(dash.rects().len(), 4);
}

// === Clicks ===

#[test]
fn click_without_drag_fires_click_and_moves_nothing() {
    let mut dash = dashboard(3, 3);
    dash.add_widget(WidgetSpec::new("a").at(0, 0));

    press(&mut dash, "a", 50.0, 50.0);
    let effect = release(&mut dash, 51.0, 50.0);

    assert_eq!(
        effect,
        GestureEffect::Clicked {
            id: WidgetId::from("a")
        }
    );
    assert_eq!(rect(&dash, "a"), CellRect::new(0, 0, 1, 1));
}

// === Move gestures ===

#[test]
fn drag_to_empty_cell_commits_on_release() {
    let mut dash = dashboard(3, 3);
    dash.add_widget(WidgetSpec::new("a").at(0, 0));
    dash.add_widget(WidgetSpec::new("b").at(1, 0));

    press(&mut dash, "a", 50.0, 50.0);
    drag(&mut dash, 150.0, 250.0);
    drag(&mut dash, 155.0, 255.0);
    let effect = release(&mut dash, 155.0, 255.0);

    assert_eq!(
        effect,
        GestureEffect::DragCommitted {
            id: WidgetId::from("a"),
            pos: CellPos::new(1, 2)
        }
    );
    assert_eq!(rect(&dash, "a"), CellRect::new(1, 2, 1, 1));
    assert_eq!(rect(&dash, "b"), CellRect::new(1, 0, 1, 1));
}

#[test]
fn drop_on_occupied_cell_swaps_in_two_dimensions() {
    let mut dash = dashboard(3, 3);
    dash.add_widget(WidgetSpec::new("a").at(0, 0));
    dash.add_widget(WidgetSpec::new("b").at(2, 2));

    press(&mut dash, "a", 50.0, 50.0);
    drag(&mut dash, 250.0, 250.0);
    let effect = release(&mut dash, 250.0, 250.0);

    assert!(matches!(effect, GestureEffect::DragCommitted { .. }));
    assert_eq!(rect(&dash, "a"), CellRect::new(2, 2, 1, 1));
    assert_eq!(rect(&dash, "b"), CellRect::new(0, 0, 1, 1));
}

#[test]
fn single_column_list_shifts_instead_of_swapping() {
    let mut dash = dashboard(1, 4);
    dash.add_widget(WidgetSpec::new("a").at(0, 0));
    dash.add_widget(WidgetSpec::new("b").at(0, 1));
    dash.add_widget(WidgetSpec::new("c").at(0, 2));

    // Drag "a" down onto "c": b and c slide up one step
    press(&mut dash, "a", 50.0, 50.0);
    drag(&mut dash, 50.0, 250.0);
    let effect = release(&mut dash, 50.0, 250.0);

    assert!(matches!(effect, GestureEffect::DragCommitted { .. }));
    assert_eq!(rect(&dash, "a"), CellRect::new(0, 2, 1, 1));
    assert_eq!(rect(&dash, "b"), CellRect::new(0, 0, 1, 1));
    assert_eq!(rect(&dash, "c"), CellRect::new(0, 1, 1, 1));
}

#[test]
fn rejected_drop_snaps_back_without_side_effects() {
    let mut dash = dashboard(3, 3);
    // A 2-wide widget dropped across two separate occupants has no swap
    dash.add_widget(WidgetSpec::new("wide").at(0, 2).span(2, 1));
    dash.add_widget(WidgetSpec::new("b").at(0, 0));
    dash.add_widget(WidgetSpec::new("c").at(1, 0));

    press(&mut dash, "wide", 50.0, 250.0);
    drag(&mut dash, 60.0, 60.0);
    let effect = release(&mut dash, 60.0, 60.0);

    assert_eq!(
        effect,
        GestureEffect::DragRejected {
            id: WidgetId::from("wide"),
            snap_back: CellRect::new(0, 2, 2, 1)
        }
    );
    assert_eq!(rect(&dash, "wide"), CellRect::new(0, 2, 2, 1));
    assert_eq!(rect(&dash, "b"), CellRect::new(0, 0, 1, 1));
    assert_eq!(rect(&dash, "c"), CellRect::new(1, 0, 1, 1));
}

#[test]
fn preview_floats_while_model_stays_committed() {
    let mut dash = dashboard(3, 3);
    dash.add_widget(WidgetSpec::new("a").at(0, 0));

    press(&mut dash, "a", 50.0, 50.0);
    drag(&mut dash, 130.0, 50.0);
    let preview = dash.preview_rect().unwrap();
    // The preview tracks the pointer continuously, off the cell lattice
    assert_eq!(preview.left, 80.0);
    assert_eq!(rect(&dash, "a"), CellRect::new(0, 0, 1, 1));

    release(&mut dash, 130.0, 50.0);
    assert!(dash.preview_rect().is_none());
}

// === Resize gestures ===

#[test]
fn resize_grows_to_pointer_cell() {
    let mut dash = dashboard(3, 3);
    dash.add_widget(WidgetSpec::new("a").at(0, 0));

    press_handle(&mut dash, "a", 95.0, 95.0);
    drag(&mut dash, 250.0, 150.0);
    let effect = release(&mut dash, 250.0, 150.0);

    assert_eq!(
        effect,
        GestureEffect::ResizeCommitted {
            id: WidgetId::from("a"),
            span: Span::new(3, 2)
        }
    );
    assert_eq!(rect(&dash, "a"), CellRect::new(0, 0, 3, 2));
}

#[test]
fn resize_is_clamped_by_neighbor_never_rejected() {
    let mut dash = dashboard(3, 3);
    dash.add_widget(WidgetSpec::new("a").at(0, 0));
    dash.add_widget(WidgetSpec::new("b").at(2, 0));

    press_handle(&mut dash, "a", 95.0, 95.0);
    drag(&mut dash, 280.0, 50.0);
    let effect = release(&mut dash, 280.0, 50.0);

    assert_eq!(
        effect,
        GestureEffect::ResizeCommitted {
            id: WidgetId::from("a"),
            span: Span::new(2, 1)
        }
    );
    assert_eq!(rect(&dash, "a"), CellRect::new(0, 0, 2, 1));
}

// === Cancellation and removal ===

#[test]
fn cancel_mid_drag_commits_nothing() {
    let mut dash = dashboard(3, 3);
    dash.add_widget(WidgetSpec::new("a").at(0, 0));

    press(&mut dash, "a", 50.0, 50.0);
    drag(&mut dash, 250.0, 250.0);
    let t = dash.handle_pointer(&PointerEvent::cancel(
        CancelReason::PointerCancel,
        PxPoint::new(250.0, 250.0),
    ));

    assert_eq!(t.to, GestureState::Idle);
    assert_eq!(
        t.effect,
        GestureEffect::Cancelled {
            reason: CancelReason::PointerCancel
        }
    );
    assert_eq!(rect(&dash, "a"), CellRect::new(0, 0, 1, 1));
}

#[test]
fn removing_the_dragged_widget_cancels_the_gesture() {
    let mut dash = dashboard(3, 3);
    dash.add_widget(WidgetSpec::new("a").at(0, 0));

    press(&mut dash, "a", 50.0, 50.0);
    drag(&mut dash, 250.0, 250.0);
    assert!(dash.remove_widget(&WidgetId::from("a")));

    let t = dash.handle_pointer(&PointerEvent::moved(PxPoint::new(255.0, 250.0)));
    assert_eq!(
        t.effect,
        GestureEffect::Cancelled {
            reason: CancelReason::WidgetRemoved
        }
    );
    assert_eq!(t.to, GestureState::Idle);
}

// === Container resize ===

#[test]
fn resize_observer_burst_coalesces_to_one_relayout() {
    let config = GridConfig::new(4, 2).unwrap();
    let mut dash = Dashboard::new(config).unwrap();
    dash.add_widget(WidgetSpec::new("a").at(0, 0));

    for width in [801.0, 802.0, 803.0, 804.0] {
        dash.set_container_size(PxSize::new(width, 400.0));
    }
    assert!(dash.run_frame());
    assert!(!dash.run_frame());
    assert_eq!(dash.resolved().container, PxSize::new(804.0, 400.0));
    assert_eq!(dash.coalescer_stats().applied, 1);

    // Quiet frame after the burst: nothing to do
    dash.set_container_size(PxSize::new(804.0, 400.0));
    assert!(!dash.run_frame());
}
