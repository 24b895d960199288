#![forbid(unsafe_code)]

//! The grid model: committed placements, content payloads and observers.
//!
//! The model owns the single source of truth for widget geometry and guards
//! its invariants at every mutation: placements never overlap and never
//! leave the configured grid. Runtime-invalid requests are rejected
//! silently (the method returns `false` and logs at debug level); loud
//! failures are reserved for configuration errors at construction time.

use crate::placement::{WidgetContent, WidgetPlacement, WidgetSpec};
use crate::policy::{self, DropResolution};
use crate::snapshot::{LayoutSnapshot, SnapshotEntry};
use gridboard_core::config::GridConfig;
use gridboard_core::geometry::{CellPos, CellRect, Span};
use gridboard_core::id::WidgetId;
use std::collections::HashMap;
use tracing::debug;

/// Callbacks fired on model mutations and gesture milestones.
///
/// Every hook has a no-op default, so implementors override only what they
/// need. `on_change` fires once per committed mutation, after the model has
/// reached its new state, with the full placement list.
pub trait GridObserver {
    /// The set of committed placements changed.
    fn on_change(&mut self, placements: &[WidgetPlacement]) {
        let _ = placements;
    }

    /// A pointer press-and-release landed on a widget without crossing the
    /// drag threshold.
    fn on_widget_click(&mut self, id: &WidgetId) {
        let _ = id;
    }

    /// A move gesture crossed the drag threshold.
    fn on_drag_start(&mut self, id: &WidgetId) {
        let _ = id;
    }

    /// A move gesture ended, committed or not.
    fn on_drag_end(&mut self, id: &WidgetId) {
        let _ = id;
    }

    /// A resize gesture crossed the drag threshold.
    fn on_resize_start(&mut self, id: &WidgetId) {
        let _ = id;
    }

    /// A resize gesture ended.
    fn on_resize_end(&mut self, id: &WidgetId) {
        let _ = id;
    }
}

/// Observer that ignores everything. Useful as a test stand-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGridObserver;

impl GridObserver for NullGridObserver {}

/// Committed widget placements plus their opaque content payloads.
pub struct GridModel {
    config: GridConfig,
    placements: Vec<WidgetPlacement>,
    content: HashMap<WidgetId, Box<dyn WidgetContent>>,
    observers: Vec<Box<dyn GridObserver>>,
}

impl GridModel {
    /// Create an empty model over a validated configuration.
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            placements: Vec::new(),
            content: HashMap::new(),
            observers: Vec::new(),
        }
    }

    /// The grid configuration this model enforces.
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// All committed placements, in insertion order.
    #[must_use]
    pub fn widgets(&self) -> &[WidgetPlacement] {
        &self.placements
    }

    /// Look up one placement by id.
    #[must_use]
    pub fn widget(&self, id: &WidgetId) -> Option<&WidgetPlacement> {
        self.placements.iter().find(|p| &p.id == id)
    }

    /// The opaque content payload attached to a widget, if any.
    #[must_use]
    pub fn content(&self, id: &WidgetId) -> Option<&dyn WidgetContent> {
        self.content.get(id).map(Box::as_ref)
    }

    /// Register an observer. Observers are notified in subscription order.
    pub fn subscribe(&mut self, observer: Box<dyn GridObserver>) {
        self.observers.push(observer);
    }

    /// Add a widget.
    ///
    /// An explicit position is validated as-is; without one the widget
    /// auto-places at the first free row-major cell that fits its span.
    /// Duplicate ids, illegal positions and full grids are silent no-ops.
    pub fn add_widget(&mut self, spec: WidgetSpec) -> bool {
        if self.widget(&spec.id).is_some() {
            debug!(id = %spec.id, "add rejected: duplicate id");
            return false;
        }
        let pos = match spec.position {
            Some(pos) => {
                let rect = CellRect::from_pos_span(pos, spec.span);
                if !policy::is_legal(rect, self.placements.iter().map(|p| &p.rect), &self.config) {
                    debug!(id = %spec.id, ?rect, "add rejected: illegal position");
                    return false;
                }
                pos
            }
            None => {
                match policy::find_first_free_cell(&self.placements, spec.span, &self.config) {
                    Some(pos) => pos,
                    None => {
                        debug!(id = %spec.id, "add rejected: no free cell");
                        return false;
                    }
                }
            }
        };
        let placement = WidgetPlacement {
            id: spec.id.clone(),
            rect: CellRect::from_pos_span(pos, spec.span),
            draggable: spec.draggable,
            resizable: spec.resizable,
            min_span: spec.min_span,
            height: spec.height,
        };
        debug!(id = %placement.id, rect = ?placement.rect, "widget added");
        self.placements.push(placement);
        if let Some(content) = spec.content {
            self.content.insert(spec.id, content);
        }
        self.notify_change();
        true
    }

    /// Remove a widget and its content payload. Unknown ids are a no-op.
    pub fn remove_widget(&mut self, id: &WidgetId) -> bool {
        let Some(index) = self.placements.iter().position(|p| &p.id == id) else {
            return false;
        };
        self.placements.remove(index);
        self.content.remove(id);
        debug!(%id, "widget removed");
        self.notify_change();
        true
    }

    /// Move a widget to an explicit position.
    ///
    /// This is the direct imperative move: the target must be legal as-is,
    /// no drop policy runs. Illegal targets and unknown ids are no-ops.
    pub fn move_widget(&mut self, id: &WidgetId, to: CellPos) -> bool {
        let Some(index) = self.placements.iter().position(|p| &p.id == id) else {
            return false;
        };
        let rect = self.placements[index].rect.with_pos(to);
        if rect == self.placements[index].rect {
            return true;
        }
        let others = self
            .placements
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, p)| &p.rect);
        if !policy::is_legal(rect, others, &self.config) {
            debug!(%id, ?rect, "move rejected");
            return false;
        }
        self.placements[index].rect = rect;
        debug!(%id, ?rect, "widget moved");
        self.notify_change();
        true
    }

    /// Resize a widget to an explicit span.
    ///
    /// The span is clamped the same way a resize gesture clamps, so the call
    /// always succeeds for a known id; the committed span may be smaller
    /// than requested.
    pub fn resize_widget(&mut self, id: &WidgetId, span: Span) -> bool {
        let Some(index) = self.placements.iter().position(|p| &p.id == id) else {
            return false;
        };
        let clamped = policy::clamp_resize(&self.placements[index], span, &self.placements, &self.config);
        let rect = self.placements[index].rect.with_span(clamped);
        if rect == self.placements[index].rect {
            return true;
        }
        self.placements[index].rect = rect;
        debug!(%id, ?rect, "widget resized");
        self.notify_change();
        true
    }

    /// Apply a drop resolution atomically.
    ///
    /// Every move in a `Committed` batch is re-validated against the
    /// post-batch state before anything mutates; a batch that no longer
    /// holds is dropped whole. `Unchanged` and `Rejected` do nothing.
    pub fn apply_resolution(&mut self, resolution: &DropResolution) -> bool {
        let DropResolution::Committed { moves } = resolution else {
            return false;
        };
        let mut patched = self.placements.clone();
        for (id, pos) in moves {
            let Some(p) = patched.iter_mut().find(|p| &p.id == id) else {
                debug!(%id, "resolution dropped: unknown id");
                return false;
            };
            p.rect = p.rect.with_pos(*pos);
        }
        if !Self::all_legal(&patched, &self.config) {
            debug!("resolution dropped: patched layout is illegal");
            return false;
        }
        self.placements = patched;
        debug!(moves = moves.len(), "drop resolution applied");
        self.notify_change();
        true
    }

    /// Capture the current layout, ordered by id.
    #[must_use]
    pub fn serialize(&self) -> LayoutSnapshot {
        let mut entries: Vec<SnapshotEntry> = self
            .placements
            .iter()
            .map(|p| SnapshotEntry {
                id: p.id.as_str().to_owned(),
                col: p.rect.col,
                row: p.rect.row,
                dx: p.rect.dx,
                dy: p.rect.dy,
            })
            .collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        LayoutSnapshot { entries }
    }

    /// Restore geometry from a snapshot.
    ///
    /// Entries are matched to live widgets by id; entries for absent ids
    /// are ignored, and live widgets missing from the snapshot keep their
    /// current rectangle. The patched layout is validated whole: if any
    /// rectangle is illegal the entire restore is a no-op.
    pub fn restore(&mut self, snapshot: &LayoutSnapshot) -> bool {
        let mut patched = self.placements.clone();
        let mut touched = false;
        for entry in &snapshot.entries {
            let id = WidgetId::from(entry.id.as_str());
            if let Some(p) = patched.iter_mut().find(|p| p.id == id) {
                if p.rect != entry.rect() {
                    p.rect = entry.rect();
                    touched = true;
                }
            }
        }
        if !Self::all_legal(&patched, &self.config) {
            debug!("restore rejected: snapshot layout is illegal");
            return false;
        }
        if touched {
            self.placements = patched;
            debug!(entries = snapshot.len(), "layout restored");
            self.notify_change();
        }
        true
    }

    fn all_legal(placements: &[WidgetPlacement], config: &GridConfig) -> bool {
        placements.iter().enumerate().all(|(i, p)| {
            config.in_bounds(p.rect)
                && placements[i + 1..].iter().all(|q| !p.rect.intersects(&q.rect))
        })
    }

    fn notify_change(&mut self) {
        let placements = &self.placements;
        for observer in &mut self.observers {
            observer.on_change(placements);
        }
    }

    pub(crate) fn notify_click(&mut self, id: &WidgetId) {
        for observer in &mut self.observers {
            observer.on_widget_click(id);
        }
    }

    pub(crate) fn notify_drag_start(&mut self, id: &WidgetId) {
        for observer in &mut self.observers {
            observer.on_drag_start(id);
        }
    }

    pub(crate) fn notify_drag_end(&mut self, id: &WidgetId) {
        for observer in &mut self.observers {
            observer.on_drag_end(id);
        }
    }

    pub(crate) fn notify_resize_start(&mut self, id: &WidgetId) {
        for observer in &mut self.observers {
            observer.on_resize_start(id);
        }
    }

    pub(crate) fn notify_resize_end(&mut self, id: &WidgetId) {
        for observer in &mut self.observers {
            observer.on_resize_end(id);
        }
    }
}

impl std::fmt::Debug for GridModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridModel")
            .field("config", &self.config)
            .field("placements", &self.placements)
            .field("content_ids", &self.content.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
