//! Dashboard: the registry, edit mode and viewport of one session.

use kurbo::Point;

use crate::catalog::Catalog;
use crate::config::{DEFAULT_VIEWPORT_WIDTH, DashboardConfig};
use crate::drag::{DragEnd, DragEndReason, InputMode};
use crate::edit_mode::EditModeController;
use crate::import::FinishedBatch;
use crate::input::DashboardEvent;
use crate::layout::{self, Placement, ScreenClass};
use crate::slots::SlotGrid;
use crate::storage::LayoutSnapshot;
use crate::widget::WidgetRegistry;

/// What handling one event did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// A page's order, a widget's size or its visibility changed.
    pub layout_changed: bool,
    /// A drag session ended during this event.
    pub drag_end: Option<DragEnd>,
}

/// One user's dashboard session.
///
/// Pointer positions are in page content coordinates, with the first slot's
/// top-left corner at the origin.
#[derive(Debug, Clone)]
pub struct Dashboard {
    registry: WidgetRegistry,
    edit: EditModeController,
    viewport_width: Option<u32>,
    config: DashboardConfig,
    dirty: bool,
}

impl Dashboard {
    /// Create a dashboard from a catalog.
    pub fn new(catalog: &Catalog, config: DashboardConfig) -> Self {
        Self::with_registry(WidgetRegistry::from_catalog(catalog), config)
    }

    pub fn with_registry(registry: WidgetRegistry, config: DashboardConfig) -> Self {
        Self {
            registry,
            edit: EditModeController::new(),
            viewport_width: None,
            config,
            dirty: false,
        }
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn edit_mode(&self) -> &EditModeController {
        &self.edit
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn viewport_width(&self) -> Option<u32> {
        self.viewport_width
    }

    pub fn set_viewport_width(&mut self, width: Option<u32>) {
        self.viewport_width = width;
    }

    /// Current screen class.
    pub fn screen_class(&self) -> ScreenClass {
        ScreenClass::classify(self.viewport_width, &self.config.breakpoints)
    }

    /// Placements of a page for the current screen class.
    pub fn placements(&self, page: &str) -> Vec<Placement> {
        layout::placements(&self.registry.list(page), self.screen_class())
    }

    /// Slot bounds of a page for the current viewport.
    pub fn slot_grid(&self, page: &str) -> SlotGrid {
        let width = match self.viewport_width {
            Some(w) if w > 0 => f64::from(w),
            _ => DEFAULT_VIEWPORT_WIDTH,
        };
        let screen = self.screen_class();
        SlotGrid::flow(&self.placements(page), screen.columns(), width, &self.config.grid)
    }

    /// Whether the layout changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Capture the persistable layout of every page.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot::capture(&self.registry)
    }

    /// Replace the layout with a persisted snapshot.
    ///
    /// Any drag in progress is cancelled first. Returns the finished batch's
    /// warnings for records that could not be applied.
    pub fn restore(&mut self, snapshot: LayoutSnapshot) -> Vec<String> {
        self.edit.cancel_drag();
        let batch: FinishedBatch = snapshot.into_batch().finish(&self.registry);
        let warnings = batch.warnings().to_vec();
        self.registry.apply(batch);
        warnings
    }

    /// Handle one host event.
    pub fn handle_event(&mut self, event: DashboardEvent) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        let session_before = self.edit.drag().session().cloned();
        match event {
            DashboardEvent::PointerDown { page, position } => {
                let grid = self.slot_grid(page.as_str());
                if let Some(widget_id) = grid.widget_at(position) {
                    self.edit
                        .begin_drag(&self.registry, page.as_str(), widget_id, InputMode::Pointer);
                }
            }
            DashboardEvent::PointerMove { position } => {
                if let Some(slot) = self.drag_slot_at(position) {
                    outcome.layout_changed = self.edit.hover(&mut self.registry, slot);
                }
            }
            DashboardEvent::PointerUp { position } => {
                if self.edit.drag().is_dragging() {
                    let slot = self.drag_slot_at(position);
                    outcome.drag_end = self.edit.drop_at(slot);
                }
            }
            DashboardEvent::PickUp {
                page,
                widget_id,
                mode,
            } => {
                self.edit.begin_drag(&self.registry, page.as_str(), &widget_id, mode);
            }
            DashboardEvent::Step { direction } => {
                outcome.layout_changed = self.edit.step(&mut self.registry, direction);
            }
            DashboardEvent::Drop => {
                let current = self.edit.drag().session().map(|s| s.current_hover_index);
                if current.is_some() {
                    outcome.drag_end = self.edit.drop_at(current);
                }
            }
            DashboardEvent::Cancel => {
                outcome.drag_end = self.edit.cancel_drag();
            }
            DashboardEvent::SetEditMode { active } => {
                outcome.drag_end = self.edit.set_active(active);
            }
            DashboardEvent::ToggleEditMode => {
                outcome.drag_end = self.edit.toggle();
            }
            DashboardEvent::Resize { width } => {
                self.set_viewport_width(width);
            }
            DashboardEvent::SetSize { widget_id, size } => {
                outcome.layout_changed = self.edit.set_size(&mut self.registry, &widget_id, size);
            }
            DashboardEvent::SetEnabled { widget_id, enabled } => {
                outcome.layout_changed = self.edit.set_enabled(&mut self.registry, &widget_id, enabled);
            }
        }

        // The dragged widget left the live list during this event.
        if outcome.drag_end.is_none() && !self.edit.drag().is_dragging() {
            if let Some(session) = session_before {
                outcome.drag_end = Some(DragEnd {
                    session,
                    reason: DragEndReason::WidgetUnavailable,
                });
            }
        }

        if outcome.layout_changed {
            self.dirty = true;
        }
        outcome
    }

    /// Slot under a point on the page being dragged.
    fn drag_slot_at(&self, position: Point) -> Option<usize> {
        let session = self.edit.drag().session()?;
        self.slot_grid(session.page.as_str()).slot_at(position)
    }
}
