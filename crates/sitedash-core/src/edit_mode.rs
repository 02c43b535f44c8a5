//! Edit (customize) mode: the flag gating every layout mutation affordance.

use crate::drag::{DragEnd, DragManager, InputMode, StepDirection};
use crate::widget::{WidgetRegistry, WidgetSize};

/// Gates drag pick-up and the size and visibility controls, and owns the
/// drag session so that leaving edit mode can cancel it.
#[derive(Debug, Clone, Default)]
pub struct EditModeController {
    active: bool,
    drag: DragManager,
}

impl EditModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn drag(&self) -> &DragManager {
        &self.drag
    }

    /// Switch edit mode on or off.
    ///
    /// Switching off while dragging force-cancels the session first; the
    /// ended session is returned. Moves it already committed stay.
    pub fn set_active(&mut self, active: bool) -> Option<DragEnd> {
        if self.active == active {
            return None;
        }
        let ended = if active { None } else { self.drag.force_cancel() };
        self.active = active;
        log::info!("Edit mode {}", if active { "on" } else { "off" });
        ended
    }

    pub fn toggle(&mut self) -> Option<DragEnd> {
        self.set_active(!self.active)
    }

    /// Pick up a widget. Inert while edit mode is off.
    pub fn begin_drag(
        &mut self,
        registry: &WidgetRegistry,
        page: &str,
        widget_id: &str,
        input_mode: InputMode,
    ) -> bool {
        if !self.active {
            log::debug!("Ignoring pick-up of '{}': edit mode is off", widget_id);
            return false;
        }
        self.drag.pick_up(registry, page, widget_id, input_mode)
    }

    /// Forward a pointer hover to the active session.
    pub fn hover(&mut self, registry: &mut WidgetRegistry, slot: usize) -> bool {
        self.active && self.drag.hover(registry, slot)
    }

    /// Forward a keyboard step to the active session.
    pub fn step(&mut self, registry: &mut WidgetRegistry, direction: StepDirection) -> bool {
        self.active && self.drag.step(registry, direction)
    }

    pub fn drop_at(&mut self, slot: Option<usize>) -> Option<DragEnd> {
        self.drag.drop_at(slot)
    }

    pub fn cancel_drag(&mut self) -> Option<DragEnd> {
        self.drag.cancel()
    }

    /// Size control. Inert while edit mode is off.
    pub fn set_size(&self, registry: &mut WidgetRegistry, widget_id: &str, size: WidgetSize) -> bool {
        self.active && registry.set_size(widget_id, size)
    }

    /// Visibility control. Inert while edit mode is off.
    ///
    /// Hiding the widget currently being dragged ends that session.
    pub fn set_enabled(&mut self, registry: &mut WidgetRegistry, widget_id: &str, enabled: bool) -> bool {
        if !self.active {
            return false;
        }
        let changed = registry.set_enabled(widget_id, enabled);
        let dragged = self
            .drag
            .session()
            .is_some_and(|session| session.active_widget_id == widget_id);
        if changed && !enabled && dragged {
            self.drag.abandon();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogEntry};
    use crate::drag::DragEndReason;

    fn registry() -> WidgetRegistry {
        let catalog = Catalog::new(vec![
            CatalogEntry::new("a", "A", "x", &["dashboard"], WidgetSize::Small, 0),
            CatalogEntry::new("b", "B", "x", &["dashboard"], WidgetSize::Medium, 1),
            CatalogEntry::new("c", "C", "x", &["dashboard"], WidgetSize::Large, 2),
        ])
        .unwrap();
        WidgetRegistry::from_catalog(&catalog)
    }

    fn ids(registry: &WidgetRegistry) -> Vec<String> {
        registry.list("dashboard").iter().map(|w| w.id.clone()).collect()
    }

    #[test]
    fn test_controls_inert_when_off() {
        let mut registry = registry();
        let mut edit = EditModeController::new();
        let before = registry.clone();

        assert!(!edit.begin_drag(&registry, "dashboard", "a", InputMode::Pointer));
        assert!(!edit.set_size(&mut registry, "a", WidgetSize::Large));
        assert!(!edit.set_enabled(&mut registry, "a", false));
        assert!(!edit.hover(&mut registry, 2));
        assert_eq!(registry, before);
        assert!(!edit.drag().is_dragging());
    }

    #[test]
    fn test_controls_work_when_on() {
        let mut registry = registry();
        let mut edit = EditModeController::new();
        assert!(edit.set_active(true).is_none());

        assert!(edit.set_size(&mut registry, "a", WidgetSize::Large));
        assert!(edit.set_enabled(&mut registry, "b", false));
        assert!(edit.begin_drag(&registry, "dashboard", "a", InputMode::Pointer));
        assert!(edit.hover(&mut registry, 1));
        assert_eq!(ids(&registry), ["c", "a"]);
    }

    #[test]
    fn test_switching_off_mid_drag_forces_cancel() {
        let mut registry = registry();
        let mut edit = EditModeController::new();
        edit.set_active(true);
        edit.begin_drag(&registry, "dashboard", "c", InputMode::Pointer);
        edit.hover(&mut registry, 0);

        let ended = edit.set_active(false).unwrap();
        assert_eq!(ended.reason, DragEndReason::ForcedCancel);
        assert!(!edit.drag().is_dragging());
        assert!(!edit.is_active());
        // Last committed order stands.
        assert_eq!(ids(&registry), ["c", "a", "b"]);
    }

    #[test]
    fn test_toggle() {
        let mut edit = EditModeController::new();
        edit.toggle();
        assert!(edit.is_active());
        edit.toggle();
        assert!(!edit.is_active());
        // Redundant switch is a no-op.
        assert!(edit.set_active(false).is_none());
    }

    #[test]
    fn test_hiding_dragged_widget_ends_session() {
        let mut registry = registry();
        let mut edit = EditModeController::new();
        edit.set_active(true);
        edit.begin_drag(&registry, "dashboard", "b", InputMode::Keyboard);

        assert!(edit.set_enabled(&mut registry, "b", false));
        assert!(!edit.drag().is_dragging());
    }

    #[test]
    fn test_hiding_other_widget_keeps_session() {
        let mut registry = registry();
        let mut edit = EditModeController::new();
        edit.set_active(true);
        edit.begin_drag(&registry, "dashboard", "c", InputMode::Keyboard);

        assert!(edit.set_enabled(&mut registry, "a", false));
        assert!(edit.drag().is_dragging());
        assert!(edit.step(&mut registry, StepDirection::Backward));
        assert_eq!(ids(&registry), ["c", "b"]);
    }
}
