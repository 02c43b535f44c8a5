//! Drag gestures over a page's widget list.
//!
//! A drag is eager: every pointer hover over a slot (or keyboard step) is
//! committed to the registry immediately, so what the user sees during the
//! drag is already the final order. Dropping only ends the session.
//! Cancelling (Escape, release outside every slot, or a forced cancel when
//! edit mode switches off) also only ends the session: moves already
//! committed are kept and the last hovered position stands.
//!
//! Every move re-resolves the dragged widget's current index from its id
//! against the live list, because widgets may be enabled or disabled
//! between pick-up and a later hover.

use serde::{Deserialize, Serialize};

use crate::widget::{PageId, WidgetId, WidgetRegistry};

/// How the gesture is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Hover over slots; each hover commits a move.
    Pointer,
    /// Discrete steps that swap with an adjacent widget.
    Keyboard,
}

/// Direction of a keyboard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDirection {
    /// Towards index 0.
    Backward,
    /// Towards the end of the list.
    Forward,
}

/// An in-flight drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    /// Page whose list is being reordered.
    pub page: PageId,
    pub active_widget_id: WidgetId,
    /// Index of the widget at pick-up.
    pub origin_index: usize,
    /// Index of the last committed hover or step.
    pub current_hover_index: usize,
    pub input_mode: InputMode,
}

/// Drag state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Why a drag session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragEndReason {
    /// Released over a slot (pointer) or confirmed (keyboard).
    Dropped,
    /// Escape, or released outside every slot.
    Cancelled,
    /// Edit mode switched off mid-drag.
    ForcedCancel,
    /// The dragged widget left the live list (e.g. it was disabled).
    WidgetUnavailable,
}

/// A finished drag session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    pub session: DragSession,
    pub reason: DragEndReason,
}

/// Drives one drag gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct DragManager {
    state: DragState,
}

impl DragManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// The active session, if dragging.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Start dragging a widget listed on `page`.
    ///
    /// Does nothing (returns `false`) while another session is active or if
    /// the widget is not in the page's live list. Edit mode gating is the
    /// caller's job; see [`crate::EditModeController`].
    pub fn pick_up(
        &mut self,
        registry: &WidgetRegistry,
        page: &str,
        widget_id: &str,
        input_mode: InputMode,
    ) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(index) = registry.position(page, widget_id) else {
            return false;
        };

        log::debug!("Picked up '{}' on '{}' at {} ({:?})", widget_id, page, index, input_mode);
        self.state = DragState::Dragging(DragSession {
            page: PageId::from(page),
            active_widget_id: widget_id.to_string(),
            origin_index: index,
            current_hover_index: index,
            input_mode,
        });
        true
    }

    /// Pointer hover over slot `slot`: commit the move immediately.
    ///
    /// Ignored unless a pointer session is active. Returns `true` if the
    /// order changed.
    pub fn hover(&mut self, registry: &mut WidgetRegistry, slot: usize) -> bool {
        match self.session() {
            Some(session) if session.input_mode == InputMode::Pointer => {}
            _ => return false,
        }
        self.commit(registry, |_from, _len| Some(slot))
    }

    /// Keyboard step: swap with the adjacent widget.
    ///
    /// Ignored unless a keyboard session is active. A step past either end
    /// of the list does nothing.
    pub fn step(&mut self, registry: &mut WidgetRegistry, direction: StepDirection) -> bool {
        match self.session() {
            Some(session) if session.input_mode == InputMode::Keyboard => {}
            _ => return false,
        }
        self.commit(registry, |from, len| match direction {
            StepDirection::Backward => from.checked_sub(1),
            StepDirection::Forward => (from + 1 < len).then_some(from + 1),
        })
    }

    /// End the session at a drop target. `None` means the pointer was
    /// released outside every slot, which counts as a cancel. Neither
    /// outcome mutates the registry.
    pub fn drop_at(&mut self, slot: Option<usize>) -> Option<DragEnd> {
        let reason = match slot {
            Some(_) => DragEndReason::Dropped,
            None => DragEndReason::Cancelled,
        };
        self.end(reason)
    }

    /// Cancel the session, keeping every move already committed.
    pub fn cancel(&mut self) -> Option<DragEnd> {
        self.end(DragEndReason::Cancelled)
    }

    pub(crate) fn force_cancel(&mut self) -> Option<DragEnd> {
        self.end(DragEndReason::ForcedCancel)
    }

    pub(crate) fn abandon(&mut self) -> Option<DragEnd> {
        self.end(DragEndReason::WidgetUnavailable)
    }

    /// Resolve the live index of the dragged widget, pick a target with
    /// `target(from, len)`, and apply the move.
    fn commit(
        &mut self,
        registry: &mut WidgetRegistry,
        target: impl FnOnce(usize, usize) -> Option<usize>,
    ) -> bool {
        let Some(session) = self.session() else {
            return false;
        };
        let page = session.page.clone();
        let Some(from) = registry.position(page.as_str(), &session.active_widget_id) else {
            log::debug!("Dragged widget '{}' left the list", session.active_widget_id);
            self.abandon();
            return false;
        };

        let len = registry.list(page.as_str()).len();
        let Some(to) = target(from, len) else {
            return false;
        };
        let to = to.min(len.saturating_sub(1));

        if let DragState::Dragging(session) = &mut self.state {
            session.current_hover_index = to;
        }
        registry.move_widget(page.as_str(), from, to)
    }

    fn end(&mut self, reason: DragEndReason) -> Option<DragEnd> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                log::debug!(
                    "Drag of '{}' ended ({:?}) at {}",
                    session.active_widget_id,
                    reason,
                    session.current_hover_index
                );
                Some(DragEnd { session, reason })
            }
            DragState::Idle => None,
        }
    }
}
