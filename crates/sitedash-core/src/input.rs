//! Host events consumed by the dashboard.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::drag::{InputMode, StepDirection};
use crate::widget::{PageId, WidgetId, WidgetSize};

/// An event delivered by the host event loop, in delivery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// Pointer pressed over a page; picks up the widget under it.
    PointerDown { page: PageId, position: Point },
    /// Pointer moved; hovers the slot under it while dragging.
    PointerMove { position: Point },
    /// Pointer released; drops over a slot or cancels outside all slots.
    PointerUp { position: Point },
    /// Pick up a specific widget (e.g. the focused one for keyboard drags).
    PickUp {
        page: PageId,
        widget_id: WidgetId,
        mode: InputMode,
    },
    /// Keyboard step of the dragged widget.
    Step { direction: StepDirection },
    /// Confirm a keyboard drag at its current position.
    Drop,
    /// Escape.
    Cancel,
    SetEditMode { active: bool },
    ToggleEditMode,
    /// Viewport resized; `None` when the width is unknown.
    Resize { width: Option<u32> },
    SetSize { widget_id: WidgetId, size: WidgetSize },
    SetEnabled { widget_id: WidgetId, enabled: bool },
}
