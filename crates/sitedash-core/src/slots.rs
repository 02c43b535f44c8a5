//! Slot geometry: flows placements into grid rows and hit-tests pointers.

use kurbo::{Point, Rect};

use crate::config::GridConfig;
use crate::layout::Placement;
use crate::widget::WidgetId;

/// Bounds of one placed widget, in viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRect {
    /// Index of the widget in the page's ordered list.
    pub index: usize,
    pub widget_id: WidgetId,
    pub bounds: Rect,
}

/// Slots of one page laid out for one viewport width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotGrid {
    slots: Vec<SlotRect>,
}

impl SlotGrid {
    /// Flow placements left to right, wrapping to a new row when a span
    /// does not fit. A row is as tall as its tallest slot.
    pub fn flow(placements: &[Placement], columns: u8, viewport_width: f64, grid: &GridConfig) -> Self {
        let columns = columns.max(1);
        let gap = grid.gap.max(0.0);
        let column_width = ((viewport_width - gap * f64::from(columns - 1)) / f64::from(columns)).max(0.0);

        let mut slots = Vec::with_capacity(placements.len());
        let mut column = 0u8;
        let mut row_top = 0.0;
        let mut row_height: f64 = 0.0;

        for (index, placement) in placements.iter().enumerate() {
            let span = placement.column_span.units(columns);
            if column > 0 && column + span > columns {
                row_top += row_height + gap;
                row_height = 0.0;
                column = 0;
            }

            let x0 = f64::from(column) * (column_width + gap);
            let width = f64::from(span) * column_width + f64::from(span - 1) * gap;
            let height = grid.heights.height_for(placement.min_height);
            slots.push(SlotRect {
                index,
                widget_id: placement.widget_id.clone(),
                bounds: Rect::new(x0, row_top, x0 + width, row_top + height),
            });

            row_height = row_height.max(height);
            column += span;
        }

        Self { slots }
    }

    pub fn slots(&self) -> &[SlotRect] {
        &self.slots
    }

    /// Index of the slot under a point, if any.
    pub fn slot_at(&self, point: Point) -> Option<usize> {
        self.slots
            .iter()
            .find(|slot| slot.bounds.contains(point))
            .map(|slot| slot.index)
    }

    /// Widget under a point, if any.
    pub fn widget_at(&self, point: Point) -> Option<&str> {
        self.slots
            .iter()
            .find(|slot| slot.bounds.contains(point))
            .map(|slot| slot.widget_id.as_str())
    }
}
