//! Responsive screen classification and widget size resolution.
//!
//! Both are pure lookups: the same inputs always give the same outputs.

use serde::{Deserialize, Serialize};

use crate::config::Breakpoints;
use crate::widget::{WidgetConfig, WidgetId, WidgetSize};

/// Bucketed viewport width category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenClass {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl ScreenClass {
    pub const ALL: [ScreenClass; 3] = [ScreenClass::Mobile, ScreenClass::Tablet, ScreenClass::Desktop];

    /// Classify a viewport width. A missing or zero width is a desktop.
    pub fn classify(width: Option<u32>, breakpoints: &Breakpoints) -> Self {
        match width {
            None | Some(0) => Self::Desktop,
            Some(w) if w < breakpoints.tablet_min_width => Self::Mobile,
            Some(w) if w < breakpoints.desktop_min_width => Self::Tablet,
            Some(_) => Self::Desktop,
        }
    }

    /// Number of grid columns at this screen class.
    pub fn columns(self) -> u8 {
        match self {
            Self::Mobile => 1,
            Self::Tablet => 2,
            Self::Desktop => 3,
        }
    }
}

/// Horizontal extent of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSpan {
    /// A fixed number of column units.
    Units(u8),
    /// The whole row.
    Full,
}

impl ColumnSpan {
    /// Column units occupied in a grid of `columns` columns.
    pub fn units(self, columns: u8) -> u8 {
        let columns = columns.max(1);
        match self {
            Self::Units(n) => n.clamp(1, columns),
            Self::Full => columns,
        }
    }
}

/// Minimum height bucket of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeightClass {
    Short,
    Regular,
    Tall,
    ExtraTall,
}

/// Grid span and height class for one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotLayout {
    pub column_span: ColumnSpan,
    pub min_height: HeightClass,
}

/// Resolve a widget size at a screen class.
pub fn resolve(size: WidgetSize, screen: ScreenClass) -> SlotLayout {
    let column_span = match (screen, size) {
        (ScreenClass::Mobile, _) => ColumnSpan::Full,
        (ScreenClass::Tablet, WidgetSize::Small | WidgetSize::Medium) => ColumnSpan::Units(1),
        (ScreenClass::Tablet, WidgetSize::Large | WidgetSize::ExtraLarge) => ColumnSpan::Units(2),
        (ScreenClass::Desktop, WidgetSize::Small | WidgetSize::Medium) => ColumnSpan::Units(1),
        (ScreenClass::Desktop, WidgetSize::Large) => ColumnSpan::Units(2),
        (ScreenClass::Desktop, WidgetSize::ExtraLarge) => ColumnSpan::Units(3),
    };
    let min_height = match size {
        WidgetSize::Small => HeightClass::Short,
        WidgetSize::Medium => HeightClass::Regular,
        WidgetSize::Large => HeightClass::Tall,
        WidgetSize::ExtraLarge => HeightClass::ExtraTall,
    };
    SlotLayout {
        column_span,
        min_height,
    }
}

/// Placement data handed to the external renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub widget_id: WidgetId,
    pub column_span: ColumnSpan,
    pub min_height: HeightClass,
}

/// Resolve an ordered widget list into placements, keeping its order.
pub fn placements(widgets: &[&WidgetConfig], screen: ScreenClass) -> Vec<Placement> {
    widgets
        .iter()
        .map(|widget| {
            let slot = resolve(widget.size, screen);
            Placement {
                widget_id: widget.id.clone(),
                column_span: slot.column_span,
                min_height: slot.min_height,
            }
        })
        .collect()
}
