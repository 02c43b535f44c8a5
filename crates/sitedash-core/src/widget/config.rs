//! Widget configuration records.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::reorder::Orderable;

/// Stable widget identifier.
pub type WidgetId = String;

/// Identifier of a page hosting its own widget collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Create a page id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The page id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for PageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Size class of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetSize {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
}

impl WidgetSize {
    /// Every size, smallest first.
    pub const ALL: [WidgetSize; 4] = [
        WidgetSize::Small,
        WidgetSize::Medium,
        WidgetSize::Large,
        WidgetSize::ExtraLarge,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::ExtraLarge => "extra-large",
        }
    }
}

impl fmt::Display for WidgetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A configurable dashboard slot.
///
/// Each page keeps its own record of a widget, so `order` is the widget's
/// position on that page only. `size` and `enabled` are kept in sync across
/// pages by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Stable unique identifier.
    pub id: WidgetId,
    /// Display title.
    pub title: String,
    /// Size class.
    pub size: WidgetSize,
    /// Whether the widget is shown.
    pub enabled: bool,
    /// Dense position among the enabled widgets of the owning page.
    pub order: u32,
    /// Pages the widget may appear on.
    pub pages: BTreeSet<PageId>,
    /// Informational grouping (e.g. "projects", "suppliers").
    pub category: String,
}

impl WidgetConfig {
    /// Check if the widget may appear on a page.
    pub fn is_on_page(&self, page: &str) -> bool {
        self.pages.contains(page)
    }
}

impl Orderable for WidgetConfig {
    fn key(&self) -> &str {
        &self.id
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    fn is_active(&self) -> bool {
        self.enabled
    }
}
