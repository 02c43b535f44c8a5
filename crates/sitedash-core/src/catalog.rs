//! Static widget catalog supplied once per installation.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::widget::{PageId, WidgetConfig, WidgetId, WidgetSize};

/// Catalog errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Widget id cannot be empty")]
    EmptyId,
    #[error("Widget '{0}' title cannot be empty")]
    EmptyTitle(WidgetId),
    #[error("Widget '{0}' is listed twice")]
    DuplicateId(WidgetId),
    #[error("Widget '{0}' is not assigned to any page")]
    NoPages(WidgetId),
    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

fn default_enabled() -> bool {
    true
}

fn default_category() -> String {
    "general".to_string()
}

/// One catalog entry: the defaults a widget starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: WidgetId,
    pub title: String,
    pub pages: BTreeSet<PageId>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub default_size: WidgetSize,
    #[serde(default)]
    pub default_order: u32,
    #[serde(default = "default_enabled")]
    pub default_enabled: bool,
}

impl CatalogEntry {
    /// Create an enabled entry on the given pages.
    pub fn new(
        id: &str,
        title: &str,
        category: &str,
        pages: &[&str],
        default_size: WidgetSize,
        default_order: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            pages: pages.iter().copied().map(PageId::from).collect(),
            category: category.to_string(),
            default_size,
            default_order,
            default_enabled: true,
        }
    }

    /// Start disabled.
    pub fn disabled(mut self) -> Self {
        self.default_enabled = false;
        self
    }

    /// The initial config of this widget on one page.
    pub fn to_config(&self) -> WidgetConfig {
        WidgetConfig {
            id: self.id.clone(),
            title: self.title.clone(),
            size: self.default_size,
            enabled: self.default_enabled,
            order: self.default_order,
            pages: self.pages.clone(),
            category: self.category.clone(),
        }
    }

    fn normalize(&mut self) {
        self.id = self.id.trim().to_string();
        self.title = self.title.trim().to_string();
    }
}

/// A validated set of catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Validate entries into a catalog.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut validated = Vec::with_capacity(entries.len());
        for mut entry in entries {
            entry.normalize();
            if entry.id.is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if entry.title.is_empty() {
                return Err(CatalogError::EmptyTitle(entry.id));
            }
            if entry.pages.is_empty() {
                return Err(CatalogError::NoPages(entry.id));
            }
            if !seen.insert(entry.id.clone()) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
            validated.push(entry);
        }
        Ok(Self { entries: validated })
    }

    /// Parse a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// The catalog shipped with the dashboard.
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Every page referenced by an entry.
    pub fn pages(&self) -> BTreeSet<PageId> {
        self.entries
            .iter()
            .flat_map(|entry| entry.pages.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn builtin_entries() -> Vec<CatalogEntry> {
    use WidgetSize::*;

    vec![
        CatalogEntry::new("project-summary", "Project Summary", "projects", &["dashboard", "projects"], Large, 0),
        CatalogEntry::new("active-tenders", "Active Tenders", "tenders", &["dashboard", "tenders"], Medium, 1),
        CatalogEntry::new("itt-responses", "ITT Responses", "tenders", &["dashboard", "tenders"], Medium, 2),
        CatalogEntry::new("upcoming-deadlines", "Upcoming Deadlines", "projects", &["dashboard"], Small, 3),
        CatalogEntry::new("budget-overview", "Budget Overview", "finance", &["dashboard", "projects"], Medium, 4),
        CatalogEntry::new("project-map", "Project Map", "maps", &["dashboard", "map"], ExtraLarge, 5),
        CatalogEntry::new("recent-activity", "Recent Activity", "general", &["dashboard"], Small, 6).disabled(),
        CatalogEntry::new("work-packages", "Work Packages", "projects", &["projects", "tenders"], Large, 0),
        CatalogEntry::new("supplier-directory", "Supplier Directory", "suppliers", &["suppliers"], ExtraLarge, 0),
        CatalogEntry::new("supplier-ratings", "Supplier Ratings", "suppliers", &["suppliers"], Medium, 1),
        CatalogEntry::new("supplier-regions", "Supplier Regions", "maps", &["suppliers", "map"], Large, 2),
        CatalogEntry::new("itt-composer", "ITT Composer", "tenders", &["tenders"], Large, 3).disabled(),
    ]
}
