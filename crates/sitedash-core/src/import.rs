//! Import boundary for layout records coming from outside the registry.
//!
//! Persisted snapshots and external merges produce loose `(page, id, size,
//! enabled, order)` records with no guarantee of density or uniqueness. They
//! are collected into an [`ImportBatch`], checked against the registry, and
//! renormalized per page by [`ImportBatch::finish`]. Only the resulting
//! [`FinishedBatch`] can be applied, so the reorder engine never sees a
//! partially imported page.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::widget::{OrderedCollection, Orderable, PageId, WidgetId, WidgetRegistry, WidgetSize};

/// Persistable layout state of one widget on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRecord {
    pub id: WidgetId,
    pub size: WidgetSize,
    pub enabled: bool,
    pub order: u32,
}

impl Orderable for LayoutRecord {
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

/// Records being collected for import.
#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    pages: BTreeMap<PageId, Vec<LayoutRecord>>,
}

impl ImportBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a record for a page.
    pub fn push(&mut self, page: impl Into<PageId>, record: LayoutRecord) {
        self.pages.entry(page.into()).or_default().push(record);
    }

    /// Number of queued records.
    pub fn len(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate against the registry and renormalize every page.
    ///
    /// Records for unknown pages or for widgets not on that page are dropped.
    /// A repeated `(page, id)` keeps the first record. `size` and `enabled`
    /// belong to the widget, not the page: the first kept record of a widget
    /// (pages in name order) settles them, and later records that disagree
    /// are rewritten to match. Each warning names the affected record.
    pub fn finish(self, registry: &WidgetRegistry) -> FinishedBatch {
        let mut warnings = Vec::new();
        let mut kept_pages: BTreeMap<PageId, Vec<LayoutRecord>> = BTreeMap::new();

        for (page, records) in self.pages {
            if registry.collection(page.as_str()).is_none() {
                warnings.push(format!(
                    "dropped {} record(s) for unknown page '{}'",
                    records.len(),
                    page
                ));
                continue;
            }

            let mut kept: Vec<LayoutRecord> = Vec::with_capacity(records.len());
            for record in records {
                if registry.widget(page.as_str(), &record.id).is_none() {
                    warnings.push(format!("dropped unknown widget '{}' on '{}'", record.id, page));
                } else if kept.iter().any(|existing| existing.id == record.id) {
                    warnings.push(format!("dropped duplicate widget '{}' on '{}'", record.id, page));
                } else {
                    kept.push(record);
                }
            }
            kept_pages.insert(page, kept);
        }

        let mut attributes: BTreeMap<WidgetId, WidgetAttributes> = BTreeMap::new();
        for (page, records) in &mut kept_pages {
            for record in records.iter_mut() {
                let settled = *attributes
                    .entry(record.id.clone())
                    .or_insert(WidgetAttributes::of(record));
                if settled != WidgetAttributes::of(record) {
                    warnings.push(format!(
                        "widget '{}' on '{}' disagrees with its other pages; using size={} enabled={}",
                        record.id, page, settled.size, settled.enabled
                    ));
                    record.size = settled.size;
                    record.enabled = settled.enabled;
                }
            }
        }

        let pages = kept_pages
            .into_iter()
            .map(|(page, records)| {
                let collection = OrderedCollection::from_items(records);
                (page, collection.iter().cloned().collect())
            })
            .collect();

        for warning in &warnings {
            log::warn!("Layout import: {}", warning);
        }

        FinishedBatch {
            pages,
            attributes,
            warnings,
        }
    }
}

/// Widget-level state shared by every page a widget is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WidgetAttributes {
    pub size: WidgetSize,
    pub enabled: bool,
}

impl WidgetAttributes {
    fn of(record: &LayoutRecord) -> Self {
        Self {
            size: record.size,
            enabled: record.enabled,
        }
    }
}

/// A validated, densely ordered batch ready for [`WidgetRegistry::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinishedBatch {
    pages: BTreeMap<PageId, Vec<LayoutRecord>>,
    attributes: BTreeMap<WidgetId, WidgetAttributes>,
    warnings: Vec<String>,
}

impl FinishedBatch {
    /// Records dropped or rewritten while finishing.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Records of one page.
    pub fn records(&self, page: &str) -> &[LayoutRecord] {
        self.pages.get(page).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn into_parts(
        self,
    ) -> (BTreeMap<PageId, Vec<LayoutRecord>>, BTreeMap<WidgetId, WidgetAttributes>) {
        (self.pages, self.attributes)
    }
}
