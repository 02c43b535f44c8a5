//! Persisted layout snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::import::{ImportBatch, LayoutRecord};
use crate::widget::{PageId, WidgetRegistry};

/// Current snapshot format version.
pub const LAYOUT_SCHEMA_VERSION: u32 = 1;

/// `(id, size, enabled, order)` of every widget record on every page,
/// disabled ones included so they keep their last `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub schema_version: u32,
    pub pages: BTreeMap<PageId, Vec<LayoutRecord>>,
}

impl Default for LayoutSnapshot {
    fn default() -> Self {
        Self {
            schema_version: LAYOUT_SCHEMA_VERSION,
            pages: BTreeMap::new(),
        }
    }
}

impl LayoutSnapshot {
    /// Capture a registry. Records are sorted by id within each page.
    pub fn capture(registry: &WidgetRegistry) -> Self {
        let pages = registry
            .pages()
            .map(|page| {
                let mut records: Vec<LayoutRecord> = registry
                    .all(page.as_str())
                    .into_iter()
                    .map(|widget| LayoutRecord {
                        id: widget.id.clone(),
                        size: widget.size,
                        enabled: widget.enabled,
                        order: widget.order,
                    })
                    .collect();
                records.sort_by(|a, b| a.id.cmp(&b.id));
                (page.clone(), records)
            })
            .collect();

        Self {
            schema_version: LAYOUT_SCHEMA_VERSION,
            pages,
        }
    }

    /// Records of one page.
    pub fn records(&self, page: &str) -> &[LayoutRecord] {
        self.pages.get(page).map(Vec::as_slice).unwrap_or_default()
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON. Newer schema versions are read as the current
    /// one, with a warning.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.schema_version > LAYOUT_SCHEMA_VERSION {
            log::warn!(
                "Layout snapshot schema_version={} is newer than {}; reading as v{}",
                snapshot.schema_version,
                LAYOUT_SCHEMA_VERSION,
                LAYOUT_SCHEMA_VERSION
            );
        }
        Ok(snapshot)
    }

    /// Queue every record for import.
    pub fn into_batch(self) -> ImportBatch {
        let mut batch = ImportBatch::new();
        for (page, records) in self.pages {
            for record in records {
                batch.push(page.clone(), record);
            }
        }
        batch
    }
}
