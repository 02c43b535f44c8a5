//! Per-page widget registry.

use std::collections::BTreeMap;

use super::config::{PageId, WidgetConfig, WidgetSize};
use super::reorder::OrderedCollection;
use crate::catalog::Catalog;
use crate::import::FinishedBatch;

/// Owns every page's ordered widget collection.
///
/// Each page holds its own record of a widget. `set_enabled` and `set_size`
/// apply to the widget on every page it belongs to; `move_widget` touches one
/// page only. Every mutator leaves each page's enabled subset densely ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetRegistry {
    pages: BTreeMap<PageId, OrderedCollection<WidgetConfig>>,
}

impl WidgetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from a catalog. Catalog default orders are
    /// placement hints and get compacted per page.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut pages: BTreeMap<PageId, Vec<WidgetConfig>> = BTreeMap::new();
        for entry in catalog.entries() {
            for page in &entry.pages {
                pages.entry(page.clone()).or_default().push(entry.to_config());
            }
        }

        Self {
            pages: pages
                .into_iter()
                .map(|(page, widgets)| (page, OrderedCollection::from_items(widgets)))
                .collect(),
        }
    }

    /// Enabled widgets of a page, sorted by `order` then `id`.
    pub fn list(&self, page: &str) -> Vec<&WidgetConfig> {
        self.pages
            .get(page)
            .map(OrderedCollection::view)
            .unwrap_or_default()
    }

    /// Every widget record of a page, including disabled ones.
    pub fn all(&self, page: &str) -> Vec<&WidgetConfig> {
        self.pages
            .get(page)
            .map(|collection| collection.iter().collect())
            .unwrap_or_default()
    }

    /// Known page ids.
    pub fn pages(&self) -> impl Iterator<Item = &PageId> {
        self.pages.keys()
    }

    /// A widget's record on a page.
    pub fn widget(&self, page: &str, id: &str) -> Option<&WidgetConfig> {
        self.pages.get(page).and_then(|collection| collection.get(id))
    }

    /// Check if a widget id is known on any page.
    pub fn contains(&self, id: &str) -> bool {
        self.pages.values().any(|collection| collection.get(id).is_some())
    }

    /// Live index of a widget in `list(page)`.
    pub fn position(&self, page: &str, id: &str) -> Option<usize> {
        self.pages.get(page).and_then(|collection| collection.position(id))
    }

    /// Show or hide a widget on every page it belongs to.
    ///
    /// Returns `true` if anything changed. Repeating a call with the same
    /// value and naming an unknown id are both no-ops.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        let mut changed = false;
        for (page, collection) in &mut self.pages {
            let Some(widget) = collection.get_mut(id) else {
                continue;
            };
            if widget.enabled == enabled {
                continue;
            }
            widget.enabled = enabled;
            collection.renormalize();
            log::debug!("Widget '{}' on '{}' enabled={}", id, page, enabled);
            changed = true;
        }
        if !changed && !self.contains(id) {
            log::warn!("Ignoring set_enabled for unknown widget '{}'", id);
        }
        changed
    }

    /// Resize a widget on every page it belongs to. Never touches `order`
    /// or `enabled`.
    pub fn set_size(&mut self, id: &str, size: WidgetSize) -> bool {
        let mut changed = false;
        for collection in self.pages.values_mut() {
            if let Some(widget) = collection.get_mut(id) {
                if widget.size != size {
                    widget.size = size;
                    changed = true;
                }
            }
        }
        if changed {
            log::debug!("Widget '{}' resized to {}", id, size);
        } else if !self.contains(id) {
            log::warn!("Ignoring set_size for unknown widget '{}'", id);
        }
        changed
    }

    /// Move the widget at `from` to `to` in the live `list(page)`.
    ///
    /// Indices clamp to the current list; a clamped identity move and an
    /// unknown page are no-ops. Returns `true` if the order changed.
    pub fn move_widget(&mut self, page: &str, from: usize, to: usize) -> bool {
        let Some(collection) = self.pages.get_mut(page) else {
            return false;
        };
        let moved = collection.move_item(from, to);
        if moved {
            log::debug!("Moved widget on '{}' from {} to {}", page, from, to);
        }
        moved
    }

    /// The collection backing a page.
    pub fn collection(&self, page: &str) -> Option<&OrderedCollection<WidgetConfig>> {
        self.pages.get(page)
    }

    /// Swap in a finished import batch.
    ///
    /// Settled `size` and `enabled` values are written to the widget on every
    /// page it is on; `order` is written per page record. Every page is
    /// renormalized before this returns. Returns the number of records
    /// applied.
    pub fn apply(&mut self, batch: FinishedBatch) -> usize {
        let (pages, attributes) = batch.into_parts();

        for collection in self.pages.values_mut() {
            for (id, settled) in &attributes {
                if let Some(widget) = collection.get_mut(id) {
                    widget.size = settled.size;
                    widget.enabled = settled.enabled;
                }
            }
        }

        let mut applied = 0;
        for (page, records) in pages {
            let Some(collection) = self.pages.get_mut(&page) else {
                continue;
            };
            for record in records {
                if let Some(widget) = collection.get_mut(&record.id) {
                    widget.order = record.order;
                    applied += 1;
                }
            }
        }

        for collection in self.pages.values_mut() {
            collection.renormalize();
        }
        log::info!("Applied {} layout records", applied);
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;

    fn abc() -> WidgetRegistry {
        let catalog = Catalog::new(vec![
            CatalogEntry::new("a", "A", "x", &["dashboard"], WidgetSize::Small, 0),
            CatalogEntry::new("b", "B", "x", &["dashboard", "projects"], WidgetSize::Medium, 1),
            CatalogEntry::new("c", "C", "x", &["dashboard"], WidgetSize::Large, 2),
            CatalogEntry::new("d", "D", "x", &["projects"], WidgetSize::Large, 0),
        ])
        .unwrap();
        WidgetRegistry::from_catalog(&catalog)
    }

    fn ids(registry: &WidgetRegistry, page: &str) -> Vec<String> {
        registry.list(page).iter().map(|w| w.id.clone()).collect()
    }

    fn orders(registry: &WidgetRegistry, page: &str) -> Vec<u32> {
        registry.list(page).iter().map(|w| w.order).collect()
    }

    #[test]
    fn test_list_filters_by_page() {
        let registry = abc();
        assert_eq!(ids(&registry, "dashboard"), ["a", "b", "c"]);
        assert_eq!(ids(&registry, "projects"), ["d", "b"]);
    }

    #[test]
    fn test_unknown_page_lists_empty() {
        let registry = abc();
        assert!(registry.list("map").is_empty());
    }

    #[test]
    fn test_scenario_a_move_first_to_last() {
        let mut registry = abc();
        assert!(registry.move_widget("dashboard", 0, 2));
        assert_eq!(ids(&registry, "dashboard"), ["b", "c", "a"]);
        assert_eq!(orders(&registry, "dashboard"), [0, 1, 2]);
    }

    #[test]
    fn test_scenario_b_disable_compacts() {
        let mut registry = abc();
        assert!(registry.set_enabled("b", false));
        assert_eq!(ids(&registry, "dashboard"), ["a", "c"]);
        assert_eq!(orders(&registry, "dashboard"), [0, 1]);
        // Disabled everywhere it appears.
        assert_eq!(ids(&registry, "projects"), ["d"]);
        // Keeps its last order.
        assert_eq!(registry.widget("dashboard", "b").unwrap().order, 1);
    }

    #[test]
    fn test_set_enabled_is_idempotent() {
        let mut registry = abc();
        assert!(!registry.set_enabled("a", true));
        assert!(registry.set_enabled("a", false));
        let snapshot = registry.clone();
        assert!(!registry.set_enabled("a", false));
        assert_eq!(registry, snapshot);
    }

    #[test]
    fn test_reenable_restores_position() {
        let mut registry = abc();
        registry.set_enabled("b", false);
        registry.set_enabled("b", true);
        assert_eq!(ids(&registry, "dashboard"), ["a", "b", "c"]);
        assert_eq!(orders(&registry, "dashboard"), [0, 1, 2]);
    }

    #[test]
    fn test_unknown_ids_are_tolerated() {
        let mut registry = abc();
        let before = registry.clone();
        assert!(!registry.set_enabled("ghost", false));
        assert!(!registry.set_size("ghost", WidgetSize::Small));
        assert_eq!(registry, before);
    }

    #[test]
    fn test_set_size_leaves_order_and_enabled() {
        let mut registry = abc();
        registry.move_widget("dashboard", 2, 0);
        let before: Vec<(String, u32, bool)> = registry
            .all("dashboard")
            .iter()
            .map(|w| (w.id.clone(), w.order, w.enabled))
            .collect();

        for size in WidgetSize::ALL {
            registry.set_size("b", size);
            let after: Vec<(String, u32, bool)> = registry
                .all("dashboard")
                .iter()
                .map(|w| (w.id.clone(), w.order, w.enabled))
                .collect();
            assert_eq!(before, after);
        }
        assert_eq!(registry.widget("projects", "b").unwrap().size, WidgetSize::ExtraLarge);
    }

    #[test]
    fn test_pages_order_independently() {
        let mut registry = abc();
        registry.move_widget("projects", 1, 0);
        assert_eq!(ids(&registry, "projects"), ["b", "d"]);
        assert_eq!(ids(&registry, "dashboard"), ["a", "b", "c"]);
        assert_eq!(registry.widget("projects", "b").unwrap().order, 0);
        assert_eq!(registry.widget("dashboard", "b").unwrap().order, 1);
    }

    #[test]
    fn test_move_on_unknown_page_is_noop() {
        let mut registry = abc();
        assert!(!registry.move_widget("nowhere", 0, 1));
    }
}
