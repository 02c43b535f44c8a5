//! Core application state and lifecycle.
//!
//! The shell owns one [`Dashboard`], translates key presses into dashboard
//! events using the keyboard focus, and keeps an optional auto-save manager
//! in step with committed layout changes.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use sitedash_core::storage::{AutoSaveManager, Storage, StorageError};
use sitedash_core::{
    Catalog, CatalogError, ColumnSpan, ConfigError, Dashboard, DashboardConfig, DashboardEvent,
    DragEndReason, EventOutcome, HeightClass, InputMode, PageId, ScreenClass, StepDirection,
    WidgetId,
};
use thiserror::Error;

use crate::shortcuts::{KeyAction, ShortcutRegistry};

/// Errors surfaced by the shell.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid event script: {0}")]
    Script(#[source] serde_json::Error),
}

/// Startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dashboard: DashboardConfig,
    pub catalog: Catalog,
    /// Initial viewport width; `None` classifies as desktop.
    pub viewport_width: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dashboard: DashboardConfig::default(),
            catalog: Catalog::builtin(),
            viewport_width: None,
        }
    }
}

impl AppConfig {
    /// Load the dashboard config and widget catalog from JSON files, falling
    /// back to the defaults and the built-in catalog.
    pub fn load(config_path: Option<&Path>, catalog_path: Option<&Path>) -> Result<Self, AppError> {
        let dashboard = match config_path {
            Some(path) => DashboardConfig::load(path)?,
            None => DashboardConfig::default(),
        };
        let catalog = match catalog_path {
            Some(path) => {
                let json = fs::read_to_string(path).map_err(|source| AppError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                Catalog::from_json(&json)?
            }
            None => Catalog::builtin(),
        };
        log::info!(
            "Loaded {} catalog widgets across {} pages",
            catalog.len(),
            catalog.pages().len()
        );
        Ok(Self {
            dashboard,
            catalog,
            viewport_width: None,
        })
    }
}

/// The widget keyboard actions apply to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusTarget {
    pub page: PageId,
    pub widget_id: WidgetId,
}

/// One step of an event script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    /// A key press, e.g. `{ "key": "ArrowRight" }`.
    Key { key: String },
    /// Move keyboard focus, e.g. `{ "focus": { "page": "dashboard", "widget_id": "project-map" } }`.
    Focus { focus: FocusTarget },
    /// Any dashboard event, e.g. `{ "type": "pointer_down", ... }`.
    Event(DashboardEvent),
}

/// Parse a JSON array of script steps.
pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>, AppError> {
    serde_json::from_str(json).map_err(AppError::Script)
}

/// What a script run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub events: usize,
    pub layout_changes: usize,
    pub drag_ends: Vec<DragEndReason>,
    pub saves: usize,
}

/// One rendered slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotReport {
    pub widget_id: WidgetId,
    pub column_span: ColumnSpan,
    pub min_height: HeightClass,
    pub bounds: Rect,
}

/// Placements of every page for the current viewport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutReport {
    pub screen: ScreenClass,
    pub edit_mode: bool,
    pub pages: BTreeMap<PageId, Vec<SlotReport>>,
}

/// Headless dashboard host.
pub struct App<S: Storage> {
    dashboard: Dashboard,
    autosave: Option<AutoSaveManager<S>>,
    focus: Option<FocusTarget>,
}

impl<S: Storage> App<S> {
    pub fn new(config: AppConfig) -> Self {
        let mut dashboard = Dashboard::new(&config.catalog, config.dashboard);
        dashboard.set_viewport_width(config.viewport_width);
        Self {
            dashboard,
            autosave: None,
            focus: None,
        }
    }

    /// Persist committed layout changes through `manager`.
    pub fn with_autosave(mut self, manager: AutoSaveManager<S>) -> Self {
        self.autosave = Some(manager);
        self
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn set_focus(&mut self, focus: Option<FocusTarget>) {
        self.focus = focus;
    }

    /// Restore the layout saved under the auto-save key, if any.
    pub async fn restore_saved(&mut self) -> Result<bool, AppError> {
        let Some(manager) = self.autosave.as_mut() else {
            return Ok(false);
        };
        let id = manager.layout_id().to_string();
        match manager.load().await {
            Ok(snapshot) => {
                for warning in self.dashboard.restore(snapshot) {
                    log::warn!("Saved layout '{}': {}", id, warning);
                }
                log::info!("Restored layout '{}'", id);
                Ok(true)
            }
            Err(StorageError::NotFound(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the saved layout so the next run starts from catalog defaults.
    pub async fn reset_saved(&mut self) -> Result<(), AppError> {
        if let Some(manager) = self.autosave.as_mut() {
            manager.reset().await?;
        }
        Ok(())
    }

    /// Event for a key press, given the current focus and drag state.
    pub fn key_event(&self, key: &str) -> Option<DashboardEvent> {
        let action = ShortcutRegistry::action_for(key)?;
        match action {
            KeyAction::StepBackward => Some(DashboardEvent::Step {
                direction: StepDirection::Backward,
            }),
            KeyAction::StepForward => Some(DashboardEvent::Step {
                direction: StepDirection::Forward,
            }),
            KeyAction::PickUpOrDrop if self.dashboard.edit_mode().drag().is_dragging() => {
                Some(DashboardEvent::Drop)
            }
            KeyAction::PickUpOrDrop => self.focus.as_ref().map(|focus| DashboardEvent::PickUp {
                page: focus.page.clone(),
                widget_id: focus.widget_id.clone(),
                mode: InputMode::Keyboard,
            }),
            KeyAction::Cancel => Some(DashboardEvent::Cancel),
            KeyAction::ToggleEditMode => Some(DashboardEvent::ToggleEditMode),
        }
    }

    /// Deliver one event to the dashboard.
    pub fn dispatch(&mut self, event: DashboardEvent) -> EventOutcome {
        let outcome = self.dashboard.handle_event(event);
        if let Some(end) = &outcome.drag_end {
            log::debug!(
                "Drag of '{}' on '{}' ended: {:?}",
                end.session.active_widget_id,
                end.session.page,
                end.reason
            );
        }
        if self.dashboard.take_dirty() {
            if let Some(manager) = self.autosave.as_mut() {
                manager.mark_dirty();
            }
        }
        outcome
    }

    /// Replay a script, saving on the auto-save interval and once more at the
    /// end if anything is unsaved.
    pub async fn run(&mut self, steps: Vec<ScriptStep>) -> Result<RunSummary, AppError> {
        let mut summary = RunSummary::default();

        for step in steps {
            let event = match step {
                ScriptStep::Key { key } => match self.key_event(&key) {
                    Some(event) => event,
                    None => {
                        log::debug!("Key '{}' does nothing here", key);
                        continue;
                    }
                },
                ScriptStep::Focus { focus } => {
                    self.focus = Some(focus);
                    continue;
                }
                ScriptStep::Event(event) => event,
            };

            let outcome = self.dispatch(event);
            summary.events += 1;
            if outcome.layout_changed {
                summary.layout_changes += 1;
            }
            if let Some(end) = outcome.drag_end {
                summary.drag_ends.push(end.reason);
            }

            if let Some(manager) = self.autosave.as_mut() {
                if manager.maybe_save(&self.dashboard.snapshot()).await? {
                    summary.saves += 1;
                }
            }
        }

        if let Some(manager) = self.autosave.as_mut() {
            if manager.is_dirty() {
                manager.save(&self.dashboard.snapshot()).await?;
                summary.saves += 1;
            }
        }

        Ok(summary)
    }

    /// Current placements and slot bounds of every page.
    pub fn report(&self) -> LayoutReport {
        let pages = self
            .dashboard
            .registry()
            .pages()
            .map(|page| {
                let placements = self.dashboard.placements(page.as_str());
                let grid = self.dashboard.slot_grid(page.as_str());
                let slots = placements
                    .into_iter()
                    .zip(grid.slots())
                    .map(|(placement, slot)| SlotReport {
                        widget_id: placement.widget_id,
                        column_span: placement.column_span,
                        min_height: placement.min_height,
                        bounds: slot.bounds,
                    })
                    .collect();
                (page.clone(), slots)
            })
            .collect();

        LayoutReport {
            screen: self.dashboard.screen_class(),
            edit_mode: self.dashboard.edit_mode().is_active(),
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitedash_core::storage::{FileStorage, LayoutSnapshot, MemoryStorage};
    use std::sync::Arc;
    use std::time::Duration;

    fn dashboard_ids<S: Storage>(app: &App<S>) -> Vec<String> {
        app.dashboard()
            .registry()
            .list("dashboard")
            .iter()
            .map(|w| w.id.clone())
            .collect()
    }

    fn key(name: &str) -> ScriptStep {
        ScriptStep::Key { key: name.to_string() }
    }

    fn focus(widget_id: &str) -> ScriptStep {
        ScriptStep::Focus {
            focus: FocusTarget {
                page: PageId::from("dashboard"),
                widget_id: widget_id.to_string(),
            },
        }
    }

    #[test]
    fn test_keyboard_reorder() {
        let mut app: App<MemoryStorage> = App::new(AppConfig::default());
        let steps = vec![key("E"), focus("project-summary"), key("Space"), key("ArrowRight"), key("Enter")];

        let summary = pollster::block_on(app.run(steps)).unwrap();

        assert_eq!(summary.layout_changes, 1);
        assert_eq!(summary.drag_ends, vec![DragEndReason::Dropped]);
        assert_eq!(&dashboard_ids(&app)[..2], ["active-tenders", "project-summary"]);
    }

    #[test]
    fn test_keys_do_nothing_outside_edit_mode() {
        let mut app: App<MemoryStorage> = App::new(AppConfig::default());
        let before = dashboard_ids(&app);
        let steps = vec![focus("project-summary"), key("Space"), key("ArrowRight"), key("Space")];

        let summary = pollster::block_on(app.run(steps)).unwrap();

        assert_eq!(summary.layout_changes, 0);
        assert!(summary.drag_ends.is_empty());
        assert_eq!(dashboard_ids(&app), before);
    }

    #[test]
    fn test_pick_up_without_focus_is_ignored() {
        let mut app: App<MemoryStorage> = App::new(AppConfig::default());
        app.dispatch(DashboardEvent::ToggleEditMode);
        assert_eq!(app.key_event("Space"), None);

        app.set_focus(Some(FocusTarget {
            page: PageId::from("dashboard"),
            widget_id: "project-map".to_string(),
        }));
        assert!(matches!(app.key_event("Space"), Some(DashboardEvent::PickUp { .. })));
    }

    #[test]
    fn test_run_saves_and_restores() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = AutoSaveManager::new(storage.clone());
        manager.set_interval(Duration::from_secs(3600));
        let mut app = App::new(AppConfig::default()).with_autosave(manager);

        let steps = vec![key("E"), focus("budget-overview"), key("Enter"), key("ArrowLeft"), key("Escape")];
        let summary = pollster::block_on(app.run(steps)).unwrap();
        assert_eq!(summary.drag_ends, vec![DragEndReason::Cancelled]);
        assert_eq!(summary.saves, 1);

        let saved = pollster::block_on(storage.load("default")).unwrap();
        assert_eq!(saved, app.dashboard().snapshot());

        let mut restored = App::new(AppConfig::default()).with_autosave(AutoSaveManager::new(storage));
        assert!(pollster::block_on(restored.restore_saved()).unwrap());
        assert_eq!(dashboard_ids(&restored), dashboard_ids(&app));
    }

    #[test]
    fn test_reset_discards_saved_layout() {
        let storage = Arc::new(MemoryStorage::new());
        let mut app = App::new(AppConfig::default()).with_autosave(AutoSaveManager::new(storage.clone()));
        let steps = vec![key("E"), focus("project-map"), key("Space"), key("ArrowLeft"), key("Space")];
        pollster::block_on(app.run(steps)).unwrap();
        assert_eq!(pollster::block_on(storage.list()).unwrap().len(), 1);

        pollster::block_on(app.reset_saved()).unwrap();

        let mut fresh = App::new(AppConfig::default()).with_autosave(AutoSaveManager::new(storage));
        assert!(!pollster::block_on(fresh.restore_saved()).unwrap());
    }

    #[test]
    fn test_restore_without_saved_layout() {
        let manager = AutoSaveManager::new(Arc::new(MemoryStorage::new()));
        let mut app = App::new(AppConfig::default()).with_autosave(manager);
        assert!(!pollster::block_on(app.restore_saved()).unwrap());
    }

    #[test]
    fn test_nothing_saved_when_layout_unchanged() {
        let storage = Arc::new(MemoryStorage::new());
        let mut app = App::new(AppConfig::default()).with_autosave(AutoSaveManager::new(storage.clone()));

        let summary = pollster::block_on(app.run(vec![key("E"), key("E")])).unwrap();

        assert_eq!(summary.saves, 0);
        assert!(pollster::block_on(storage.list()).unwrap().is_empty());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(FileStorage::new(dir.path().to_path_buf()).unwrap());
        let mut manager = AutoSaveManager::new(storage.clone());
        manager.set_layout_id(Some("site-office".to_string()));
        let mut app = App::new(AppConfig::default()).with_autosave(manager);

        let steps = parse_script(
            r#"[
                { "type": "set_edit_mode", "active": true },
                { "type": "set_enabled", "widget_id": "project-map", "enabled": false }
            ]"#,
        )
        .unwrap();
        pollster::block_on(app.run(steps)).unwrap();

        let json = std::fs::read_to_string(dir.path().join("site-office.json")).unwrap();
        let saved = LayoutSnapshot::from_json(&json).unwrap();
        let record = saved
            .records("map")
            .iter()
            .find(|r| r.id == "project-map")
            .unwrap();
        assert!(!record.enabled);
    }

    #[test]
    fn test_parse_mixed_script() {
        let steps = parse_script(
            r#"[
                { "key": "E" },
                { "focus": { "page": "tenders", "widget_id": "work-packages" } },
                { "type": "resize", "width": 800 }
            ]"#,
        )
        .unwrap();

        assert_eq!(steps[0], key("E"));
        assert!(matches!(&steps[1], ScriptStep::Focus { focus } if focus.widget_id == "work-packages"));
        assert_eq!(steps[2], ScriptStep::Event(DashboardEvent::Resize { width: Some(800) }));
        assert!(matches!(parse_script("{"), Err(AppError::Script(_))));
    }

    #[test]
    fn test_report_on_mobile_spans_full_width() {
        let config = AppConfig {
            viewport_width: Some(500),
            ..AppConfig::default()
        };
        let app: App<MemoryStorage> = App::new(config);
        let report = app.report();

        assert_eq!(report.screen, ScreenClass::Mobile);
        assert!(!report.edit_mode);
        let dashboard = &report.pages[&PageId::from("dashboard")];
        assert_eq!(dashboard.len(), app.dashboard().registry().list("dashboard").len());
        assert!(dashboard.iter().all(|slot| slot.column_span == ColumnSpan::Full));
        assert!(dashboard.windows(2).all(|w| w[0].bounds.y1 <= w[1].bounds.y0));
    }

    #[test]
    fn test_config_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        let catalog_path = dir.path().join("catalog.json");
        std::fs::write(&config_path, r#"{ "autosave_interval_secs": 5 }"#).unwrap();
        std::fs::write(
            &catalog_path,
            r#"[ { "id": "cashflow", "title": "Cashflow", "pages": ["dashboard"] } ]"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&config_path), Some(&catalog_path)).unwrap();
        assert_eq!(config.dashboard.autosave_interval_secs, 5);
        assert_eq!(config.catalog.len(), 1);

        let missing = AppConfig::load(None, Some(&dir.path().join("nope.json")));
        assert!(matches!(missing, Err(AppError::Io { .. })));

        std::fs::write(
            &config_path,
            r#"{ "breakpoints": { "tablet_min_width": 1200, "desktop_min_width": 1024 } }"#,
        )
        .unwrap();
        assert!(matches!(
            AppConfig::load(Some(&config_path), None),
            Err(AppError::Config(ConfigError::Invalid(_)))
        ));
    }
}
