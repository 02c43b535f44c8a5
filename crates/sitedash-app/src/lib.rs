//! SiteDash Application
//!
//! Headless host shell: loads configuration and the widget catalog, feeds
//! key presses and pointer events to the dashboard, and persists the layout.

mod app;
mod shortcuts;

pub use app::{
    parse_script, App, AppConfig, AppError, FocusTarget, LayoutReport, RunSummary, ScriptStep,
    SlotReport,
};
pub use shortcuts::{KeyAction, Shortcut, ShortcutRegistry};
