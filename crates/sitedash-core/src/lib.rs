//! SiteDash Core Library
//!
//! Layout and reorder engine for the construction-management dashboard:
//! screen classification, size-to-slot resolution, the per-page widget
//! registry, and the edit-mode drag state machine. Everything here is
//! platform-agnostic; hosts feed it [`DashboardEvent`]s and render the
//! resulting [`Placement`]s.

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod drag;
pub mod edit_mode;
pub mod import;
pub mod input;
pub mod layout;
pub mod slots;
pub mod storage;
pub mod widget;

pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use config::{Breakpoints, ConfigError, DashboardConfig, GridConfig, HeightTable};
pub use dashboard::{Dashboard, EventOutcome};
pub use drag::{DragEnd, DragEndReason, DragManager, DragSession, DragState, InputMode, StepDirection};
pub use edit_mode::EditModeController;
pub use import::{FinishedBatch, ImportBatch, LayoutRecord};
pub use input::DashboardEvent;
pub use layout::{ColumnSpan, HeightClass, Placement, ScreenClass, SlotLayout};
pub use slots::{SlotGrid, SlotRect};
pub use storage::{AutoSaveManager, FileStorage, LayoutSnapshot, MemoryStorage, Storage, StorageError};
pub use widget::{OrderedCollection, Orderable, PageId, WidgetConfig, WidgetId, WidgetRegistry, WidgetSize};
