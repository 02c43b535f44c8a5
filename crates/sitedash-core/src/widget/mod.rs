//! Widget records, the per-page registry, and the reorder engine.
//!
//! Widgets are pure configuration: identity, size class, page membership,
//! and a dense per-page `order`. Rendering what sits inside a slot is left
//! to the host.

mod config;
mod registry;
mod reorder;

pub use config::{PageId, WidgetConfig, WidgetId, WidgetSize};
pub use registry::WidgetRegistry;
pub use reorder::{OrderedCollection, Orderable};
