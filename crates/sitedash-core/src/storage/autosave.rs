//! Auto-save of the dashboard layout.
//!
//! The host marks the layout dirty after every committed mutation and calls
//! [`AutoSaveManager::maybe_save`] from its loop; saves are throttled to the
//! configured interval.

use crate::config::{DashboardConfig, DEFAULT_AUTOSAVE_INTERVAL_SECS};
use crate::storage::{FileStorage, LayoutSnapshot, Storage, StorageResult};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Key used when no layout id has been set.
pub const DEFAULT_LAYOUT_KEY: &str = "default";

/// Manages throttled layout persistence.
pub struct AutoSaveManager<S: Storage> {
    storage: Arc<S>,
    interval: Duration,
    last_save: Option<Instant>,
    dirty: bool,
    /// Installation or user key the layout is saved under.
    layout_id: Option<String>,
}

impl<S: Storage> AutoSaveManager<S> {
    /// Create a new auto-save manager with the given storage backend.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            last_save: None,
            dirty: false,
            layout_id: None,
        }
    }

    /// Create a manager using the configured interval.
    pub fn with_config(storage: Arc<S>, config: &DashboardConfig) -> Self {
        let mut manager = Self::new(storage);
        manager.set_interval(Duration::from_secs(config.autosave_interval_secs));
        manager
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Mark the layout as having unsaved changes.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_layout_id(&mut self, id: Option<String>) {
        self.layout_id = id;
    }

    /// The key saves go to.
    pub fn layout_id(&self) -> &str {
        self.layout_id.as_deref().unwrap_or(DEFAULT_LAYOUT_KEY)
    }

    /// Dirty and the interval has elapsed since the last save.
    pub fn should_save(&self) -> bool {
        if !self.dirty {
            return false;
        }

        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Save the layout if needed. Returns true if a save was performed.
    pub async fn maybe_save(&mut self, snapshot: &LayoutSnapshot) -> StorageResult<bool> {
        if !self.should_save() {
            return Ok(false);
        }

        self.save(snapshot).await?;
        Ok(true)
    }

    /// Force save the layout immediately.
    pub async fn save(&mut self, snapshot: &LayoutSnapshot) -> StorageResult<()> {
        let id = self.layout_id().to_string();

        self.storage.save(&id, snapshot).await?;

        self.last_save = Some(Instant::now());
        self.dirty = false;
        log::info!("Saved layout '{}'", id);

        Ok(())
    }

    /// Load the layout saved under the current key.
    pub async fn load(&mut self) -> StorageResult<LayoutSnapshot> {
        let snapshot = self.storage.load(self.layout_id()).await?;
        self.dirty = false;
        self.last_save = Some(Instant::now());
        Ok(snapshot)
    }

    /// Delete the layout saved under the current key and start clean.
    pub async fn reset(&mut self) -> StorageResult<()> {
        let id = self.layout_id().to_string();
        self.storage.delete(&id).await?;
        self.dirty = false;
        self.last_save = None;
        log::info!("Deleted saved layout '{}'", id);
        Ok(())
    }
}

/// Create file storage in the default data directory.
pub fn create_default_storage() -> StorageResult<Arc<FileStorage>> {
    Ok(Arc::new(FileStorage::default_location()?))
}
