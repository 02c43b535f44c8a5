//! In-memory storage implementation.

use super::{BoxFuture, LayoutSnapshot, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for tests and sessions that should not persist.
#[derive(Default)]
pub struct MemoryStorage {
    layouts: RwLock<HashMap<String, LayoutSnapshot>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, snapshot: &LayoutSnapshot) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let snapshot = snapshot.clone();
        Box::pin(async move {
            let mut layouts = self.layouts.write().map_err(lock_error)?;
            layouts.insert(id, snapshot);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<LayoutSnapshot>> {
        let id = id.to_string();
        Box::pin(async move {
            let layouts = self.layouts.read().map_err(lock_error)?;
            layouts.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut layouts = self.layouts.write().map_err(lock_error)?;
            layouts.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let layouts = self.layouts.read().map_err(lock_error)?;
            Ok(layouts.keys().cloned().collect())
        })
    }
}
