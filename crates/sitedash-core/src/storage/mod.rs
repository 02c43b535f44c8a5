//! Storage abstraction for layout persistence.

mod autosave;
mod file;
mod memory;
mod snapshot;

pub use autosave::{AutoSaveManager, create_default_storage, DEFAULT_LAYOUT_KEY};
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use snapshot::{LayoutSnapshot, LAYOUT_SCHEMA_VERSION};

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Layout not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait for layout storage backends, keyed by an installation or user id.
pub trait Storage: Send + Sync {
    /// Save a layout.
    fn save(&self, id: &str, snapshot: &LayoutSnapshot) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a layout.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<LayoutSnapshot>>;

    /// Delete a layout.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all layout IDs.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;
}

/// Minimal executor for driving storage futures in tests.
#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
