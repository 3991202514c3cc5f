//! Remote folder resolution with per-run caching
//!
//! The store materializes folders lazily. One [`FolderResolver`] lives for
//! one site synchronization run; it guarantees at most one remote ensure
//! call per distinct normalized path, so re-visiting a destination
//! subdirectory costs nothing.

use std::collections::HashMap;

use crate::paths::normalize_remote;
use crate::store::{FolderHandle, StoreConnection, StoreError};

/// Per-run cache of normalized remote path → folder handle.
#[derive(Default)]
pub struct FolderResolver {
    cache: HashMap<String, FolderHandle>,
}

impl FolderResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure the folder at `path` exists and return its handle.
    ///
    /// Cache hits return the stored handle with zero remote calls.
    pub fn ensure(
        &mut self,
        conn: &dyn StoreConnection,
        path: &str,
    ) -> Result<FolderHandle, StoreError> {
        let normalized = normalize_remote(path);
        if let Some(handle) = self.cache.get(&normalized) {
            return Ok(handle.clone());
        }

        let handle = conn.ensure_folder(&normalized)?;
        self.cache.insert(normalized, handle.clone());
        Ok(handle)
    }
}
