//! Remote content store seam
//!
//! All remote traffic goes through [`Store`] (opens authenticated
//! connections) and [`StoreConnection`] (the per-connection protocol
//! operations). The production binding is [`HttpStore`]; tests use the
//! in-memory double in [`memory`].

pub mod http;
#[cfg(test)]
pub mod memory;

pub use http::HttpStore;

use thiserror::Error;

use crate::credentials::Credentials;

/// Handle to a remote folder, as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderHandle {
    /// Server-side path of the folder, rooted at `/`.
    pub path: String,
}

/// Version kind recorded by a checkin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckinKind {
    Major,
    Minor,
}

impl CheckinKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckinKind::Major => "major",
            CheckinKind::Minor => "minor",
        }
    }
}

/// Errors surfaced by store implementations.
///
/// Kept transport-agnostic: implementations fold their own error types into
/// these two shapes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The connection could not be established
    #[error("connection error: {0}")]
    Connection(String),

    /// A protocol operation failed
    #[error("{op} failed for {path}: {message}")]
    Operation {
        op: &'static str,
        path: String,
        message: String,
    },
}

/// Opens authenticated connections to a remote store.
pub trait Store: Send + Sync {
    fn connect(
        &self,
        url: &str,
        credentials: &Credentials,
    ) -> Result<Box<dyn StoreConnection>, StoreError>;
}

/// One authenticated connection to a site's store.
pub trait StoreConnection {
    /// Ensure the folder at `path` exists, creating every missing
    /// intermediate segment, and return its handle.
    fn ensure_folder(&self, path: &str) -> Result<FolderHandle, StoreError>;

    /// Whether the list backing `path` has minor versioning enabled.
    fn minor_versioning_enabled(&self, path: &str) -> Result<bool, StoreError>;

    /// Upload `content` as `name` into `folder`, replacing any existing file
    /// when `overwrite` is set.
    fn upload_file(
        &self,
        folder: &FolderHandle,
        name: &str,
        content: &[u8],
        overwrite: bool,
    ) -> Result<(), StoreError>;

    /// Check out the file at `file` for editing.
    fn checkout_file(&self, file: &str) -> Result<(), StoreError>;

    /// Check in the file at `file`, recording a new version.
    fn checkin_file(&self, file: &str, kind: CheckinKind, comment: &str) -> Result<(), StoreError>;

    /// Promote the file at `file` to its published state.
    fn publish_file(&self, file: &str, comment: &str) -> Result<(), StoreError>;
}

impl std::fmt::Debug for dyn StoreConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StoreConnection")
    }
}
