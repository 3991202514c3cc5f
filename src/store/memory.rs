//! In-memory store double for tests
//!
//! Records every protocol operation in arrival order so tests can assert on
//! exact call sequences (ensure/probe/checkout/upload/checkin/publish).
//! Versioning metadata and per-path failures are configurable.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::credentials::Credentials;
use crate::store::{CheckinKind, FolderHandle, Store, StoreConnection, StoreError};

/// One recorded protocol operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Connect { url: String, username: String },
    EnsureFolder(String),
    Probe(String),
    Checkout(String),
    Upload(String),
    Checkin {
        file: String,
        kind: CheckinKind,
        comment: String,
    },
    Publish {
        file: String,
        comment: String,
    },
}

#[derive(Default)]
struct MemoryState {
    ops: Vec<StoreOp>,
    ensure_calls: HashMap<String, usize>,
    uploads: HashMap<String, Vec<u8>>,
    versioned_lists: HashSet<String>,
    probe_failures: HashSet<String>,
    upload_failures: HashSet<String>,
}

/// Shared-state store double; clones observe the same recording.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report minor versioning as enabled for the list at `path`.
    pub fn enable_versioning(&self, path: &str) {
        let mut state = self.state.lock().unwrap();
        state.versioned_lists.insert(path.to_string());
    }

    /// Make the metadata probe for `path` fail.
    pub fn fail_probe(&self, path: &str) {
        let mut state = self.state.lock().unwrap();
        state.probe_failures.insert(path.to_string());
    }

    /// Make uploads of the remote file `file` fail.
    pub fn fail_upload(&self, file: &str) {
        let mut state = self.state.lock().unwrap();
        state.upload_failures.insert(file.to_string());
    }

    /// Every operation recorded so far, in order.
    pub fn ops(&self) -> Vec<StoreOp> {
        self.state.lock().unwrap().ops.clone()
    }

    /// How many ensure calls reached the store for `path`.
    pub fn ensure_calls(&self, path: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .ensure_calls
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    /// Remote identifiers uploaded so far, in order.
    pub fn uploaded_files(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .ops
            .iter()
            .filter_map(|op| match op {
                StoreOp::Upload(file) => Some(file.clone()),
                _ => None,
            })
            .collect()
    }

    /// Content of the uploaded remote file, if any.
    pub fn uploaded_content(&self, file: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().uploads.get(file).cloned()
    }

    /// How many connections have been opened.
    pub fn connect_count(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .ops
            .iter()
            .filter(|op| matches!(op, StoreOp::Connect { .. }))
            .count()
    }
}

impl Store for MemoryStore {
    fn connect(
        &self,
        url: &str,
        credentials: &Credentials,
    ) -> Result<Box<dyn StoreConnection>, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(StoreOp::Connect {
            url: url.to_string(),
            username: credentials.username.clone(),
        });
        Ok(Box::new(MemoryConnection {
            state: self.state.clone(),
        }))
    }
}

struct MemoryConnection {
    state: Arc<Mutex<MemoryState>>,
}

impl StoreConnection for MemoryConnection {
    fn ensure_folder(&self, path: &str) -> Result<FolderHandle, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(StoreOp::EnsureFolder(path.to_string()));
        *state.ensure_calls.entry(path.to_string()).or_insert(0) += 1;
        Ok(FolderHandle {
            path: path.to_string(),
        })
    }

    fn minor_versioning_enabled(&self, path: &str) -> Result<bool, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(StoreOp::Probe(path.to_string()));
        if state.probe_failures.contains(path) {
            return Err(StoreError::Operation {
                op: "list metadata",
                path: path.to_string(),
                message: "not a list".to_string(),
            });
        }
        Ok(state.versioned_lists.contains(path))
    }

    fn upload_file(
        &self,
        folder: &FolderHandle,
        name: &str,
        content: &[u8],
        _overwrite: bool,
    ) -> Result<(), StoreError> {
        let file = crate::paths::join_remote(&folder.path, name);
        let mut state = self.state.lock().unwrap();
        if state.upload_failures.contains(&file) {
            return Err(StoreError::Operation {
                op: "upload",
                path: file,
                message: "injected failure".to_string(),
            });
        }
        state.ops.push(StoreOp::Upload(file.clone()));
        state.uploads.insert(file, content.to_vec());
        Ok(())
    }

    fn checkout_file(&self, file: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(StoreOp::Checkout(file.to_string()));
        Ok(())
    }

    fn checkin_file(&self, file: &str, kind: CheckinKind, comment: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(StoreOp::Checkin {
            file: file.to_string(),
            kind,
            comment: comment.to_string(),
        });
        Ok(())
    }

    fn publish_file(&self, file: &str, comment: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(StoreOp::Publish {
            file: file.to_string(),
            comment: comment.to_string(),
        });
        Ok(())
    }
}
