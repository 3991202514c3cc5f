//! Watch event types and debounce state

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Suppression window for duplicate change notifications.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_secs(1);

/// Watch event types for rendering and NDJSON output
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    FileChanged {
        path: String,
    },
    FileDeployed {
        remote: String,
    },
    DispatchFailed {
        path: String,
        message: String,
    },
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Two-field debounce latch: last accepted path and when.
///
/// Only the single most recent path is remembered, so rapid changes to two
/// different files are never suppressed, while a duplicate notification for
/// the same path inside [`DEBOUNCE_WINDOW`] is. Suppressed events leave the
/// latch untouched.
#[derive(Debug, Default)]
pub struct DebounceLatch {
    last_path: Option<PathBuf>,
    last_accepted: Option<Instant>,
}

impl DebounceLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept or suppress a notification for `path` arriving at `now`.
    /// Accepting updates both fields in the same step.
    pub fn accept(&mut self, path: &Path, now: Instant) -> bool {
        if let (Some(last_path), Some(last_at)) = (&self.last_path, self.last_accepted) {
            if last_path == path && now.duration_since(last_at) < DEBOUNCE_WINDOW {
                return false;
            }
        }
        self.last_path = Some(path.to_path_buf());
        self.last_accepted = Some(now);
        true
    }
}
