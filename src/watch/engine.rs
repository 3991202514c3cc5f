//! Filesystem watch engine
//!
//! Subscribes to every mapping source of the armed sites, debounces the raw
//! notification stream, resolves each change back to its owning mapping and
//! pushes the file on a background thread over a fresh connection. Watch
//! uploads never check out: the remote copy is overwritten in place.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::{Mapping, Site};
use crate::credentials::CredentialProvider;
use crate::error::{SitepushError, SitepushResult};
use crate::filter::SyncFilter;
use crate::paths::remote_folder_for;
use crate::store::Store;
use crate::transaction::{publish_file, Versioning};

use super::event::{DebounceLatch, WatchEvent};

/// Everything a dispatch needs to know about the owning mapping.
pub(crate) struct WatchTarget {
    pub(crate) site: Site,
    pub(crate) mapping: Mapping,
    /// Canonicalized mapping source, the root the remote folder is derived from.
    pub(crate) source_dir: PathBuf,
    pub(crate) filter: SyncFilter,
}

/// Registered mapping sources, keyed by case-insensitive directory identity.
#[derive(Default)]
pub(crate) struct WatchRegistry {
    targets: HashMap<String, Arc<WatchTarget>>,
}

impl WatchRegistry {
    pub(crate) fn insert(&mut self, dir: &Path, target: WatchTarget) {
        self.targets.insert(identity(dir), Arc::new(target));
    }

    /// Walk up from the changed file until a registered source directory
    /// matches. Files outside every mapping resolve to `None`.
    pub(crate) fn owner_of(&self, changed: &Path) -> Option<Arc<WatchTarget>> {
        let mut dir = changed.parent();
        while let Some(d) = dir {
            if let Some(target) = self.targets.get(&identity(d)) {
                return Some(Arc::clone(target));
            }
            dir = d.parent();
        }
        None
    }

    pub(crate) fn len(&self) -> usize {
        self.targets.len()
    }
}

fn identity(dir: &Path) -> String {
    dir.to_string_lossy().to_lowercase()
}

/// Content modifications trigger uploads; metadata and rename noise does not.
fn is_content_modification(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Data(_)) | EventKind::Modify(ModifyKind::Any)
    )
}

/// Continuous re-deploy loop over the armed sites.
pub struct WatchEngine {
    store: Arc<dyn Store>,
    credentials: Arc<dyn CredentialProvider>,
    registry: WatchRegistry,
    latch: DebounceLatch,
    watchers: Vec<RecommendedWatcher>,
    tx: Sender<PathBuf>,
    rx: Receiver<PathBuf>,
}

impl WatchEngine {
    pub fn new(store: Arc<dyn Store>, credentials: Arc<dyn CredentialProvider>) -> Self {
        let (tx, rx) = channel();
        Self {
            store,
            credentials,
            registry: WatchRegistry::default(),
            latch: DebounceLatch::new(),
            watchers: Vec::new(),
            tx,
            rx,
        }
    }

    /// Subscribe to every mapping source of `site` and register the owners.
    /// Returns the canonical directories now being watched.
    pub fn arm(&mut self, site: &Site) -> SitepushResult<Vec<PathBuf>> {
        let mut watched = Vec::new();
        for mapping in &site.mappings {
            let source_dir = mapping.source.canonicalize().map_err(|e| SitepushError::Watch {
                path: mapping.source.clone(),
                message: e.to_string(),
            })?;
            let filter = SyncFilter::new(mapping.include.as_deref(), mapping.exclude.as_deref())?;

            let tx = self.tx.clone();
            let mut watcher = RecommendedWatcher::new(
                move |res: Result<Event, notify::Error>| {
                    if let Ok(event) = res {
                        if is_content_modification(&event.kind) {
                            for path in event.paths {
                                let _ = tx.send(path);
                            }
                        }
                    }
                },
                Config::default(),
            )
            .map_err(|e| watch_error(&source_dir, e))?;

            watcher
                .watch(&source_dir, RecursiveMode::Recursive)
                .map_err(|e| watch_error(&source_dir, e))?;

            self.watchers.push(watcher);
            self.registry.insert(
                &source_dir,
                WatchTarget {
                    site: site.clone(),
                    mapping: mapping.clone(),
                    source_dir: source_dir.clone(),
                    filter,
                },
            );
            watched.push(source_dir);
        }
        Ok(watched)
    }

    pub fn armed_sources(&self) -> usize {
        self.registry.len()
    }

    /// Drain change notifications until `running` clears, dispatching each
    /// accepted change on its own thread.
    pub fn run<F>(&mut self, running: Arc<AtomicBool>, on_event: F)
    where
        F: Fn(WatchEvent) + Send + Sync + 'static,
    {
        let on_event = Arc::new(on_event);
        while running.load(Ordering::SeqCst) {
            match self.rx.recv_timeout(Duration::from_millis(50)) {
                Ok(path) => self.handle_change(path, &on_event),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        on_event(WatchEvent::Shutdown);
    }

    fn handle_change<F>(&mut self, path: PathBuf, on_event: &Arc<F>)
    where
        F: Fn(WatchEvent) + Send + Sync + 'static,
    {
        let path = path.canonicalize().unwrap_or(path);
        if !self.latch.accept(&path, Instant::now()) {
            return;
        }
        let Some(target) = self.registry.owner_of(&path) else {
            return;
        };
        if !target.filter.should_sync(&path) {
            return;
        }

        on_event(WatchEvent::FileChanged {
            path: path.display().to_string(),
        });

        let store = Arc::clone(&self.store);
        let credentials = Arc::clone(&self.credentials);
        let on_event = Arc::clone(on_event);
        thread::spawn(move || {
            match dispatch(store.as_ref(), credentials.as_ref(), &target, &path) {
                Ok(remote) => on_event(WatchEvent::FileDeployed { remote }),
                Err(e) => on_event(WatchEvent::DispatchFailed {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }),
            }
        });
    }
}

/// Push one changed file over a fresh connection. The destination folder is
/// re-ensured every time and the file is overwritten without a checkout.
pub(crate) fn dispatch(
    store: &dyn Store,
    credentials: &dyn CredentialProvider,
    target: &WatchTarget,
    file: &Path,
) -> SitepushResult<String> {
    let creds = credentials.resolve(&target.site)?;
    let conn = store
        .connect(&target.site.url, &creds)
        .map_err(|source| SitepushError::Connect {
            url: target.site.url.clone(),
            source,
        })?;
    let folder_path = remote_folder_for(&target.source_dir, &target.mapping.destination, file)?;
    let folder = conn
        .ensure_folder(&folder_path)
        .map_err(|source| SitepushError::Folder {
            path: folder_path.clone(),
            source,
        })?;
    publish_file(
        conn.as_ref(),
        &folder,
        file,
        &target.mapping.destination,
        Versioning::NotRequired,
    )
}

fn watch_error(path: &Path, e: notify::Error) -> SitepushError {
    SitepushError::Watch {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}
