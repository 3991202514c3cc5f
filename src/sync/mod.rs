//! Batch synchronization
//!
//! One site per run: walk every mapping source, filter, resolve remote
//! folders through the per-run cache, and drive the upload transaction per
//! surviving file. The first fatal error aborts the rest of the site's run;
//! files already uploaded stay uploaded.


use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Site;
use crate::error::{SitepushError, SitepushResult};
use crate::filter::SyncFilter;
use crate::paths::remote_folder_for;
use crate::resolver::FolderResolver;
use crate::store::StoreConnection;
use crate::transaction::{probe_versioning, publish_file, Versioning};

/// Progress events emitted while deploying, rendered by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SyncEvent {
    SiteStarted {
        site: String,
    },
    MappingStarted {
        source: String,
        destination: String,
    },
    FileDeployed {
        remote: String,
    },
    FileSkipped {
        path: String,
    },
    SiteCompleted {
        site: String,
        deployed: usize,
        skipped: usize,
    },
    WatchArmed {
        site: String,
        sources: Vec<String>,
    },
}

impl SyncEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Outcome of one site's batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteReport {
    pub site: String,
    pub deployed: usize,
    pub skipped: usize,
}

/// Synchronize one site over an open connection.
///
/// Mappings run in declaration order; files in sorted enumeration order.
/// The folder cache lives for the whole site run, so a destination
/// subdirectory shared between mappings is ensured once.
pub fn sync_site(
    conn: &dyn StoreConnection,
    site: &Site,
    on_event: impl Fn(&SyncEvent),
) -> SitepushResult<SiteReport> {
    let mut resolver = FolderResolver::new();
    let mut report = SiteReport {
        site: site.name.clone(),
        deployed: 0,
        skipped: 0,
    };

    for mapping in &site.mappings {
        on_event(&SyncEvent::MappingStarted {
            source: mapping.source.display().to_string(),
            destination: mapping.destination.clone(),
        });

        let filter = SyncFilter::new(mapping.include.as_deref(), mapping.exclude.as_deref())?;

        // Fast mode skips both the up-front ensure and the probe.
        let versioning = if site.fast_mode {
            Versioning::NotRequired
        } else {
            resolver
                .ensure(conn, &mapping.destination)
                .map_err(|source| SitepushError::Folder {
                    path: mapping.destination.clone(),
                    source,
                })?;
            probe_versioning(conn, &mapping.destination)
        };

        for file in walk_source(&mapping.source)? {
            if !filter.should_sync(&file) {
                report.skipped += 1;
                on_event(&SyncEvent::FileSkipped {
                    path: file.display().to_string(),
                });
                continue;
            }

            let folder_path = remote_folder_for(&mapping.source, &mapping.destination, &file)?;
            let folder =
                resolver
                    .ensure(conn, &folder_path)
                    .map_err(|source| SitepushError::Folder {
                        path: folder_path.clone(),
                        source,
                    })?;

            let remote = publish_file(conn, &folder, &file, &mapping.destination, versioning)?;
            report.deployed += 1;
            on_event(&SyncEvent::FileDeployed { remote });
        }
    }

    Ok(report)
}

/// Every file under `root`, recursively, in sorted order.
fn walk_source(root: &Path) -> SitepushResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(SitepushError::Source {
            path: root.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut files = Vec::new();
    walk_into(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk_into(dir: &Path, files: &mut Vec<PathBuf>) -> SitepushResult<()> {
    let entries = fs::read_dir(dir).map_err(|e| SitepushError::Source {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| SitepushError::Source {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        if path.is_dir() {
            walk_into(&path, files)?;
        } else {
            files.push(path);
        }
    }

    Ok(())
}
