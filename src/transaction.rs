//! Single-file upload transaction
//!
//! The publish sequence for one file: optional checkout, content upload,
//! optional major checkin, optional publish. Whether the versioned steps run
//! is decided once per mapping by [`probe_versioning`]; watch-mode dispatches
//! skip the probe entirely and upload plain.

use std::fs;
use std::path::Path;

use crate::error::{SitepushError, SitepushResult};
use crate::paths::{join_remote, normalize_remote};
use crate::store::{CheckinKind, FolderHandle, StoreConnection};

/// Comment recorded on checkins and publishes.
pub const TRANSACTION_COMMENT: &str = "sitepush";

/// Outcome of the minor-versioning probe for a destination.
///
/// `Unknown` (the metadata query failed, e.g. the destination is not a
/// list-backed location) behaves like `NotRequired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Versioning {
    Required,
    NotRequired,
    Unknown,
}

impl Versioning {
    /// Whether uploads go through the checkout/checkin/publish sequence.
    pub fn requires_checkout(self) -> bool {
        matches!(self, Versioning::Required)
    }
}

/// Ask the store whether the destination list has minor versioning enabled.
/// Query failures are not errors here; they degrade to `Unknown`.
pub fn probe_versioning(conn: &dyn StoreConnection, destination: &str) -> Versioning {
    match conn.minor_versioning_enabled(destination) {
        Ok(true) => Versioning::Required,
        Ok(false) => Versioning::NotRequired,
        Err(_) => Versioning::Unknown,
    }
}

/// Upload one local file into `folder` and return the remote identifier.
///
/// With versioning required and a non-root destination, the upload is
/// bracketed by checkout and major checkin; a publish follows whenever
/// versioning was detected. Content always overwrites (last write wins).
pub fn publish_file(
    conn: &dyn StoreConnection,
    folder: &FolderHandle,
    local_file: &Path,
    destination: &str,
    versioning: Versioning,
) -> SitepushResult<String> {
    let name = local_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| SitepushError::LocalRead {
            file: local_file.to_path_buf(),
            message: "missing file name".to_string(),
        })?;

    let file_ref = join_remote(&folder.path, &name);
    let versioned = versioning.requires_checkout();
    let at_root = normalize_remote(destination) == "/";

    let deploy_err = |source| SitepushError::Deploy {
        file: local_file.to_path_buf(),
        source,
    };

    if versioned && !at_root {
        conn.checkout_file(&file_ref).map_err(deploy_err)?;
    }

    let content = fs::read(local_file).map_err(|e| SitepushError::LocalRead {
        file: local_file.to_path_buf(),
        message: e.to_string(),
    })?;
    conn.upload_file(folder, &name, &content, true)
        .map_err(deploy_err)?;

    if versioned && !at_root {
        conn.checkin_file(&file_ref, CheckinKind::Major, TRANSACTION_COMMENT)
            .map_err(deploy_err)?;
    }
    if versioned {
        conn.publish_file(&file_ref, TRANSACTION_COMMENT)
            .map_err(deploy_err)?;
    }

    Ok(file_ref)
}
