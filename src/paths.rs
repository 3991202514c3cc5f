//! Remote path helpers
//!
//! The remote store addresses folders and files with forward-slash paths
//! rooted at `/`. Local paths are projected onto that tree by stripping the
//! mapping's source directory and converting separators.

use std::path::Path;

use crate::error::{SitepushError, SitepushResult};

/// Normalize a remote path: forward slashes only, duplicate slashes
/// collapsed, rooted at `/`, no trailing slash (the root itself stays `/`).
pub fn normalize_remote(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for segment in path.split(['/', '\\']).filter(|s| !s.is_empty()) {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Join a folder path and a file name without doubling the slash.
pub fn join_remote(folder: &str, name: &str) -> String {
    if folder.ends_with('/') {
        format!("{}{}", folder, name)
    } else {
        format!("{}/{}", folder, name)
    }
}

/// Compute the remote folder that should hold `local_file`: the file's
/// directory relative to `source_root`, appended to `destination`.
pub fn remote_folder_for(
    source_root: &Path,
    destination: &str,
    local_file: &Path,
) -> SitepushResult<String> {
    let outside = || SitepushError::OutsideMapping {
        file: local_file.to_path_buf(),
        source_dir: source_root.to_path_buf(),
    };

    let parent = local_file.parent().ok_or_else(outside)?;
    let relative = parent.strip_prefix(source_root).map_err(|_| outside())?;

    let mut folder = destination.to_string();
    for component in relative.components() {
        folder.push('/');
        folder.push_str(&component.as_os_str().to_string_lossy());
    }
    Ok(normalize_remote(&folder))
}
