//! Error types for sitepush
//!
//! One `thiserror` enum for the library; the binary wraps it with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::store::StoreError;

/// Result type alias for sitepush operations
pub type SitepushResult<T> = Result<T, SitepushError>;

/// Main error type for sitepush operations
#[derive(Error, Debug)]
pub enum SitepushError {
    /// Site configuration document is missing, unreadable, or malformed
    #[error("invalid configuration {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// A filter pattern failed to compile
    #[error("invalid filter pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// A mapping's source directory could not be enumerated
    #[error("cannot read source directory {path}: {message}")]
    Source { path: PathBuf, message: String },

    /// A local file does not live under its mapping's source directory
    #[error("file {file} is outside mapping source {source_dir}")]
    OutsideMapping { file: PathBuf, source_dir: PathBuf },

    /// Credentials could not be resolved for a site
    #[error("no credentials available for site '{site}'")]
    MissingCredentials { site: String },

    /// Opening the remote connection failed
    #[error("cannot connect to {url}: {source}")]
    Connect { url: String, source: StoreError },

    /// Ensuring a remote folder failed
    #[error("cannot prepare remote folder {path}: {source}")]
    Folder { path: String, source: StoreError },

    /// A local file could not be read for upload
    #[error("cannot read {file}: {message}")]
    LocalRead { file: PathBuf, message: String },

    /// Uploading (or checking out/in, publishing) a file failed
    #[error("failed to deploy {file}: {source}")]
    Deploy { file: PathBuf, source: StoreError },

    /// A filesystem watch subscription could not be created
    #[error("cannot watch {path}: {message}")]
    Watch { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
