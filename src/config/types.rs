//! Configuration types

use std::path::PathBuf;

use serde::Deserialize;

/// Root configuration document (`sitepush.toml`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Environment deployed when no selector is given. Blank or `ALL`
    /// (any casing) means every site.
    pub default_environment: String,
    pub sites: Vec<Site>,
}

/// One named remote deployment target.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Site {
    pub name: String,
    /// Environment tag used by `env:<tag>` selection; blank means untagged.
    #[serde(default)]
    pub environment: String,
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Skip destination pre-creation and the versioning probe.
    #[serde(default)]
    pub fast_mode: bool,
    #[serde(default)]
    pub mappings: Vec<Mapping>,
}

/// One source-directory-to-destination rule within a site.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Mapping {
    /// Local directory whose tree is pushed.
    pub source: PathBuf,
    /// Remote path the tree lands under, rooted at `/`.
    pub destination: String,
    /// Comma-separated regular expressions; only matching files sync.
    #[serde(default)]
    pub include: Option<String>,
    /// Comma-separated regular expressions; matching files never sync.
    #[serde(default)]
    pub exclude: Option<String>,
    /// Reserved. Accepted in configuration, but no mirror-delete of remote
    /// files is performed.
    #[serde(default)]
    pub clean: bool,
}

/// Optional override document (`sitepush.credentials.toml`). Non-blank
/// fields win over the site's inline credentials.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CredentialOverride {
    pub username: String,
    pub password: String,
}
