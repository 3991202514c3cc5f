//! Deployment configuration
//!
//! `sitepush.toml` in the working directory declares the sites and their
//! file mappings; an optional `sitepush.credentials.toml` beside it carries
//! override credentials. The model is built once at startup and immutable
//! afterwards.

mod loader;
mod types;

pub use loader::{
    load_credentials, load_with_warnings, ConfigWarning, CONFIG_FILE, CREDENTIALS_FILE,
};
pub use types::{CredentialOverride, DeployConfig, Mapping, Site};
