//! Credential resolution
//!
//! A site may carry inline credentials; an optional override document wins
//! per field. Whatever is still blank is filled by the provider: the
//! supplied variant fails, the interactive variant prompts on the terminal
//! (masked input for the password). Connection opening takes a provider, so
//! the sync core never touches terminal I/O.

use dialoguer::{Input, Password};

use crate::config::{CredentialOverride, Site};
use crate::error::{SitepushError, SitepushResult};

/// Final username/password pair handed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Resolves credentials for a site at connection-open time.
pub trait CredentialProvider: Send + Sync {
    fn resolve(&self, site: &Site) -> SitepushResult<Credentials>;
}

/// Per-field merge of site credentials with the optional override document.
/// Blank strings count as unset.
fn merge(site: &Site, overrides: Option<&CredentialOverride>) -> (String, String) {
    let mut username = site.username.clone();
    let mut password = site.password.clone();
    if let Some(overrides) = overrides {
        if !overrides.username.is_empty() {
            username = overrides.username.clone();
        }
        if !overrides.password.is_empty() {
            password = overrides.password.clone();
        }
    }
    (username, password)
}

/// Provider for non-interactive use: everything must already be known.
pub struct SuppliedCredentials {
    overrides: Option<CredentialOverride>,
}

impl SuppliedCredentials {
    pub fn new(overrides: Option<CredentialOverride>) -> Self {
        Self { overrides }
    }
}

impl CredentialProvider for SuppliedCredentials {
    fn resolve(&self, site: &Site) -> SitepushResult<Credentials> {
        let (username, password) = merge(site, self.overrides.as_ref());
        if username.is_empty() || password.is_empty() {
            return Err(SitepushError::MissingCredentials {
                site: site.name.clone(),
            });
        }
        Ok(Credentials { username, password })
    }
}

/// Provider for terminal use: prompts for whatever is still blank.
pub struct InteractiveCredentials {
    overrides: Option<CredentialOverride>,
}

impl InteractiveCredentials {
    pub fn new(overrides: Option<CredentialOverride>) -> Self {
        Self { overrides }
    }
}

impl CredentialProvider for InteractiveCredentials {
    fn resolve(&self, site: &Site) -> SitepushResult<Credentials> {
        let (mut username, mut password) = merge(site, self.overrides.as_ref());

        if username.is_empty() {
            username = Input::new()
                .with_prompt(format!("Username for {}", site.name))
                .interact_text()
                .map_err(|_| missing(site))?;
        }
        if password.is_empty() {
            password = Password::new()
                .with_prompt(format!("Password for {}", site.name))
                .interact()
                .map_err(|_| missing(site))?;
        }

        Ok(Credentials { username, password })
    }
}

fn missing(site: &Site) -> SitepushError {
    SitepushError::MissingCredentials {
        site: site.name.clone(),
    }
}
