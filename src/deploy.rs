//! Deploy orchestration
//!
//! Selects sites from configuration, opens one connection per site and runs
//! the batch sync over it. A fatal error on any site aborts the remaining
//! sites. In watch mode every successfully synced site is armed on the watch
//! engine, which the outcome then hands back to the caller.

use std::fmt;
use std::sync::Arc;

use crate::config::{DeployConfig, Site};
use crate::credentials::CredentialProvider;
use crate::error::{SitepushError, SitepushResult};
use crate::store::Store;
use crate::sync::{sync_site, SiteReport, SyncEvent};
use crate::watch::WatchEngine;

/// Which sites a run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployTarget {
    All,
    ByName(String),
    ByEnvironment(String),
}

impl DeployTarget {
    /// Target implied by the configured default environment: blank or the
    /// keyword `ALL` covers every site.
    pub fn from_default_environment(environment: &str) -> Self {
        let trimmed = environment.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            DeployTarget::All
        } else {
            DeployTarget::ByEnvironment(trimmed.to_string())
        }
    }

    /// An empty selector value never matches, even sites with a blank
    /// environment tag.
    fn selects(&self, site: &Site) -> bool {
        match self {
            DeployTarget::All => true,
            DeployTarget::ByName(name) => !name.is_empty() && site.name == *name,
            DeployTarget::ByEnvironment(environment) => {
                !environment.is_empty() && site.environment == *environment
            }
        }
    }
}

/// What a run produced: one report per synced site, and the armed watch
/// engine when watching was requested.
pub struct RunOutcome {
    pub reports: Vec<SiteReport>,
    pub watch: Option<WatchEngine>,
}

impl fmt::Debug for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunOutcome")
            .field("reports", &self.reports)
            .field("watch", &self.watch.is_some())
            .finish()
    }
}

pub struct Deployer {
    config: DeployConfig,
    store: Arc<dyn Store>,
    credentials: Arc<dyn CredentialProvider>,
}

impl Deployer {
    pub fn new(
        config: DeployConfig,
        store: Arc<dyn Store>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            config,
            store,
            credentials,
        }
    }

    /// Run the batch deploy over every selected site, in configuration
    /// order. An empty selection is not an error; the outcome just carries
    /// no reports.
    pub fn run(
        &self,
        target: &DeployTarget,
        watch: bool,
        on_event: impl Fn(&SyncEvent),
    ) -> SitepushResult<RunOutcome> {
        let mut engine = watch.then(|| {
            WatchEngine::new(Arc::clone(&self.store), Arc::clone(&self.credentials))
        });
        let mut reports = Vec::new();

        for site in self.config.sites.iter().filter(|site| target.selects(site)) {
            on_event(&SyncEvent::SiteStarted {
                site: site.name.clone(),
            });

            let creds = self.credentials.resolve(site)?;
            let conn = self
                .store
                .connect(&site.url, &creds)
                .map_err(|source| SitepushError::Connect {
                    url: site.url.clone(),
                    source,
                })?;

            let report = sync_site(conn.as_ref(), site, &on_event)?;
            on_event(&SyncEvent::SiteCompleted {
                site: report.site.clone(),
                deployed: report.deployed,
                skipped: report.skipped,
            });
            reports.push(report);

            if let Some(engine) = engine.as_mut() {
                let sources = engine.arm(site)?;
                on_event(&SyncEvent::WatchArmed {
                    site: site.name.clone(),
                    sources: sources.iter().map(|s| s.display().to_string()).collect(),
                });
            }
        }

        Ok(RunOutcome {
            reports,
            watch: engine,
        })
    }
}
