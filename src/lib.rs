//! Sitepush - declarative deploys into a remote content store
//!
//! Sitepush reads a site catalog from configuration, walks each mapping's
//! local source tree and uploads the surviving files into the mapped remote
//! folder hierarchy, driving checkout/checkin/publish where the destination
//! requires it. Watch mode keeps the sources armed afterwards and redeploys
//! individual files as they change.

pub mod config;
pub mod credentials;
pub mod deploy;
pub mod error;
pub mod filter;
pub mod paths;
pub mod resolver;
pub mod store;
pub mod sync;
pub mod transaction;
pub mod watch;

// Re-exports for convenience
pub use config::{load_credentials, load_with_warnings, DeployConfig, Mapping, Site};
pub use credentials::{CredentialProvider, Credentials, InteractiveCredentials, SuppliedCredentials};
pub use deploy::{DeployTarget, Deployer, RunOutcome};
pub use error::{SitepushError, SitepushResult};
pub use filter::SyncFilter;
pub use store::{Store, StoreConnection};
pub use sync::{sync_site, SiteReport, SyncEvent};
pub use watch::{WatchEngine, WatchEvent};
