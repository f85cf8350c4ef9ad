pub mod archive;
pub mod client;
pub mod errors;

use async_trait::async_trait;
use errors::DeployError;
use serde::{Deserialize, Serialize};

/// A site that finished deploying.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub url: String,
    pub site_id: String,
    pub site_name: String,
}

/// Publishes a single HTML document as a static site.
#[async_trait]
pub trait SiteDeployer: Send + Sync {
    async fn deploy(&self, html: &str, site_name: &str) -> Result<Deployment, DeployError>;
}

/// Site name used when the caller does not choose one.
pub fn default_site_name() -> String {
    format!("astra-app-{}", chrono::Utc::now().timestamp_millis())
}
