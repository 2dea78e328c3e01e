use std::sync::Arc;
use url::Url;

use crate::client::{BaremetalClient, CredentialsClient};
use crate::config::Config;
use crate::context::TestContext;
use crate::error::Result;
use crate::transport::{AuthProvider, HttpTransport, StaticAuth};

/// Builds the API clients once and hands every suite a fresh [`TestContext`].
#[derive(Clone, Debug)]
pub struct Harness {
    baremetal: BaremetalClient,
    credentials: Option<CredentialsClient>,
}

impl Harness {
    /// Reads `IRONSIM_*` environment variables and authenticates with the
    /// static token they carry.
    pub fn from_env() -> Result<Self> {
        Self::from_config(Config::from_env()?)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let auth: Arc<dyn AuthProvider> = Arc::new(StaticAuth::new(config.auth_token.clone()));
        Self::with_auth(config, auth)
    }

    pub fn with_auth(config: Config, auth: Arc<dyn AuthProvider>) -> Result<Self> {
        Url::parse(&config.baremetal.url)?;
        let api_version = config.baremetal.api_version.clone();
        let transport = HttpTransport::new(config.baremetal, auth.clone());
        let baremetal = BaremetalClient::new(Arc::new(transport), &api_version);

        let credentials = match config.identity {
            Some(identity) => {
                Url::parse(&identity.url)?;
                Some(CredentialsClient::from_service(identity, auth))
            }
            None => None,
        };

        Ok(Self::new(baremetal, credentials))
    }

    pub fn new(baremetal: BaremetalClient, credentials: Option<CredentialsClient>) -> Self {
        Self {
            baremetal,
            credentials,
        }
    }

    pub fn has_identity(&self) -> bool {
        self.credentials.is_some()
    }

    /// Setup for one suite: empty registry, shared clients.
    pub fn context(&self) -> TestContext {
        TestContext::setup(self.baremetal.clone(), self.credentials.clone())
    }
}
