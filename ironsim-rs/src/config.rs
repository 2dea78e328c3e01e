use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{Error, Result};

pub const BAREMETAL_URL: &str = "IRONSIM_BAREMETAL_URL";
pub const BAREMETAL_API_VERSION: &str = "IRONSIM_BAREMETAL_API_VERSION";
pub const BAREMETAL_CATALOG_TYPE: &str = "IRONSIM_BAREMETAL_CATALOG_TYPE";
pub const IDENTITY_URL: &str = "IRONSIM_IDENTITY_URL";
pub const IDENTITY_CATALOG_TYPE: &str = "IRONSIM_IDENTITY_CATALOG_TYPE";
pub const IDENTITY_ENDPOINT_TYPE: &str = "IRONSIM_IDENTITY_ENDPOINT_TYPE";
pub const AUTH_TOKEN: &str = "IRONSIM_AUTH_TOKEN";

/// Where a service lives and how it is looked up in the service catalog.
///
/// `catalog_type` and `endpoint_type` are not read by [`StaticAuth`], which
/// takes `url` as the endpoint. They are handed to custom [`AuthProvider`]s
/// that resolve the endpoint from a service catalog.
///
/// [`StaticAuth`]: crate::transport::StaticAuth
/// [`AuthProvider`]: crate::transport::AuthProvider
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub url: String,
    pub catalog_type: String,
    #[serde(default = "default_endpoint_type")]
    pub endpoint_type: String,
    pub api_version: String,
}

fn default_endpoint_type() -> String {
    "publicURL".to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub baremetal: ServiceConfig,
    #[serde(default)]
    pub identity: Option<ServiceConfig>,
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl Config {
    /// Reads the configuration from `IRONSIM_*` environment variables.
    /// Only the baremetal URL is mandatory; the identity service is optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let url = var(BAREMETAL_URL)
            .ok_or_else(|| Error::Config(format!("{BAREMETAL_URL} environment variable not set")))?;

        let baremetal = ServiceConfig {
            url,
            catalog_type: var(BAREMETAL_CATALOG_TYPE).unwrap_or_else(|| "baremetal".to_string()),
            endpoint_type: default_endpoint_type(),
            api_version: var(BAREMETAL_API_VERSION).unwrap_or_else(|| "1".to_string()),
        };

        let identity = var(IDENTITY_URL).map(|url| ServiceConfig {
            url,
            catalog_type: var(IDENTITY_CATALOG_TYPE).unwrap_or_else(|| "identity".to_string()),
            endpoint_type: var(IDENTITY_ENDPOINT_TYPE).unwrap_or_else(|| "adminURL".to_string()),
            api_version: "3".to_string(),
        });

        Ok(Self {
            baremetal,
            identity,
            auth_token: var(AUTH_TOKEN),
        })
    }
}
