use anyhow::Context;
use ironsim::{Config, Error};
use std::env;

/// Path of a YAML file holding a serialized [`Config`]. Takes precedence over
/// the individual `IRONSIM_*` variables.
pub const IRONSIM_CONFIG: &str = "IRONSIM_CONFIG";
pub const IRONSIM_USER_ID: &str = "IRONSIM_USER_ID";
pub const IRONSIM_PROJECT_ID: &str = "IRONSIM_PROJECT_ID";

pub fn load_config() -> anyhow::Result<Config> {
    match env::var(IRONSIM_CONFIG) {
        Ok(path) if !path.is_empty() => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("unable to read config file {path}"))?;
            serde_yaml::from_str(&raw).with_context(|| format!("unable to parse config file {path}"))
        }
        _ => Ok(Config::from_env()?),
    }
}

/// User and project that own the credentials the identity suite creates.
pub struct CredentialOwner {
    pub user_id: String,
    pub project_id: String,
}

impl CredentialOwner {
    pub fn from_env() -> ironsim::Result<Self> {
        let var = |key: &str| {
            env::var(key)
                .ok()
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::Config(format!("{key} environment variable not set")))
        };

        Ok(Self {
            user_id: var(IRONSIM_USER_ID)?,
            project_id: var(IRONSIM_PROJECT_ID)?,
        })
    }
}
