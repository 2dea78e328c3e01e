use std::fmt;

use crate::types::ResourceKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Unexpected response code: expected {expected}, received {received}")]
    UnexpectedResponseCode { expected: String, received: String },
    #[error("Cleanup failed for {} resource(s): {}", .0.len(), CleanupFailures(.0))]
    Cleanup(Vec<CleanupFailure>),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

/// A single delete issued during teardown that did not take effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleanupFailure {
    pub kind: ResourceKind,
    pub id: String,
    pub reason: String,
}

impl fmt::Display for CleanupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.id, self.reason)
    }
}

struct CleanupFailures<'a>(&'a [CleanupFailure]);

impl fmt::Display for CleanupFailures<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, failure) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}
