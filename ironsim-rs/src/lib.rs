#![warn(clippy::unwrap_used)]
mod macros;
mod check;
mod client;
mod config;
mod context;
mod error;
mod harness;
mod patch;
mod path;
mod testapi;
#[cfg(test)]
mod testing;
mod tracker;
mod transport;
pub mod types;
pub mod utils;

pub use check::check_response;
pub use client::{BaremetalClient, CredentialsClient};
pub use config::{Config, ServiceConfig};
pub use context::{ChassisArgs, CredentialArgs, PortArgs, TestContext, BAREMETAL_CREATED, CREDENTIAL_CREATED};
pub use error::{CleanupFailure, Error, Result};
pub use harness::Harness;
pub use patch::build_patch;
pub use path::resource_path;
pub use testapi::{run_suite, AsyncTestFunc, Suite, SuiteReport, TestSpec, Testable};
pub use tracker::CreatedResources;
pub use types::{Changes, Resource, ResourceKind, Response, TestResult};
pub use transport::{AuthProvider, Headers, HttpTransport, RawResponse, Session, StaticAuth, Transport};
