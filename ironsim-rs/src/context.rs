use futures::future::join_all;
use tracing::{debug, warn};

use crate::check::check_response;
use crate::client::{BaremetalClient, CredentialsClient};
use crate::error::{CleanupFailure, Error, Result};
use crate::tracker::CreatedResources;
use crate::types::{Chassis, Credential, Node, NodeSpec, Port, Resource, ResourceKind, Response};
use crate::utils::{rand_mac_address, rand_name};

/// Status a successful bare-metal creation answers with.
pub const BAREMETAL_CREATED: u16 = 200;
/// Status a successful credential creation answers with.
pub const CREDENTIAL_CREATED: u16 = 201;

#[derive(Clone, Debug, Default)]
pub struct ChassisArgs {
    /// Random `test-chassis-<n>` name when unset.
    pub description: Option<String>,
    pub expect_errors: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PortArgs {
    /// Random MAC address when unset.
    pub address: Option<String>,
    pub node_uuid: Option<String>,
    pub expect_errors: bool,
}

#[derive(Clone, Debug, Default)]
pub struct CredentialArgs {
    pub access_key: String,
    pub secret_key: String,
    pub user_id: String,
    pub project_id: String,
    pub expect_errors: bool,
}

/// State owned by one suite between setup and teardown: the clients and the
/// identifiers of everything created through them.
#[derive(Debug)]
pub struct TestContext {
    baremetal: BaremetalClient,
    credentials: Option<CredentialsClient>,
    created: CreatedResources,
}

impl TestContext {
    pub fn setup(baremetal: BaremetalClient, credentials: Option<CredentialsClient>) -> Self {
        Self {
            baremetal,
            credentials,
            created: CreatedResources::new(),
        }
    }

    pub fn client(&self) -> &BaremetalClient {
        &self.baremetal
    }

    pub fn credentials_client(&self) -> Result<&CredentialsClient> {
        self.credentials
            .as_ref()
            .ok_or_else(|| Error::Config("identity service is not configured".to_string()))
    }

    pub fn created(&self) -> &CreatedResources {
        &self.created
    }

    pub async fn create_chassis(&mut self, args: ChassisArgs) -> Result<Response<Chassis>> {
        let description = args
            .description
            .unwrap_or_else(|| rand_name("test-chassis"));
        let response = self.baremetal.create_chassis(&description).await?;
        self.track(BAREMETAL_CREATED, args.expect_errors, response)
    }

    pub async fn create_node(&mut self, spec: NodeSpec) -> Result<Response<Node>> {
        let response = self.baremetal.create_node(&spec).await?;
        self.track(BAREMETAL_CREATED, spec.expect_errors, response)
    }

    pub async fn create_port(&mut self, args: PortArgs) -> Result<Response<Port>> {
        let address = args.address.unwrap_or_else(rand_mac_address);
        let response = self
            .baremetal
            .create_port(&address, args.node_uuid.as_deref())
            .await?;
        self.track(BAREMETAL_CREATED, args.expect_errors, response)
    }

    pub async fn create_credential(&mut self, args: CredentialArgs) -> Result<Response<Credential>> {
        let response = self
            .credentials_client()?
            .create_credential(&args.access_key, &args.secret_key, &args.user_id, &args.project_id)
            .await?;
        self.track(CREDENTIAL_CREATED, args.expect_errors, response)
    }

    /// Deletes right away; the id is no longer swept at teardown once the
    /// server confirmed the deletion.
    pub async fn delete(&mut self, kind: ResourceKind, id: &str) -> Result<Response<()>> {
        let response = self.delete_resource(kind, id).await?;
        if response.is_success() {
            self.created.forget(kind, id);
        }
        Ok(response)
    }

    /// Deletes every tracked object. Every deletion is attempted; failures are
    /// reported together once the sweep is over.
    pub async fn teardown(&mut self) -> Result<()> {
        let mut failures = Vec::new();

        for (kind, ids) in self.created.drain() {
            let outcomes = join_all(ids.iter().map(|id| self.delete_resource(kind, id))).await;

            for (id, outcome) in ids.into_iter().zip(outcomes) {
                let reason = match outcome {
                    Ok(response) if response.is_success() => continue,
                    Ok(response) if response.status == 404 => {
                        debug!(%kind, %id, "already deleted");
                        continue;
                    }
                    Ok(response) => format!("unexpected status {}", response.status),
                    Err(err) => err.to_string(),
                };
                warn!(%kind, %id, %reason, "failed to clean up");
                failures.push(CleanupFailure { kind, id, reason });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Cleanup(failures))
        }
    }

    /// Registers the created object when the server assigned it an id, then
    /// checks the status. An object with an id is swept at teardown even when
    /// its status was unexpected.
    fn track<T: Resource>(&mut self, expected: u16, expect_errors: bool, response: Response<T>) -> Result<Response<T>> {
        if let Some(id) = response.body.identifier() {
            self.created.register(T::KIND, id);
        }
        check_response(expected, expect_errors, response)
    }

    async fn delete_resource(&self, kind: ResourceKind, id: &str) -> Result<Response<()>> {
        match kind {
            ResourceKind::Node => self.baremetal.delete_node(id).await,
            ResourceKind::Chassis => self.baremetal.delete_chassis(id).await,
            ResourceKind::Port => self.baremetal.delete_port(id).await,
            ResourceKind::Credential => self.credentials_client()?.delete_credential(id).await,
        }
    }
}
