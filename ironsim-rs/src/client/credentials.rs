use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

use super::{decode_wrapped, json_headers};
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::path::resource_path;
use crate::transport::{AuthProvider, HttpTransport, Transport};
use crate::types::{Changes, Credential, CredentialBlob, Resource, ResourceKind, Response};

/// Every identity request goes to this root, whatever path the catalog reports.
pub const IDENTITY_BASE_PATH: &str = "/v3";

/// Wraps the identity v3 credentials API.
#[derive(Clone, Debug)]
pub struct CredentialsClient {
    transport: Arc<dyn Transport>,
}

impl CredentialsClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Builds an HTTP transport pinned to [`IDENTITY_BASE_PATH`].
    pub fn from_service(service: ServiceConfig, auth: Arc<dyn AuthProvider>) -> Self {
        let transport = HttpTransport::new(service, auth).with_base_path(IDENTITY_BASE_PATH);
        Self::new(Arc::new(transport))
    }

    pub async fn create_credential(
        &self,
        access_key: &str,
        secret_key: &str,
        user_id: &str,
        project_id: &str,
    ) -> Result<Response<Credential>> {
        let credential = Credential {
            id: None,
            blob: CredentialBlob {
                access: access_key.to_string(),
                secret: secret_key.to_string(),
            },
            project_id: project_id.to_string(),
            kind: "ec2".to_string(),
            user_id: user_id.to_string(),
            extra: Map::new(),
        };
        let uri = resource_path("", ResourceKind::Credential.collection(), None);
        let raw = self
            .transport
            .post(&uri, &json_headers(), wrap(&credential)?)
            .await?;
        Ok(Response {
            status: raw.status,
            body: decode_wrapped(&raw, "credential")?,
        })
    }

    /// Reads the credential, overlays the whitelisted `changes` and sends the
    /// full document back.
    pub async fn update_credential(&self, id: &str, changes: &Changes) -> Result<Response<Credential>> {
        let current = self.show_credential(id).await?.body;
        let updated = merge(current, changes);

        let uri = resource_path("", ResourceKind::Credential.collection(), Some(id));
        let raw = self
            .transport
            .patch(&uri, &json_headers(), wrap(&updated)?)
            .await?;
        Ok(Response {
            status: raw.status,
            body: decode_wrapped(&raw, "credential")?,
        })
    }

    pub async fn show_credential(&self, id: &str) -> Result<Response<Credential>> {
        let uri = resource_path("", ResourceKind::Credential.collection(), Some(id));
        let raw = self.transport.get(&uri, &json_headers()).await?;
        Ok(Response {
            status: raw.status,
            body: decode_wrapped(&raw, "credential")?,
        })
    }

    pub async fn list_credentials(&self) -> Result<Response<Vec<Credential>>> {
        let collection = ResourceKind::Credential.collection();
        let uri = resource_path("", collection, None);
        let raw = self.transport.get(&uri, &json_headers()).await?;
        Ok(Response {
            status: raw.status,
            body: decode_wrapped(&raw, collection)?,
        })
    }

    pub async fn delete_credential(&self, id: &str) -> Result<Response<()>> {
        let uri = resource_path("", ResourceKind::Credential.collection(), Some(id));
        let raw = self.transport.delete(&uri, &json_headers()).await?;
        Ok(Response {
            status: raw.status,
            body: (),
        })
    }
}

fn wrap(credential: &Credential) -> Result<String> {
    let mut body = Map::new();
    body.insert("credential".to_string(), serde_json::to_value(credential)?);
    Ok(Value::Object(body).to_string())
}

fn merge(mut credential: Credential, changes: &Changes) -> Credential {
    for attribute in Credential::KIND.mutable_attributes() {
        let Some(value) = changes.get(*attribute) else {
            continue;
        };
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        match *attribute {
            "type" => credential.kind = value,
            "access_key" => credential.blob.access = value,
            "secret_key" => credential.blob.secret = value,
            "project_id" => credential.project_id = value,
            "user_id" => credential.user_id = value,
            _ => {}
        }
    }
    for key in changes.keys() {
        if !Credential::KIND.mutable_attributes().contains(&key.as_str()) {
            debug!(attribute = %key, "dropping update for immutable attribute");
        }
    }
    credential.id = None;
    credential.extra.clear();
    credential
}
