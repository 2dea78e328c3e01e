use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use super::{decode, decode_wrapped, json_headers};
use crate::error::Result;
use crate::patch::build_patch;
use crate::path::resource_path;
use crate::transport::Transport;
use crate::types::{Changes, Chassis, Node, NodeSpec, Port, Resource, ResourceKind, Response};

/// Wraps the bare-metal provisioning API: nodes, chassis and ports.
#[derive(Clone, Debug)]
pub struct BaremetalClient {
    transport: Arc<dyn Transport>,
    uri_prefix: String,
}

impl BaremetalClient {
    pub fn new(transport: Arc<dyn Transport>, api_version: &str) -> Self {
        Self {
            transport,
            uri_prefix: format!("v{api_version}"),
        }
    }

    pub async fn list_nodes(&self) -> Result<Response<Vec<Node>>> {
        self.list_request().await
    }

    pub async fn list_chassis(&self) -> Result<Response<Vec<Chassis>>> {
        self.list_request().await
    }

    pub async fn list_ports(&self) -> Result<Response<Vec<Port>>> {
        self.list_request().await
    }

    pub async fn show_node(&self, uuid: &str) -> Result<Response<Node>> {
        self.show_request(uuid).await
    }

    pub async fn show_chassis(&self, uuid: &str) -> Result<Response<Chassis>> {
        self.show_request(uuid).await
    }

    pub async fn show_port(&self, uuid: &str) -> Result<Response<Port>> {
        self.show_request(uuid).await
    }

    pub async fn create_node(&self, spec: &NodeSpec) -> Result<Response<Node>> {
        self.create_request(&spec.to_node()).await
    }

    pub async fn create_chassis(&self, description: &str) -> Result<Response<Chassis>> {
        self.create_request(&json!({ "description": description })).await
    }

    pub async fn create_port(&self, address: &str, node_uuid: Option<&str>) -> Result<Response<Port>> {
        let port = Port {
            address: Some(address.to_string()),
            node_uuid: node_uuid.map(str::to_string),
            ..Default::default()
        };
        self.create_request(&port).await
    }

    pub async fn delete_node(&self, uuid: &str) -> Result<Response<()>> {
        self.delete_request(ResourceKind::Node, uuid).await
    }

    pub async fn delete_chassis(&self, uuid: &str) -> Result<Response<()>> {
        self.delete_request(ResourceKind::Chassis, uuid).await
    }

    pub async fn delete_port(&self, uuid: &str) -> Result<Response<()>> {
        self.delete_request(ResourceKind::Port, uuid).await
    }

    /// Applies the whitelisted subset of `changes` to a node. Nested
    /// properties are addressed as `properties/<name>`.
    pub async fn update_node(&self, uuid: &str, changes: &Changes) -> Result<Response<Node>> {
        self.patch_request(uuid, changes).await
    }

    pub async fn update_chassis(&self, uuid: &str, changes: &Changes) -> Result<Response<Chassis>> {
        self.patch_request(uuid, changes).await
    }

    pub async fn update_port(&self, uuid: &str, changes: &Changes) -> Result<Response<Port>> {
        self.patch_request(uuid, changes).await
    }

    async fn list_request<T: Resource + DeserializeOwned>(&self) -> Result<Response<Vec<T>>> {
        let collection = T::KIND.collection();
        let uri = resource_path(&self.uri_prefix, collection, None);
        let raw = self.transport.get(&uri, &json_headers()).await?;
        Ok(Response {
            status: raw.status,
            body: decode_wrapped(&raw, collection)?,
        })
    }

    async fn show_request<T: Resource + DeserializeOwned>(&self, uuid: &str) -> Result<Response<T>> {
        let uri = resource_path(&self.uri_prefix, T::KIND.collection(), Some(uuid));
        let raw = self.transport.get(&uri, &json_headers()).await?;
        Ok(Response {
            status: raw.status,
            body: decode(&raw)?,
        })
    }

    async fn create_request<T, B>(&self, body: &B) -> Result<Response<T>>
    where
        T: Resource + DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let uri = resource_path(&self.uri_prefix, T::KIND.collection(), None);
        let raw = self
            .transport
            .post(&uri, &json_headers(), serde_json::to_string(body)?)
            .await?;
        Ok(Response {
            status: raw.status,
            body: decode(&raw)?,
        })
    }

    async fn delete_request(&self, kind: ResourceKind, uuid: &str) -> Result<Response<()>> {
        let uri = resource_path(&self.uri_prefix, kind.collection(), Some(uuid));
        let raw = self.transport.delete(&uri, &json_headers()).await?;
        Ok(Response {
            status: raw.status,
            body: (),
        })
    }

    async fn patch_request<T: Resource + DeserializeOwned>(&self, uuid: &str, changes: &Changes) -> Result<Response<T>> {
        let uri = resource_path(&self.uri_prefix, T::KIND.collection(), Some(uuid));
        let patch = build_patch(T::KIND.mutable_attributes(), changes);
        let raw = self
            .transport
            .patch(&uri, &json_headers(), serde_json::to_string(&patch)?)
            .await?;
        Ok(Response {
            status: raw.status,
            body: decode(&raw)?,
        })
    }
}
