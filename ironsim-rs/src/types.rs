use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Proposed attribute updates, keyed by attribute name.
pub type Changes = Map<String, Value>;

/// The categories of server-managed objects the harness creates and cleans up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Node,
    Chassis,
    Port,
    Credential,
}

impl ResourceKind {
    /// Teardown order: dependents before the objects they hang off.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Port,
        ResourceKind::Node,
        ResourceKind::Chassis,
        ResourceKind::Credential,
    ];

    /// Collection name used in URIs and list bodies.
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Node => "nodes",
            ResourceKind::Chassis => "chassis",
            ResourceKind::Port => "ports",
            ResourceKind::Credential => "credentials",
        }
    }

    /// Attributes an update may touch.
    pub fn mutable_attributes(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Node => &[
                "properties/cpu_arch",
                "properties/cpu_num",
                "properties/storage",
                "properties/memory",
                "driver",
            ],
            ResourceKind::Chassis => &["description"],
            ResourceKind::Port => &["address"],
            ResourceKind::Credential => {
                &["type", "access_key", "secret_key", "project_id", "user_id"]
            }
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Node => f.write_str("node"),
            ResourceKind::Chassis => f.write_str("chassis"),
            ResourceKind::Port => f.write_str("port"),
            ResourceKind::Credential => f.write_str("credential"),
        }
    }
}

/// A server object the cleanup tracker can register.
pub trait Resource {
    const KIND: ResourceKind;

    /// Server-assigned identifier, absent when the server refused the request.
    fn identifier(&self) -> Option<&str>;
}

/// Status code and decoded body of a single call.
#[derive(Clone, Debug, PartialEq)]
pub struct Response<T> {
    pub status: u16,
    pub body: T,
}

impl<T> Response<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            status: self.status,
            body: f(self.body),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_arch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_num: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default)]
    pub properties: NodeProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chassis_uuid: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for Node {
    const KIND: ResourceKind = ResourceKind::Node;

    fn identifier(&self) -> Option<&str> {
        self.uuid.as_deref()
    }
}

/// Parameters of a node creation; unset fields take the documented defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSpec {
    pub cpu_arch: String,
    pub cpu_num: u32,
    pub storage: u64,
    pub memory: u64,
    pub driver: Option<String>,
    pub chassis_uuid: Option<String>,
    pub expect_errors: bool,
}

impl Default for NodeSpec {
    fn default() -> Self {
        Self {
            cpu_arch: "x86_64".to_string(),
            cpu_num: 8,
            storage: 1024,
            memory: 4096,
            driver: None,
            chassis_uuid: None,
            expect_errors: false,
        }
    }
}

impl NodeSpec {
    pub(crate) fn to_node(&self) -> Node {
        Node {
            uuid: None,
            properties: NodeProperties {
                cpu_arch: Some(self.cpu_arch.clone()),
                cpu_num: Some(self.cpu_num),
                storage: Some(self.storage),
                memory: Some(self.memory),
                extra: Map::new(),
            },
            driver: self.driver.clone(),
            chassis_uuid: self.chassis_uuid.clone(),
            extra: Map::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Chassis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for Chassis {
    const KIND: ResourceKind = ResourceKind::Chassis;

    fn identifier(&self) -> Option<&str> {
        self.uuid.as_deref()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Port {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_uuid: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for Port {
    const KIND: ResourceKind = ResourceKind::Port;

    fn identifier(&self) -> Option<&str> {
        self.uuid.as_deref()
    }
}

/// The access/secret key pair carried inside a credential.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBlob {
    #[serde(default)]
    pub access: String,
    #[serde(default)]
    pub secret: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, with = "blob_json")]
    pub blob: CredentialBlob,
    #[serde(default)]
    pub project_id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for Credential {
    const KIND: ResourceKind = ResourceKind::Credential;

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// The blob travels as a JSON document encoded into a string field.
mod blob_json {
    use super::CredentialBlob;
    use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(blob: &CredentialBlob, serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = serde_json::to_string(blob).map_err(S::Error::custom)?;
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<CredentialBlob, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        serde_json::from_str(&encoded).map_err(D::Error::custom)
    }
}

/// RFC 6902 operation; the harness only ever emits `replace`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub path: String,
    pub value: Value,
    pub op: String,
}

/// Describes the outcome of a test.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub pass: bool,
    pub details: String,
}
