//! In-memory stand-in for the provisioning and identity APIs.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use std::sync::Mutex;

use crate::error::Result;
use crate::transport::{Headers, RawResponse, Transport};

const COLLECTIONS: [&str; 4] = ["nodes", "chassis", "ports", "credentials"];

#[derive(Debug, Default)]
struct State {
    objects: Vec<(String, Value)>,
    next_id: u64,
    deletes: Vec<String>,
    failing: BTreeSet<String>,
}

#[derive(Debug, Default)]
pub struct FakeCloud {
    state: Mutex<State>,
    create_status: Option<u16>,
}

impl FakeCloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers creations with `status`; 4xx/5xx store nothing.
    pub fn with_create_status(status: u16) -> Self {
        Self {
            create_status: Some(status),
            ..Self::default()
        }
    }

    /// Every DELETE path received, in order.
    pub fn deletes(&self) -> Vec<String> {
        self.state.lock().unwrap().deletes.clone()
    }

    pub fn fail_deletes_of(&self, id: &str) {
        self.state.lock().unwrap().failing.insert(id.to_string());
    }

    /// Drops an object behind the harness's back.
    pub fn remove(&self, path: &str) {
        self.state.lock().unwrap().objects.retain(|(p, _)| p != path);
    }

    fn respond(status: u16, body: Value) -> Result<RawResponse> {
        Ok(RawResponse {
            status,
            body: body.to_string(),
        })
    }

    fn not_found(path: &str) -> Result<RawResponse> {
        Self::respond(404, json!({"error_message": format!("{path} not found")}))
    }
}

fn split(path: &str) -> (&str, Option<&str>) {
    if COLLECTIONS.iter().any(|c| path.ends_with(c)) {
        (path, None)
    } else {
        match path.rsplit_once('/') {
            Some((collection, id)) => (collection, Some(id)),
            None => (path, None),
        }
    }
}

fn is_identity(collection: &str) -> bool {
    collection.ends_with("credentials")
}

fn id_field(collection: &str) -> &'static str {
    if is_identity(collection) {
        "id"
    } else {
        "uuid"
    }
}

fn resource_name(collection: &str) -> &str {
    collection.rsplit('/').next().unwrap_or(collection)
}

/// Applies one `replace` operation; the parent of the target must exist.
fn set_pointer(target: &mut Value, path: &str, value: Value) {
    let Some((parent, key)) = path.rsplit_once('/') else {
        return;
    };
    if let Some(Value::Object(map)) = target.pointer_mut(parent) {
        map.insert(key.to_string(), value);
    }
}

#[async_trait]
impl Transport for FakeCloud {
    async fn get(&self, path: &str, _headers: &Headers) -> Result<RawResponse> {
        let state = self.state.lock().unwrap();
        let (collection, id) = split(path);

        match id {
            None => {
                let prefix = format!("{collection}/");
                let items: Vec<Value> = state
                    .objects
                    .iter()
                    .filter(|(p, _)| p.starts_with(&prefix))
                    .map(|(_, v)| v.clone())
                    .collect();
                let mut body = Map::new();
                body.insert(resource_name(collection).to_string(), Value::Array(items));
                Self::respond(200, Value::Object(body))
            }
            Some(_) => match state.objects.iter().find(|(p, _)| p == path) {
                Some((_, object)) if is_identity(collection) => {
                    Self::respond(200, json!({"credential": object}))
                }
                Some((_, object)) => Self::respond(200, object.clone()),
                None => Self::not_found(path),
            },
        }
    }

    async fn post(&self, path: &str, _headers: &Headers, body: String) -> Result<RawResponse> {
        let mut state = self.state.lock().unwrap();
        let (collection, _) = split(path);
        let mut body: Value = serde_json::from_str(&body)?;

        if is_identity(collection) {
            let status = self.create_status.unwrap_or(201);
            if status >= 400 {
                return Self::respond(
                    status,
                    json!({"error": {"code": status, "message": "invalid input", "title": "Bad Request"}}),
                );
            }
            let mut object = body["credential"].take();
            state.next_id += 1;
            let id = format!("cred-{:04}", state.next_id);
            object["id"] = json!(id);
            state.objects.push((format!("{collection}/{id}"), object.clone()));
            return Self::respond(status, json!({"credential": object}));
        }

        let status = self.create_status.unwrap_or(200);
        if status >= 400 {
            return Self::respond(status, json!({"error_message": "invalid input"}));
        }
        state.next_id += 1;
        let uuid = format!("00000000-0000-0000-0000-{:012}", state.next_id);
        body[id_field(collection)] = json!(uuid);
        state.objects.push((format!("{collection}/{uuid}"), body.clone()));
        Self::respond(status, body)
    }

    async fn patch(&self, path: &str, _headers: &Headers, body: String) -> Result<RawResponse> {
        let mut state = self.state.lock().unwrap();
        let (collection, _) = split(path);
        let body: Value = serde_json::from_str(&body)?;

        let Some((_, object)) = state.objects.iter_mut().find(|(p, _)| p == path) else {
            return Self::not_found(path);
        };

        if is_identity(collection) {
            if let Value::Object(fields) = &body["credential"] {
                for (key, value) in fields {
                    object[key.as_str()] = value.clone();
                }
            }
            return Self::respond(200, json!({"credential": object}));
        }

        for op in body.as_array().into_iter().flatten() {
            if let (Some(pointer), Some(value)) = (op["path"].as_str(), op.get("value")) {
                set_pointer(object, pointer, value.clone());
            }
        }
        Self::respond(200, object.clone())
    }

    async fn delete(&self, path: &str, _headers: &Headers) -> Result<RawResponse> {
        let mut state = self.state.lock().unwrap();
        state.deletes.push(path.to_string());

        let (_, id) = split(path);
        if id.is_some_and(|id| state.failing.contains(id)) {
            return Self::respond(500, json!({"error_message": "internal error"}));
        }

        let before = state.objects.len();
        state.objects.retain(|(p, _)| p != path);
        if state.objects.len() == before {
            return Self::not_found(path);
        }
        Ok(RawResponse {
            status: 204,
            body: String::new(),
        })
    }
}
