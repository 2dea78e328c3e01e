use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::config::ServiceConfig;
use crate::error::Result;

pub type Headers = HashMap<String, String>;

/// Status and undecoded body of an HTTP exchange.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// The HTTP seam the clients talk through. Paths are relative to the
/// service root; bodies are opaque strings.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get(&self, path: &str, headers: &Headers) -> Result<RawResponse>;
    async fn post(&self, path: &str, headers: &Headers, body: String) -> Result<RawResponse>;
    async fn patch(&self, path: &str, headers: &Headers, body: String) -> Result<RawResponse>;
    async fn delete(&self, path: &str, headers: &Headers) -> Result<RawResponse>;
}

/// Token and service root to use for the next request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub base_url: Url,
}

/// Supplies a session before every request.
#[async_trait]
pub trait AuthProvider: Send + Sync + Debug {
    async fn authenticate(&self, service: &ServiceConfig) -> Result<Session>;
}

/// Serves a pre-issued token and the configured service URL.
#[derive(Clone, Debug, Default)]
pub struct StaticAuth {
    pub token: Option<String>,
}

impl StaticAuth {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn authenticate(&self, service: &ServiceConfig) -> Result<Session> {
        Ok(Session {
            token: self.token.clone(),
            base_url: Url::parse(&service.url)?,
        })
    }
}

/// reqwest-backed [`Transport`].
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    service: ServiceConfig,
    auth: Arc<dyn AuthProvider>,
    base_path: Option<String>,
}

impl HttpTransport {
    pub fn new(service: ServiceConfig, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            client: reqwest::Client::new(),
            service,
            auth,
            base_path: None,
        }
    }

    /// Replaces the path of the session base URL on every request.
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    async fn prepare(&self, method: reqwest::Method, path: &str, headers: &Headers) -> Result<reqwest::RequestBuilder> {
        let session = self.auth.authenticate(&self.service).await?;
        let url = join_url(session.base_url, self.base_path.as_deref(), path)?;
        debug!(%method, %url, "sending request");

        let mut request = self.client.request(method, url);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        if let Some(token) = session.token {
            request = request.header("X-Auth-Token", token);
        }
        Ok(request)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<RawResponse> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, "received response");
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, headers: &Headers) -> Result<RawResponse> {
        let request = self.prepare(reqwest::Method::GET, path, headers).await?;
        self.send(request).await
    }

    async fn post(&self, path: &str, headers: &Headers, body: String) -> Result<RawResponse> {
        let request = self.prepare(reqwest::Method::POST, path, headers).await?;
        self.send(request.body(body)).await
    }

    async fn patch(&self, path: &str, headers: &Headers, body: String) -> Result<RawResponse> {
        let request = self.prepare(reqwest::Method::PATCH, path, headers).await?;
        self.send(request.body(body)).await
    }

    async fn delete(&self, path: &str, headers: &Headers) -> Result<RawResponse> {
        let request = self.prepare(reqwest::Method::DELETE, path, headers).await?;
        self.send(request).await
    }
}

fn join_url(mut base: Url, base_path: Option<&str>, path: &str) -> Result<Url> {
    if let Some(base_path) = base_path {
        base.set_path(base_path);
    }
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(Url::parse(&joined)?)
}
