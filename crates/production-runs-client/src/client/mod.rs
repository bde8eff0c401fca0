//! HTTP client for the production runs API
//!
//! Each operation issues exactly one request and hands the response back
//! unchanged. A non-success status fails the call with
//! [`ClientError::Status`]; nothing is retried, cached or deduplicated.
//!
//! The client is cheap to clone and clones share one connection pool, so
//! any number of calls may be in flight at once.

use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::config::{ClientConfig, IdEncoding};
use crate::contracts::{ProductionRun, RawResponse, REQUEST_ID_HEADER, RESOURCE_PATH};
use crate::error::{ClientError, Result};

/// Client bound to one production runs API origin
#[derive(Debug, Clone)]
pub struct ProductionRunsClient {
    client: Client,
    base_url: Url,
    user_agent: HeaderValue,
    config: ClientConfig,
}

impl ProductionRunsClient {
    /// Create a client with its own HTTP connection pool
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::config(format!("Failed to create HTTP client: {}", e)))?;
        Self::with_http_client(config, client)
    }

    /// Create a client on top of an existing `reqwest::Client`
    pub fn with_http_client(config: ClientConfig, client: Client) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|_| {
            ClientError::config(format!(
                "Invalid user agent '{}'",
                config.user_agent.escape_debug()
            ))
        })?;
        Ok(Self {
            client,
            base_url,
            user_agent,
            config,
        })
    }

    /// Create a client configured from `PRODUCTION_RUNS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Fetch the whole collection: `GET /production-runs`
    pub async fn list(&self) -> Result<RawResponse> {
        let url = self.collection_url();
        self.send(Method::GET, url, None).await
    }

    /// Fetch one record: `GET /production-runs/{id}`
    pub async fn get(&self, id: impl fmt::Display) -> Result<RawResponse> {
        let url = self.run_url(&id.to_string())?;
        self.send(Method::GET, url, None).await
    }

    /// Create a record: `POST /production-runs` with `run` serialized as JSON
    pub async fn post<T>(&self, run: &T) -> Result<RawResponse>
    where
        T: Serialize + ?Sized,
    {
        let body =
            serde_json::to_vec(run).map_err(|e| ClientError::Serialization(e.to_string()))?;
        let url = self.collection_url();
        self.send(Method::POST, url, Some(body)).await
    }

    /// List and decode every run
    pub async fn list_runs(&self) -> Result<Vec<ProductionRun>> {
        self.list().await?.json()
    }

    /// Fetch and decode one run
    pub async fn get_run(&self, id: impl fmt::Display) -> Result<ProductionRun> {
        self.get(id).await?.json()
    }

    /// Create a run and decode the server's copy of it
    pub async fn create_run(&self, run: &ProductionRun) -> Result<ProductionRun> {
        self.post(run).await?.json()
    }

    /// URL of the resource collection
    pub fn collection_url(&self) -> Url {
        let mut url = self.base_url.clone();
        // parse_base_url rejects cannot-be-a-base URLs
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(RESOURCE_PATH);
        }
        url
    }

    /// URL of a single record, placing `id` according to the configured encoding
    pub fn run_url(&self, id: &str) -> Result<Url> {
        match self.config.id_encoding {
            IdEncoding::Segment => {
                // URL normalisation turns these back into dot segments however they are escaped
                if id == "." || id == ".." {
                    return Err(ClientError::InvalidId(id.to_string()));
                }
                let mut url = self.collection_url();
                url.path_segments_mut()
                    .map_err(|_| ClientError::InvalidId(id.to_string()))?
                    .push(id);
                Ok(url)
            }
            IdEncoding::Verbatim => {
                let raw = format!("{}/{}", self.collection_url(), id);
                Url::parse(&raw).map_err(|_| ClientError::InvalidId(id.to_string()))
            }
        }
    }

    /// Base URL requests are joined onto
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<RawResponse> {
        let request_id = Uuid::new_v4();

        tracing::debug!(
            method = %method,
            url = %url,
            request_id = %request_id,
            "Sending production runs request"
        );

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(USER_AGENT, self.user_agent.clone())
            .header(REQUEST_ID_HEADER, request_id.to_string());

        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(
                method = %method,
                url = %url,
                request_id = %request_id,
                error = %e,
                "Production runs request failed"
            );
            ClientError::Network(e.to_string())
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?
            .to_vec();

        if status.is_success() {
            tracing::debug!(
                request_id = %request_id,
                status = status.as_u16(),
                bytes = body.len(),
                "Production runs request completed"
            );
            Ok(RawResponse::new(status.as_u16(), headers, body))
        } else {
            tracing::warn!(
                method = %method,
                url = %url,
                request_id = %request_id,
                status = status.as_u16(),
                "Production runs request returned error status"
            );
            Err(ClientError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            })
        }
    }
}

/// Parse and normalise the base URL; query and fragment are dropped
fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ClientError::config(format!("Invalid base URL '{}': {}", base_url, e)))?;

    if url.cannot_be_a_base() {
        return Err(ClientError::config(format!(
            "Base URL '{}' cannot carry a path",
            base_url
        )));
    }

    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
