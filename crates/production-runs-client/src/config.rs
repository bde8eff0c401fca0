//! Client configuration
//!
//! The base origin is injected at construction. Values can come from
//! defaults, the environment or a config file:
//!
//! | Variable | Field | Default |
//! |---|---|---|
//! | `PRODUCTION_RUNS_BASE_URL` | `base_url` | `http://localhost:9000/` |
//! | `PRODUCTION_RUNS_ID_ENCODING` | `id_encoding` | `segment` |
//! | `PRODUCTION_RUNS_USER_AGENT` | `user_agent` | `production-runs-client/<version>` |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ClientError, Result};

/// Default origin of the production runs API
pub const DEFAULT_BASE_URL: &str = "http://localhost:9000/";

pub const ENV_BASE_URL: &str = "PRODUCTION_RUNS_BASE_URL";
pub const ENV_ID_ENCODING: &str = "PRODUCTION_RUNS_ID_ENCODING";
pub const ENV_USER_AGENT: &str = "PRODUCTION_RUNS_USER_AGENT";

/// How a record identifier is placed into the request path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdEncoding {
    /// Percent-encode the id as a single path segment (`a/b` -> `a%2Fb`)
    #[default]
    Segment,
    /// Interpolate the id into the path as-is; `/`, `?` and `#` keep their URL meaning
    Verbatim,
}

impl fmt::Display for IdEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdEncoding::Segment => write!(f, "segment"),
            IdEncoding::Verbatim => write!(f, "verbatim"),
        }
    }
}

impl FromStr for IdEncoding {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "segment" | "encoded" => Ok(IdEncoding::Segment),
            "verbatim" | "literal" | "raw" => Ok(IdEncoding::Verbatim),
            other => Err(ClientError::config(format!("Unknown id encoding: {}", other))),
        }
    }
}

/// Configuration for the production runs client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin (and optional path prefix) every request path is joined onto
    pub base_url: String,

    /// Identifier placement for `get`
    pub id_encoding: IdEncoding,

    /// `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            id_encoding: IdEncoding::default(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration pointing at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the id encoding
    pub fn with_id_encoding(mut self, encoding: IdEncoding) -> Self {
        self.id_encoding = encoding;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url;
        }
        if let Some(encoding) = lookup(ENV_ID_ENCODING).filter(|v| !v.trim().is_empty()) {
            config.id_encoding = encoding.parse()?;
        }
        if let Some(agent) = lookup(ENV_USER_AGENT).filter(|v| !v.trim().is_empty()) {
            config.user_agent = agent;
        }

        Ok(config)
    }

    /// Load configuration from a JSON, YAML or TOML file, chosen by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        Self::parse(&content, extension.as_deref().unwrap_or("json"))
    }

    /// Parse configuration content in the given format (`json`, `yaml`, `yml`, `toml`)
    pub fn parse(content: &str, format: &str) -> Result<Self> {
        match format {
            "yaml" | "yml" => Ok(serde_yaml::from_str(content)?),
            "toml" => Ok(toml::from_str(content)?),
            "json" => serde_json::from_str(content)
                .map_err(|e| ClientError::config(format!("JSON error: {}", e))),
            other => Err(ClientError::config(format!(
                "Unsupported config format: {}",
                other
            ))),
        }
    }
}

fn default_user_agent() -> String {
    format!("production-runs-client/{}", crate::CLIENT_VERSION)
}
