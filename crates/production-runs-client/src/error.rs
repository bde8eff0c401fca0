//! Error types for the production runs client
//!
//! Failures are surfaced as-is: transport errors, non-success statuses and
//! decoding problems each get a variant, and nothing is retried or recovered.

use thiserror::Error;

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid base URL, config file or environment value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Identifier cannot be placed into a request path
    #[error("Invalid run id: {0:?}")]
    InvalidId(String),

    /// Transport failure (connection refused, DNS, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ClientError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        ClientError::Config(msg.into())
    }

    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server reported the record as missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this error was caused by the caller's input (vs the network or server)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ClientError::Config(_) | ClientError::InvalidId(_) | ClientError::Serialization(_)
        )
    }
}

impl From<serde_yaml::Error> for ClientError {
    fn from(err: serde_yaml::Error) -> Self {
        ClientError::Config(format!("YAML error: {}", err))
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::Config(format!("TOML error: {}", err))
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
