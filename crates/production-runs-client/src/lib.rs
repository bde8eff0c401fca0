//! Production Runs Client
//!
//! Async HTTP binding for the `production-runs` resource collection.
//!
//! ## Operations
//!
//! | Method | Request | Returns |
//! |---|---|---|
//! | `list()` | `GET /production-runs` | raw response |
//! | `get(id)` | `GET /production-runs/{id}` | raw response |
//! | `post(run)` | `POST /production-runs` | raw response |
//!
//! `list_runs`, `get_run` and `create_run` decode the same responses into
//! [`ProductionRun`] values.
//!
//! ## Example
//!
//! ```rust,no_run
//! use production_runs_client::{ClientConfig, ProductionRun, ProductionRunsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), production_runs_client::ClientError> {
//!     let client = ProductionRunsClient::new(ClientConfig::new("http://localhost:9000/"))?;
//!
//!     let response = client.get(42).await?;
//!     println!("{} {}", response.status, response.text());
//!
//!     let created = client
//!         .create_run(&ProductionRun::new("RUN-001", "WIDGET").with_volume(100))
//!         .await?;
//!     println!("created {:?}", created.id_string());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod contracts;
pub mod error;

pub use client::ProductionRunsClient;
pub use config::{ClientConfig, IdEncoding, DEFAULT_BASE_URL};
pub use contracts::{ProductionRun, RawResponse};
pub use error::{ClientError, Result};

/// Client version (from Cargo.toml)
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");
