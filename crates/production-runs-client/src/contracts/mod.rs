//! Wire contracts for the production runs API
//!
//! - `response` - raw response pass-through (status, headers, body)
//! - `production_run` - typed view of a production run record

pub mod production_run;
pub mod response;

pub use production_run::{ProductionRun, STATUS_IN_PROGRESS};
pub use response::RawResponse;

/// Resource collection every operation addresses
pub const RESOURCE_PATH: &str = "production-runs";

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";
