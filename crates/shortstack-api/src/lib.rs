//! HTTP surface for the short generation pipeline.
//!
//! One generation endpoint, one artifact endpoint, one liveness probe.
//! The interactive form itself lives outside this repository; this crate
//! only exposes what it needs: two URL inputs in, a playable/downloadable
//! file or a single error message out.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
