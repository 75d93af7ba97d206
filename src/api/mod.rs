//! HTTP surface of the companion.
//!
//! A single axum router serves the form page and a small JSON API under
//! `/api/`. Handlers are thin: they decode the request, hand the raw
//! identifier to [`crate::care_flow::CareFlow`] on the blocking pool and map
//! the outcome to a response.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{serve_until_shutdown, start_server_on, ApiServer};
pub use types::ApiContext;
