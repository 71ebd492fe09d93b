//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: storage wiring (which `AccountStore` backs the server)
//! - `routes/`: HTTP routes + handlers
//! - `extract.rs`: typed extractors that reject into `ApiError`
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: the single place failures become HTTP responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: services::AppServices) -> Router {
    let services = Arc::new(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::trace_requests)))
}
