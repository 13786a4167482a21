//! Application wiring (router + backing services).
//!
//! Layout:
//! - `services.rs`: backend client, session manager and poller wiring
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `errors.rs`: consistent JSON error responses

use axum::Router;
use tower::ServiceBuilder;

use notapro_stats::StatsHandle;

use crate::config::GatewayConfig;
use crate::middleware;

pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppState;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests). Spawns the statistics poller; the returned handle stops
/// it on teardown.
///
/// Must be called from within a Tokio runtime.
pub fn build_app(config: GatewayConfig) -> (Router, StatsHandle) {
    let (state, poller) = services::build_services(&config);
    let stats = poller.handle();
    poller.start();

    let router = routes::router()
        .with_state(state)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::route_guard)));

    (router, stats)
}
