//! PawHaven HTTP API.
//!
//! Exposes the animal and sponsorship bounded contexts over axum. All
//! dependencies are constructed once at startup and injected through
//! [`state::AppState`]; request handlers never reach for globals.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod routes;
pub mod state;

/// Assembles the full application router.
#[must_use]
pub fn app(state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/animals", routes::animal::router())
        .nest("/api/v1/sponsorships", routes::sponsorship::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
