//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                       - Liveness text
//! GET    /health                 - Health check
//! GET    /health/ready           - Readiness check (pings the store)
//!
//! # Products
//! GET    /products               - Filtered, paginated listing
//! GET    /productsCount          - Unfiltered document count
//! POST   /products               - Create
//! PUT    /products/{id}          - Merge fields
//! DELETE /products/{id}          - Delete
//!
//! # Users
//! GET    /users                  - All users, or one by ?email=
//! POST   /users                  - Create
//! DELETE /users/{id}             - Delete
//!
//! # Content collections
//! GET|POST        /featuredCategories, /specialOffers
//! PUT|DELETE      /featuredCategories/{id}, /specialOffers/{id}
//! GET|POST        /featuredBrands, /blogPosts, /testimonials
//! DELETE          /featuredBrands/{id}, /blogPosts/{id}, /testimonials/{id}
//! GET|POST        /newsLetter
//! ```
//!
//! Mutation endpoints are unauthenticated; an auth layer belongs in front
//! of the router, not inside the handlers.

pub mod health;
pub mod products;
pub mod resources;
pub mod users;

#[cfg(test)]
mod tests;

use axum::{Router, middleware as axum_middleware, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use electron_core::Collection;

use crate::middleware::{cors_layer, request_id_middleware};
use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    let router = Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/productsCount", get(products::count));

    Collection::ALL
        .into_iter()
        .fold(router, |router, collection| {
            router.merge(resources::collection_routes(collection))
        })
}

/// Build the application with its middleware stack and state.
///
/// Sentry layers are added by the binary so they wrap everything.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config().cors_origins);

    routes()
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(cors)
        .with_state(state)
}
