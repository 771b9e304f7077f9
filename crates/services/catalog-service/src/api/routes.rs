//! Route configuration.

use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::auth::identity_middleware;
use super::handlers::{health_check, product_routes, review_routes, variant_routes};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the main router with all routes.
///
/// Requests running past `request_timeout` are answered with 408; the
/// handler future is dropped, which rolls back any open transaction.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let catalog = Router::new()
        .merge(variant_routes())
        .merge(product_routes())
        .merge(review_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            identity_middleware,
        ));

    Router::new()
        // Health check (no identity)
        .route("/health", get(health_check))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(catalog)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
