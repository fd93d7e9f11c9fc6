//! API router.
//!
//! Returns a composable `Router` with all routes under `/api/`.
//!
//! Middleware stack (outermost → innermost):
//! 1. CORS → 2. General rate limit → 3. Analysis rate limit (analyze route only)

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router.
///
/// Middleware uses `Extension<ApiContext>` (injected outside the rate limiters).
/// Endpoint handlers use `State<ApiContext>` (provided via `with_state`).
pub fn api_router(ctx: ApiContext) -> Router {
    let cors = cors_layer(&ctx.client_url);

    let analysis = Router::new()
        .route("/symptoms/analyze", post(endpoints::symptoms::analyze))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::rate::limit_analysis));

    let general = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/symptoms/catalog", get(endpoints::symptoms::catalog))
        .with_state(ctx.clone());

    Router::new()
        .nest("/api", general.merge(analysis))
        .layer(axum::middleware::from_fn(middleware::rate::limit))
        // Extension must wrap the limiters so they can extract ApiContext
        .layer(axum::Extension(ctx))
        .layer(cors)
}

fn cors_layer(client_url: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match HeaderValue::from_str(client_url) {
        Ok(origin) => base.allow_origin(AllowOrigin::exact(origin)),
        Err(e) => {
            tracing::warn!(client_url, error = %e, "Invalid CORS origin, cross-origin requests disabled");
            base
        }
    }
}
