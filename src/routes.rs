//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`    - Health check (public)
//! - `{prefix}/*`      - Admin site (cookie session required, except login)
//! - `/static/*`       - Static assets (chart script)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Cookie session on admin pages
//! - **Path normalization** - Trailing slash handling
//!
//! Per-IP rate limiting is only added by [`rate_limited_router`]; it needs
//! the peer address, which only a real listener provides.

use crate::admin;
use crate::admin::middleware::admin_auth;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

fn admin_router(state: &AppState, rate_limited: bool) -> Router<AppState> {
    let mut protected = admin::routes::protected_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), admin_auth::layer),
    );
    let mut public = admin::routes::public_routes();

    if rate_limited {
        protected = protected.layer(rate_limit::layer());
        public = public.layer(rate_limit::login_layer());
    }

    Router::new().merge(protected).merge(public)
}

fn build(state: AppState, rate_limited: bool) -> Router {
    let admin_router = admin_router(&state, rate_limited);

    Router::new()
        .route("/health", get(health_handler))
        .nest(&state.admin_prefix, admin_router)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}

/// All routes without rate limiting or path normalization.
///
/// Integration tests drive this with `axum_test::TestServer`.
pub fn router(state: AppState) -> Router {
    build(state, false)
}

/// [`router`] with trailing slashes trimmed, so `{prefix}/subscribers/chart_data/`
/// reaches the same handler.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// Production router with per-IP rate limiting.
///
/// Must be served with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn rate_limited_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build(state, true))
}
