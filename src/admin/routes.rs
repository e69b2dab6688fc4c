//! Admin route configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::admin::handlers::{
    changelist_handler, chart_data_handler, index_handler, login_page_handler,
    login_submit_handler, logout_handler,
};
use crate::state::AppState;

/// Admin routes requiring a session cookie.
///
/// Protected via [`crate::admin::middleware::admin_auth`].
///
/// # Endpoints
///
/// - `GET /` - Redirect to the subscriber changelist
/// - `GET /subscribers` - Subscriber changelist with signup chart
/// - `GET /subscribers/chart_data` - Daily signups over all subscribers (JSON)
/// - `POST /logout` - End the session
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/subscribers", get(changelist_handler))
        .route("/subscribers/chart_data", get(chart_data_handler))
        .route("/logout", post(logout_handler))
}

/// Public admin routes.
///
/// # Endpoints
///
/// - `GET /login` - Login page
/// - `POST /login` - Token check, sets the session cookie
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/login", get(login_page_handler).post(login_submit_handler))
}
