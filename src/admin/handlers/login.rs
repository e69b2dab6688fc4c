//! Login and logout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use validator::Validate;

use crate::admin::dto::LoginForm;
use crate::admin::middleware::admin_auth::AUTH_COOKIE;
use crate::error::AppError;
use crate::state::AppState;

/// Login page with a single token field.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub admin_prefix: String,
    pub error: Option<String>,
}

impl LoginTemplate {
    fn new(state: &AppState, error: Option<String>) -> Self {
        Self {
            admin_prefix: state.admin_prefix.clone(),
            error,
        }
    }
}

fn session_cookie(prefix: &str, token: &str) -> String {
    format!("{AUTH_COOKIE}={token}; HttpOnly; SameSite=Strict; Path={prefix}")
}

fn expired_cookie(prefix: &str) -> String {
    format!("{AUTH_COOKIE}=; HttpOnly; SameSite=Strict; Path={prefix}; Max-Age=0")
}

/// `GET {prefix}/login`
pub async fn login_page_handler(State(state): State<AppState>) -> LoginTemplate {
    LoginTemplate::new(&state, None)
}

/// Checks the submitted token and starts a cookie session.
///
/// # Endpoint
///
/// `POST {prefix}/login` with form field `token`.
///
/// # Responses
///
/// - `303` to `{prefix}/subscribers` with `Set-Cookie: auth_token=...` on success
/// - `400` login page with a message when the token is empty, too long or
///   contains characters a cookie cannot carry
/// - `401` login page with a message for unknown or revoked tokens
///
/// # Errors
///
/// Returns `500` if the token store cannot be queried.
pub async fn login_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if form.validate().is_err() {
        let page = LoginTemplate::new(&state, Some("Enter your admin token.".to_string()));
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    }

    match state.auth_service.authenticate(&form.token).await {
        Ok(()) => {
            tracing::info!("Admin login succeeded");
            let cookie = session_cookie(&state.admin_prefix, &form.token);
            Ok((
                AppendHeaders([(SET_COOKIE, cookie)]),
                Redirect::to(&state.admin_path("/subscribers")),
            )
                .into_response())
        }
        Err(AppError::Unauthorized { .. }) => {
            tracing::warn!("Admin login with invalid or revoked token");
            let page = LoginTemplate::new(
                &state,
                Some("Invalid or revoked token.".to_string()),
            );
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Ends the cookie session and returns to the login page.
///
/// `POST {prefix}/logout`
pub async fn logout_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, expired_cookie(&state.admin_prefix))]),
        Redirect::to(&state.admin_path("/login")),
    )
}
