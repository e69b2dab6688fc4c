//! Cookie-based authentication middleware for the admin site.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie holding the raw admin token.
pub const AUTH_COOKIE: &str = "auth_token";

/// Extracts the `auth_token` value from the `Cookie` header.
///
/// Handles several cookies in one header (`a=1; auth_token=xyz; b=2`) and
/// ignores the others. An empty value counts as absent.
pub fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookie_str| cookie_str.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name == AUTH_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
}

/// Authenticates admin requests using the `auth_token` cookie.
///
/// # Authentication Flow
///
/// 1. Extract `auth_token` cookie from request
/// 2. Validate token via [`crate::application::services::AuthService`]
/// 3. On success, continue to handler
/// 4. On a missing, unknown or revoked token, redirect to `{prefix}/login`
///
/// Token store failures are not a login problem and render as `500`.
///
/// The JSON chart endpoint sits behind the same check, so an expired
/// session answers it with a redirect rather than `401`.
///
/// # Example
///
/// ```rust,ignore
/// let protected = admin::routes::protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    let login = st.admin_path("/login");

    let Some(token) = token_from_cookies(req.headers()) else {
        tracing::debug!(path = %req.uri().path(), "Admin request without session cookie");
        return Err(Redirect::to(&login).into_response());
    };

    match st.auth_service.authenticate(&token).await {
        Ok(()) => Ok(next.run(req).await),
        Err(AppError::Unauthorized { .. }) => {
            tracing::info!("Rejected admin session token");
            Err(Redirect::to(&login).into_response())
        }
        Err(e) => Err(e.into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_token_among_other_cookies() {
        assert_eq!(
            token_from_cookies(&headers("theme=dark; auth_token=abc123; lang=en")),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_missing_or_empty_token() {
        assert_eq!(token_from_cookies(&HeaderMap::new()), None);
        assert_eq!(token_from_cookies(&headers("theme=dark")), None);
        assert_eq!(token_from_cookies(&headers("auth_token=")), None);
    }

    #[test]
    fn test_similar_cookie_name_is_not_matched() {
        assert_eq!(token_from_cookies(&headers("old_auth_token=abc")), None);
    }
}
