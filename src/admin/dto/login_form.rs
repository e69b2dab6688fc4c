//! Login form body.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::application::services::auth_service::validate_token_format;

/// `POST {prefix}/login` form body (`application/x-www-form-urlencoded`).
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(custom(function = cookie_safe_token))]
    pub token: String,
}

fn cookie_safe_token(token: &str) -> Result<(), ValidationError> {
    validate_token_format(token).map_err(|e| {
        ValidationError::new("token_format").with_message(e.to_string().into())
    })
}
