// src/services/auth_service/verify_user.rs

use crate::api::LOGIN_PATH;
use crate::error::{ApiError, AuthError, FormError};
use crate::models::{AuthResponse, Capability, LoginRequest};
use crate::services::session_service::SessionContext;
use log::info;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.username.trim().is_empty() {
            return Err(FormError::Missing("Username"));
        }
        if self.password.is_empty() {
            return Err(FormError::Missing("Password"));
        }
        Ok(())
    }
}

/// Exchanges credentials for a token, stores it and primes the
/// current-user cache. The returned capability is what pages should be
/// handed for role-gated UI.
pub async fn verify_user_credentials(
    ctx: &SessionContext,
    form: &LoginForm,
) -> Result<Capability, AuthError> {
    form.validate()?;

    let request = LoginRequest {
        username: form.username.trim().to_string(),
        password: form.password.clone(),
    };
    let auth: AuthResponse = ctx.api().post_form(LOGIN_PATH, &request).await?;

    ctx.store()
        .set_session(&auth.access_token)
        .map_err(ApiError::from)?;
    // a previous user's record must not leak into the new session
    ctx.current_user().invalidate().await;
    info!("Logged in as {} ({} token)", request.username, auth.token_type);

    Ok(ctx.capability().await)
}
