// src/services/auth_service/register_user.rs

use super::verify_user::{verify_user_credentials, LoginForm};
use crate::api::REGISTER_PATH;
use crate::error::{AuthError, FormError};
use crate::models::{Capability, RegisterRequest};
use crate::services::session_service::SessionContext;
use log::info;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.username.trim().is_empty() {
            return Err(FormError::Missing("Username"));
        }
        if self.email.trim().is_empty() {
            return Err(FormError::Missing("Email"));
        }
        if self.password.is_empty() {
            return Err(FormError::Missing("Password"));
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Creates the account, then logs straight in with the same credentials.
pub async fn register_user(ctx: &SessionContext, form: &RegisterForm) -> Result<Capability, AuthError> {
    form.validate()?;

    let request = RegisterRequest {
        username: form.username.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
    };
    ctx.api().post_unit(REGISTER_PATH, Some(&request)).await?;
    info!("Registered user {}", request.username);

    let login = LoginForm {
        username: request.username,
        password: form.password.clone(),
    };
    verify_user_credentials(ctx, &login).await
}
