// src/services/auth_service/change_password.rs

use crate::api::CHANGE_PASSWORD_PATH;
use crate::error::{AuthError, FormError};
use crate::models::ChangePasswordRequest;
use crate::services::session_service::SessionContext;
use log::info;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordForm {
    /// Confirmation is checked before length, matching the order users see.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.new_password != self.confirm_password {
            return Err(FormError::NewPasswordMismatch);
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = ChangePasswordForm::default();
    }
}

/// Validates locally, then submits. The form is cleared only on success so
/// a rejected attempt can be corrected and resubmitted.
pub async fn change_password(ctx: &SessionContext, form: &mut ChangePasswordForm) -> Result<(), AuthError> {
    form.validate()?;

    let request = ChangePasswordRequest {
        old_password: form.old_password.clone(),
        new_password: form.new_password.clone(),
    };
    ctx.api().post_unit(CHANGE_PASSWORD_PATH, Some(&request)).await?;
    info!("Password changed");
    form.clear();
    Ok(())
}
