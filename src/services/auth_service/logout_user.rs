// src/services/auth_service/logout_user.rs

use crate::error::StorageError;
use crate::services::guard_service::{Navigator, Route};
use crate::services::session_service::SessionContext;
use log::info;

/// Ends the session: drops the token, then the cached user, then sends the
/// user to the login surface. Neither step waits on a pending request.
pub async fn logout_user(ctx: &SessionContext, navigator: &dyn Navigator) -> Result<(), StorageError> {
    let cleared = ctx.store().clear_session();
    ctx.current_user().invalidate().await;
    cleared?;
    info!("Logged out");
    navigator.navigate(Route::Login);
    Ok(())
}
