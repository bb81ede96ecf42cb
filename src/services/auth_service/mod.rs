// src/services/auth_service/mod.rs
pub mod change_password;
pub mod logout_user;
pub mod register_user;
pub mod verify_user;

/// Banner shown when a login or registration fails without a server detail.
pub const AUTH_FALLBACK: &str = "An error occurred";

pub use change_password::{change_password, ChangePasswordForm, MIN_PASSWORD_LEN};
pub use logout_user::logout_user;
pub use register_user::{register_user, RegisterForm};
pub use verify_user::{verify_user_credentials, LoginForm};
