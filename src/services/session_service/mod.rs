// src/services/session_service/mod.rs

pub mod context;
pub mod current_user;
pub mod store;

pub use context::SessionContext;
pub use current_user::CurrentUserCache;
pub use store::{FileTokenStorage, MemoryTokenStorage, SessionStore, TokenStorage, TOKEN_KEY};
