// src/lib.rs
//! Client-side session, authorization and data layer for the dropshipping
//! operations dashboard.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, AuthError, FormError, StorageError};
pub use services::session_service::{SessionContext, SessionStore};
