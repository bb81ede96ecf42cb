// src/models/users/mod.rs

pub mod auth;
pub mod user;

pub use auth::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest};
pub use user::{CurrentUser, ResetPasswordRequest, User, UserCreate, UserRole, UserUpdate};
