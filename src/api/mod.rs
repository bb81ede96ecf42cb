// src/api/mod.rs

pub mod client;

pub use client::ApiClient;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const CHANGE_PASSWORD_PATH: &str = "/auth/change-password";
pub const IDENTITY_PATH: &str = "/auth/me";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const MONTHLY_PATH: &str = "/transactions/monthly";
pub const SUMMARY_PATH: &str = "/transactions/summary";
