// src/services/guard_service/mod.rs

pub mod navigation;
pub mod route_guard;

pub use navigation::{menu_for, MenuItem, Navigator, Route};
pub use route_guard::{GuardState, GuardView, RouteGuard};
