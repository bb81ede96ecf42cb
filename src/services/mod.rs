pub mod analytics_service;
pub mod auth_service;
pub mod guard_service;
pub mod resource_service;
pub mod session_service;

pub use analytics_service::{monthly_breakdown, order_profit, Profit, TransactionTotals};
pub use auth_service::{change_password, logout_user, register_user, verify_user_credentials};
pub use guard_service::{menu_for, GuardState, Navigator, Route, RouteGuard};
pub use resource_service::{ListQuery, Resource, ResourcePage};
pub use session_service::{CurrentUserCache, SessionContext, SessionStore};
