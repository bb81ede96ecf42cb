// src/models/mod.rs

pub mod client;
pub mod dashboard;
pub mod delivery;
pub mod order;
pub mod session;
pub mod transaction;
pub mod users;

pub use client::{Client, ClientCreate, ClientUpdate};
pub use dashboard::{ChartData, DashboardData, DashboardStats, MonthlyData, RecentClient, RecentOrder};
pub use delivery::{Delivery, DeliveryCreate, DeliveryStatus, DeliveryUpdate};
pub use order::{Order, OrderCreate, OrderStatus, OrderUpdate};
pub use session::Capability;
pub use transaction::{
    Transaction, TransactionCategory, TransactionCreate, TransactionSummary, TransactionType,
    TransactionUpdate,
};
pub use users::{
    AuthResponse, ChangePasswordRequest, CurrentUser, LoginRequest, RegisterRequest,
    ResetPasswordRequest, User, UserCreate, UserRole, UserUpdate,
};
