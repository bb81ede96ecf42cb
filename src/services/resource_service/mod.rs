// src/services/resource_service/mod.rs

pub mod page;
pub mod resource;
pub mod resources;

pub use page::{PageSnapshot, ResourcePage};
pub use resource::{create, list, remove, update, ListQuery, Resource};
pub use resources::{Clients, Deliveries, Orders, Transactions, Users, COMPLETED_SCOPE, PENDING_SCOPE};
