// src/pages/mod.rs
//! Page controllers. Each owns the state one dashboard screen renders and
//! follows the fetch, mutate, refetch cycle of `ResourcePage`.

pub mod clients;
pub mod dashboard;
pub mod deliveries;
pub mod orders;
pub mod transactions;
pub mod users;

pub use clients::ClientsPage;
pub use dashboard::{DashboardPage, PreviousMonthsPage};
pub use deliveries::DeliveriesPage;
pub use orders::{AddOrderPage, BoardTotals, OrderBoard, OrderBoardKind, OrderRow};
pub use transactions::TransactionsPage;
pub use users::UsersPage;
