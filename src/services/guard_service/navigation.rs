use crate::models::Capability;
use std::fmt;

/// Every surface of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Clients,
    AddOrder,
    OrderPending,
    OrderCompleted,
    Delivery,
    Chat,
    Transactions,
    PreviousMonths,
    Users,
    ChangePassword,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Clients => "/clients",
            Route::AddOrder => "/add-order",
            Route::OrderPending => "/order-pending",
            Route::OrderCompleted => "/order-completed",
            Route::Delivery => "/delivery",
            Route::Chat => "/chat",
            Route::Transactions => "/transactions",
            Route::PreviousMonths => "/previous-months",
            Route::Users => "/users",
            Route::ChangePassword => "/change-password",
        }
    }

    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Navigation primitive supplied by whatever renders the pages.
pub trait Navigator {
    fn navigate(&self, route: Route);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub route: Route,
}

const MAIN_MENU: [MenuItem; 9] = [
    MenuItem { label: "Home", route: Route::Dashboard },
    MenuItem { label: "Clients", route: Route::Clients },
    MenuItem { label: "Add Order", route: Route::AddOrder },
    MenuItem { label: "Order Pending", route: Route::OrderPending },
    MenuItem { label: "Order Completed", route: Route::OrderCompleted },
    MenuItem { label: "Delivery", route: Route::Delivery },
    MenuItem { label: "Chat", route: Route::Chat },
    MenuItem { label: "Budget/Transactions", route: Route::Transactions },
    MenuItem { label: "Previous months", route: Route::PreviousMonths },
];

const ADMIN_MENU: [MenuItem; 1] = [MenuItem { label: "Users", route: Route::Users }];

const BOTTOM_MENU: [MenuItem; 1] = [MenuItem {
    label: "Change Password",
    route: Route::ChangePassword,
}];

/// Sidebar entries for a session. Admin-only entries are left out unless
/// the capability says admin.
pub fn menu_for(capability: Capability) -> Vec<MenuItem> {
    let mut items = MAIN_MENU.to_vec();
    if capability.is_admin() {
        items.extend_from_slice(&ADMIN_MENU);
    }
    items.extend_from_slice(&BOTTOM_MENU);
    items
}
