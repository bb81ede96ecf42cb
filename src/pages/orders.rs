use crate::error::ApiError;
use crate::models::{Client, Order, OrderCreate, OrderUpdate, User};
use crate::services::analytics_service::Profit;
use crate::services::guard_service::{Navigator, Route};
use crate::services::resource_service::{
    self, Clients, ListQuery, Orders, ResourcePage, Users, COMPLETED_SCOPE, PENDING_SCOPE,
};
use crate::services::session_service::SessionContext;
use futures::future;
use log::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBoardKind {
    Pending,
    Completed,
}

impl OrderBoardKind {
    fn scope(&self) -> &'static str {
        match self {
            OrderBoardKind::Pending => PENDING_SCOPE,
            OrderBoardKind::Completed => COMPLETED_SCOPE,
        }
    }
}

/// An order with its profit recomputed from the fetched numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub order: Order,
    pub profit: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoardTotals {
    pub revenue: f64,
    pub profit: f64,
    pub quantity: i64,
}

/// Pending or completed orders. Admins additionally see who created each one.
pub struct OrderBoard {
    kind: OrderBoardKind,
    list: ResourcePage<Orders>,
}

impl OrderBoard {
    pub fn new(ctx: SessionContext, kind: OrderBoardKind) -> Self {
        Self {
            kind,
            list: ResourcePage::new(ctx, ListQuery::scoped(kind.scope())).role_gated(),
        }
    }

    pub fn kind(&self) -> OrderBoardKind {
        self.kind
    }

    pub fn list(&self) -> &ResourcePage<Orders> {
        &self.list
    }

    pub async fn mount(&self) {
        self.list.mount().await;
    }

    pub async fn mark_complete(&self, id: i64) -> Result<(), ApiError> {
        self.edit(id, &OrderUpdate::complete()).await
    }

    pub async fn edit(&self, id: i64, changes: &OrderUpdate) -> Result<(), ApiError> {
        let api = self.list.context().api().clone();
        self.list
            .mutate("Failed to update order. Please try again.", async move {
                resource_service::update::<Orders>(&api, id, changes).await
            })
            .await
            .map(|_| ())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.list.delete(id).await
    }

    pub async fn rows(&self) -> Vec<OrderRow> {
        self.list
            .items()
            .await
            .into_iter()
            .map(|order| OrderRow {
                profit: order.profit(),
                order,
            })
            .collect()
    }

    pub async fn totals(&self) -> BoardTotals {
        self.rows().await.iter().fold(BoardTotals::default(), |acc, row| BoardTotals {
            revenue: acc.revenue + row.order.customer_price,
            profit: acc.profit + row.profit,
            quantity: acc.quantity + row.order.quantity,
        })
    }
}

/// Order entry form. Admins may assign the order to another user, so the
/// user list is only loaded for them.
pub struct AddOrderPage {
    ctx: SessionContext,
    clients: Vec<Client>,
    assignees: Vec<User>,
    is_admin: bool,
    error: Option<String>,
}

impl AddOrderPage {
    pub fn new(ctx: SessionContext) -> Self {
        Self {
            ctx,
            clients: Vec::new(),
            assignees: Vec::new(),
            is_admin: false,
            error: None,
        }
    }

    pub async fn mount(&mut self) {
        let api = self.ctx.api();
        let (clients, is_admin) = future::join(
            resource_service::list::<Clients>(api, &ListQuery::all()),
            self.ctx.is_admin(),
        )
        .await;

        match clients {
            Ok(clients) => self.clients = clients,
            Err(e) => error!("Failed to fetch clients: {}", e),
        }

        self.is_admin = is_admin;
        if is_admin {
            match resource_service::list::<Users>(api, &ListQuery::all()).await {
                Ok(users) => self.assignees = users,
                Err(e) => error!("Failed to fetch users: {}", e),
            }
        }
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn assignees(&self) -> &[User] {
        &self.assignees
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Live profit shown under the form while typing.
    pub fn preview_profit(form: &OrderCreate) -> f64 {
        form.profit()
    }

    /// On success the user is sent to the pending board, which fetches the
    /// new order itself. Assignment is dropped for non-admins.
    pub async fn submit(&mut self, form: &OrderCreate, navigator: &dyn Navigator) -> Result<Order, ApiError> {
        let mut body = form.clone();
        if !self.is_admin {
            body.assigned_to = None;
        }
        self.error = None;
        match resource_service::create::<Orders>(self.ctx.api(), &body).await {
            Ok(order) => {
                navigator.navigate(Route::OrderPending);
                Ok(order)
            }
            Err(e) => {
                error!("Failed to create order: {}", e);
                self.error = Some(e.user_message("Failed to create order"));
                Err(e)
            }
        }
    }
}
