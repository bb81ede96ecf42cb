use crate::error::ApiError;
use crate::models::{Delivery, DeliveryCreate, DeliveryUpdate, Order};
use crate::services::resource_service::{
    self, Deliveries, ListQuery, Orders, ResourcePage, PENDING_SCOPE,
};
use crate::services::session_service::SessionContext;
use futures::future;

const SAVE_FALLBACK: &str = "Failed to save delivery. Please try again.";

/// Deliveries plus the pending orders the create form picks from.
pub struct DeliveriesPage {
    deliveries: ResourcePage<Deliveries>,
    pending_orders: ResourcePage<Orders>,
}

impl DeliveriesPage {
    pub fn new(ctx: SessionContext) -> Self {
        Self {
            deliveries: ResourcePage::new(ctx.clone(), ListQuery::all()).role_gated(),
            pending_orders: ResourcePage::new(ctx, ListQuery::scoped(PENDING_SCOPE)),
        }
    }

    pub fn deliveries(&self) -> &ResourcePage<Deliveries> {
        &self.deliveries
    }

    pub fn pending_orders(&self) -> &ResourcePage<Orders> {
        &self.pending_orders
    }

    pub async fn mount(&self) {
        future::join(self.deliveries.mount(), self.pending_orders.mount()).await;
    }

    pub async fn unmount(&self) {
        self.deliveries.unmount().await;
        self.pending_orders.unmount().await;
    }

    /// Address to pre-fill once an order is picked: its client's location.
    pub async fn address_for_order(&self, order_id: i64) -> Option<String> {
        self.pending_orders
            .items()
            .await
            .into_iter()
            .find(|order: &Order| order.id == order_id)
            .and_then(|order| order.client_location)
            .filter(|location| !location.trim().is_empty())
    }

    /// Creates or updates, then refetches both lists.
    pub async fn save(&self, editing: Option<i64>, form: &DeliveryCreate) -> Result<Delivery, ApiError> {
        let api = self.deliveries.context().api().clone();
        let result = match editing {
            Some(id) => {
                let changes = DeliveryUpdate::from(form);
                self.deliveries
                    .mutate(SAVE_FALLBACK, async move {
                        resource_service::update::<Deliveries>(&api, id, &changes).await
                    })
                    .await
            }
            None => {
                self.deliveries
                    .mutate(SAVE_FALLBACK, async move {
                        resource_service::create::<Deliveries>(&api, form).await
                    })
                    .await
            }
        };
        if result.is_ok() {
            self.pending_orders.refetch().await;
        }
        result
    }

    pub async fn set_status(&self, id: i64, changes: &DeliveryUpdate) -> Result<Delivery, ApiError> {
        self.deliveries.update(id, changes).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.deliveries.delete(id).await
    }
}
