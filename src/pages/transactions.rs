use crate::error::ApiError;
use crate::models::{Transaction, TransactionCreate, TransactionSummary};
use crate::services::analytics_service::{fetch_summary, transaction_totals, TransactionTotals};
use crate::services::resource_service::{ListQuery, ResourcePage, Transactions};
use crate::services::session_service::SessionContext;
use futures::future;
use log::error;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Transaction ledger with its summary cards.
pub struct TransactionsPage {
    list: ResourcePage<Transactions>,
    summary: Arc<Mutex<Option<TransactionSummary>>>,
}

impl TransactionsPage {
    pub fn new(ctx: SessionContext) -> Self {
        Self {
            list: ResourcePage::new(ctx, ListQuery::all()).role_gated(),
            summary: Arc::new(Mutex::new(None)),
        }
    }

    pub fn list(&self) -> &ResourcePage<Transactions> {
        &self.list
    }

    pub async fn mount(&self) {
        future::join(self.list.mount(), self.refresh_summary()).await;
    }

    pub async fn refresh_summary(&self) {
        match fetch_summary(self.list.context().api()).await {
            Ok(summary) => {
                if self.list.is_mounted().await {
                    *self.summary.lock().await = Some(summary);
                }
            }
            Err(e) => error!("Failed to fetch transaction summary: {}", e),
        }
    }

    pub async fn create(&self, form: &TransactionCreate) -> Result<Transaction, ApiError> {
        let created = self.list.create(form).await?;
        self.refresh_summary().await;
        Ok(created)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.list.delete(id).await?;
        self.refresh_summary().await;
        Ok(())
    }

    pub async fn summary(&self) -> Option<TransactionSummary> {
        self.summary.lock().await.clone()
    }

    /// Summary cards. Falls back to summing the loaded rows while the
    /// summary endpoint has not answered.
    pub async fn totals(&self) -> TransactionTotals {
        match self.summary.lock().await.as_ref() {
            Some(summary) => TransactionTotals::from(summary),
            None => transaction_totals(&self.list.items().await),
        }
    }
}
