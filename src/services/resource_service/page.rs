use super::resource::{self, ListQuery, Resource};
use crate::error::ApiError;
use crate::services::session_service::SessionContext;
use futures::future;
use log::{debug, error};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug)]
struct PageState<T> {
    items: Vec<T>,
    query: ListQuery,
    loading: bool,
    in_flight: usize,
    loaded: bool,
    is_admin: bool,
    error: Option<String>,
    mounted: bool,
}

/// Read-only copy of a page's state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSnapshot<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub loaded: bool,
    pub is_admin: bool,
    pub error: Option<String>,
}

/// Controller for one resource collection: fetch on mount, mutate, refetch.
///
/// Items are only ever replaced by a full fetch; a mutation never edits
/// them locally. State sits behind a lock that is released before any
/// request goes out, so clones of a page may have requests in flight at
/// the same time and whichever fetch finishes last is what is shown.
/// After `unmount` every late result is discarded.
pub struct ResourcePage<R: Resource> {
    ctx: SessionContext,
    role_gated: bool,
    state: Arc<Mutex<PageState<R::Item>>>,
}

impl<R: Resource> Clone for ResourcePage<R> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            role_gated: self.role_gated,
            state: Arc::clone(&self.state),
        }
    }
}

impl<R: Resource> ResourcePage<R> {
    pub fn new(ctx: SessionContext, query: ListQuery) -> Self {
        Self {
            ctx,
            role_gated: false,
            state: Arc::new(Mutex::new(PageState {
                items: Vec::new(),
                query,
                loading: true,
                in_flight: 0,
                loaded: false,
                is_admin: false,
                error: None,
                mounted: true,
            })),
        }
    }

    /// Pages with admin-only controls resolve the admin predicate on mount.
    pub fn role_gated(mut self) -> Self {
        self.role_gated = true;
        self
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Admin check and collection fetch run concurrently.
    pub async fn mount(&self) {
        if self.role_gated {
            let (is_admin, _) = future::join(self.ctx.is_admin(), self.refetch()).await;
            let mut state = self.state.lock().await;
            if state.mounted {
                state.is_admin = is_admin;
            }
        } else {
            self.refetch().await;
        }
    }

    pub async fn unmount(&self) {
        self.state.lock().await.mounted = false;
    }

    /// Replaces the items with a fresh fetch. Returns whether it succeeded
    /// and was applied. `loading` stays set until every overlapping fetch
    /// has come back.
    pub async fn refetch(&self) -> bool {
        let query = {
            let mut state = self.state.lock().await;
            if !state.mounted {
                return false;
            }
            state.in_flight += 1;
            state.loading = true;
            state.query.clone()
        };

        let result = resource::list::<R>(self.ctx.api(), &query).await;

        let mut state = self.state.lock().await;
        state.in_flight = state.in_flight.saturating_sub(1);
        if !state.mounted {
            debug!("Dropping {} list result for unmounted page", R::NOUN);
            return false;
        }
        state.loading = state.in_flight > 0;
        match result {
            Ok(items) => {
                state.items = items;
                state.loaded = true;
                state.error = None;
                true
            }
            Err(e) => {
                error!("Failed to fetch {} list: {}", R::NOUN, e);
                state.error = Some(e.user_message(&format!("Failed to fetch {} list", R::NOUN)));
                false
            }
        }
    }

    /// Swaps the filter (search term, year, scope) and refetches.
    pub async fn set_query(&self, query: ListQuery) -> bool {
        self.state.lock().await.query = query;
        self.refetch().await
    }

    /// Runs one mutation request. Success triggers a full refetch; failure
    /// puts the server's message (or `fallback`) in the page banner and
    /// leaves the items untouched.
    pub async fn mutate<F, T>(&self, fallback: &str, request: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.state.lock().await.error = None;
        match request.await {
            Ok(value) => {
                self.refetch().await;
                Ok(value)
            }
            Err(e) => {
                error!("{}: {}", fallback, e);
                let mut state = self.state.lock().await;
                if state.mounted {
                    state.error = Some(e.user_message(fallback));
                }
                Err(e)
            }
        }
    }

    pub async fn create(&self, body: &R::Create) -> Result<R::Item, ApiError> {
        let fallback = format!("Failed to create {}", R::NOUN);
        self.mutate(&fallback, resource::create::<R>(self.ctx.api(), body))
            .await
    }

    pub async fn update(&self, id: i64, body: &R::Update) -> Result<R::Item, ApiError> {
        let fallback = format!("Failed to update {}", R::NOUN);
        self.mutate(&fallback, resource::update::<R>(self.ctx.api(), id, body))
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let fallback = format!("Failed to delete {}", R::NOUN);
        self.mutate(&fallback, resource::remove::<R>(self.ctx.api(), id))
            .await
    }

    pub async fn items(&self) -> Vec<R::Item> {
        self.state.lock().await.items.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    pub async fn set_error(&self, message: impl Into<String>) {
        self.state.lock().await.error = Some(message.into());
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.loading
    }

    pub async fn is_admin(&self) -> bool {
        self.state.lock().await.is_admin
    }

    pub async fn is_mounted(&self) -> bool {
        self.state.lock().await.mounted
    }

    pub async fn query(&self) -> ListQuery {
        self.state.lock().await.query.clone()
    }

    pub async fn snapshot(&self) -> PageSnapshot<R::Item> {
        let state = self.state.lock().await;
        PageSnapshot {
            items: state.items.clone(),
            loading: state.loading,
            loaded: state.loaded,
            is_admin: state.is_admin,
            error: state.error.clone(),
        }
    }
}
