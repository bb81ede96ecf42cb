use crate::error::ApiError;
use crate::models::{Client, ClientCreate, ClientUpdate};
use crate::services::resource_service::{Clients, ListQuery, ResourcePage};
use crate::services::session_service::SessionContext;

/// Client list with search, plus the per-client notes editor.
pub struct ClientsPage {
    list: ResourcePage<Clients>,
}

impl ClientsPage {
    pub fn new(ctx: SessionContext) -> Self {
        Self {
            list: ResourcePage::new(ctx, ListQuery::all()),
        }
    }

    /// Opens the page already filtered, so the first fetch is the search.
    pub fn searching(ctx: SessionContext, term: &str) -> Self {
        Self {
            list: ResourcePage::new(ctx, ListQuery::search(term)),
        }
    }

    pub fn list(&self) -> &ResourcePage<Clients> {
        &self.list
    }

    pub async fn mount(&self) {
        self.list.mount().await;
    }

    /// An empty term goes back to the unfiltered list.
    pub async fn search(&self, term: &str) -> bool {
        self.list.set_query(ListQuery::search(term)).await
    }

    /// Creates when `editing` is `None`, otherwise updates that client.
    /// The active search stays applied to the refetch.
    pub async fn save(&self, editing: Option<i64>, form: &ClientCreate) -> Result<(), ApiError> {
        match editing {
            Some(id) => self.list.update(id, &ClientUpdate::from(form)).await.map(|_| ()),
            None => self.list.create(form).await.map(|_| ()),
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.list.delete(id).await
    }

    pub async fn save_notes(&self, id: i64, notes: &str) -> Result<(), ApiError> {
        let api = self.list.context().api().clone();
        let body = ClientUpdate::notes(notes);
        self.list
            .mutate("Failed to save notes", async move {
                crate::services::resource_service::update::<Clients>(&api, id, &body).await
            })
            .await
            .map(|_| ())
    }

    pub async fn clients(&self) -> Vec<Client> {
        self.list.items().await
    }
}
