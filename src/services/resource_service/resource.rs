use crate::api::ApiClient;
use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A server-owned collection with the usual list/create/update/delete routes.
pub trait Resource: Send + Sync + 'static {
    type Item: DeserializeOwned + Clone + Send + Sync + 'static;
    type Create: Serialize + Send + Sync;
    type Update: Serialize + Send + Sync;

    /// Collection path, e.g. `/clients`.
    const PATH: &'static str;
    /// Singular noun used in fallback error messages.
    const NOUN: &'static str;

    fn item_path(id: i64) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

/// How a page narrows its collection: an optional sub-collection
/// (`/orders/pending`) plus query parameters (`?search=`, `?year=`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    scope: Option<String>,
    params: Vec<(String, String)>,
}

impl ListQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn scoped(scope: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            params: Vec::new(),
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self::all().with("search", term)
    }

    /// Adds a parameter. Blank values are skipped so an empty search box
    /// means "no filter" rather than `?search=`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        self.params.retain(|(k, _)| *k != key);
        if !value.trim().is_empty() {
            self.params.push((key, value));
        }
        self
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn path<R: Resource>(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{}/{}", R::PATH, scope),
            None => R::PATH.to_string(),
        }
    }
}

pub async fn list<R: Resource>(api: &ApiClient, query: &ListQuery) -> Result<Vec<R::Item>, ApiError> {
    api.get_json(&query.path::<R>(), query.params()).await
}

pub async fn create<R: Resource>(api: &ApiClient, body: &R::Create) -> Result<R::Item, ApiError> {
    api.post_json(R::PATH, body).await
}

pub async fn update<R: Resource>(api: &ApiClient, id: i64, body: &R::Update) -> Result<R::Item, ApiError> {
    api.put_json(&R::item_path(id), body).await
}

pub async fn remove<R: Resource>(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    api.delete(&R::item_path(id)).await
}
