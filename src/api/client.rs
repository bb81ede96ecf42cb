use crate::error::ApiError;
use crate::services::session_service::SessionStore;
use log::debug;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// REST client for the dashboard backend.
///
/// Every request reads the token from the session store at send time, so a
/// login or logout is picked up by the next call without rebuilding the
/// client. Nothing here retries, refreshes or times out: a failure is
/// returned to the page that made the call.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Arc<str>,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: &str, session: SessionStore) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: Arc::from(base_url.trim_end_matches('/')),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match self.session.get_session() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get_json<T>(&self, path: &str, query: &[(String, String)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let mut req = self.request(Method::GET, path);
        if !query.is_empty() {
            req = req.query(query);
        }
        decode(path, req).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode(path, self.request(Method::POST, path).json(body)).await
    }

    /// POST whose response body is irrelevant (acks, 204s).
    pub async fn post_unit<B>(&self, path: &str, body: Option<&B>) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut req = self.request(Method::POST, path);
        if let Some(body) = body {
            req = req.json(body);
        }
        expect_success(req).await.map(|_| ())
    }

    pub async fn post_form<B, T>(&self, path: &str, form: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode(path, self.request(Method::POST, path).form(form)).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode(path, self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        expect_success(self.request(Method::DELETE, path)).await.map(|_| ())
    }
}

async fn expect_success(req: RequestBuilder) -> Result<String, ApiError> {
    let response = req.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::from_response(status, &body));
    }
    Ok(body)
}

async fn decode<T: DeserializeOwned>(path: &str, req: RequestBuilder) -> Result<T, ApiError> {
    let body = expect_success(req).await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(format!("{}: {}", path, e)))
}
