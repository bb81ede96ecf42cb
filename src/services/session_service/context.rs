use super::{CurrentUserCache, SessionStore};
use crate::api::ApiClient;
use crate::config::Config;
use crate::models::Capability;

/// The session state a page or command is handed: the token store, the
/// API client bound to it and the current-user cache. Created once at
/// start-up and cloned into whatever needs it; clones share state.
#[derive(Clone)]
pub struct SessionContext {
    api: ApiClient,
    user: CurrentUserCache,
}

impl SessionContext {
    pub fn new(base_url: &str, store: SessionStore) -> Self {
        let api = ApiClient::new(base_url, store);
        let user = CurrentUserCache::new(api.clone());
        Self { api, user }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_url, SessionStore::file(&config.session_file))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn store(&self) -> &SessionStore {
        self.api.session()
    }

    pub fn current_user(&self) -> &CurrentUserCache {
        &self.user
    }

    pub fn is_authenticated(&self) -> bool {
        self.store().has_session()
    }

    pub async fn is_admin(&self) -> bool {
        self.user.is_admin().await
    }

    pub async fn capability(&self) -> Capability {
        self.user.capability().await
    }
}
