use crate::api::{ApiClient, IDENTITY_PATH};
use crate::error::ApiError;
use crate::models::{Capability, CurrentUser};
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Memoizes the authenticated user for the lifetime of a session.
///
/// The record slot is only locked briefly. Concurrent first callers
/// queue on a per-session flight lock so one identity request is issued.
/// `invalidate` swaps in a fresh flight lock and bumps the generation, so
/// it never waits on a pending request and a late answer for an earlier
/// session is discarded. Failed fetches are not cached.
#[derive(Clone)]
pub struct CurrentUserCache {
    api: ApiClient,
    slot: Arc<Mutex<Slot>>,
}

#[derive(Default)]
struct Slot {
    user: Option<CurrentUser>,
    generation: u64,
    flight: Arc<Mutex<()>>,
}

impl CurrentUserCache {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    pub async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        let flight = {
            let slot = self.slot.lock().await;
            if let Some(user) = slot.user.as_ref() {
                debug!("Current user cache hit for {}", user.username);
                return Ok(user.clone());
            }
            Arc::clone(&slot.flight)
        };

        let _in_flight = flight.lock().await;
        let generation = {
            let slot = self.slot.lock().await;
            if let Some(user) = slot.user.as_ref() {
                return Ok(user.clone());
            }
            slot.generation
        };
        if !self.api.session().has_session() {
            return Err(ApiError::NoSession);
        }

        let user: CurrentUser = self.api.get_json(IDENTITY_PATH, &[]).await?;

        let mut slot = self.slot.lock().await;
        if slot.generation != generation {
            debug!("Dropping identity result for {} from an ended session", user.username);
            return Err(ApiError::NoSession);
        }
        debug!("Cached current user {} ({})", user.username, user.role);
        slot.user = Some(user.clone());
        Ok(user)
    }

    /// Fail-closed admin check: any failure to identify the user means "not admin".
    pub async fn is_admin(&self) -> bool {
        match self.current_user().await {
            Ok(user) => user.is_admin(),
            Err(ApiError::NoSession) => false,
            Err(e) => {
                warn!("Identity lookup failed, hiding admin features: {}", e);
                false
            }
        }
    }

    pub async fn capability(&self) -> Capability {
        match self.current_user().await {
            Ok(user) => Capability::Authenticated { role: user.role },
            Err(ApiError::NoSession) => Capability::Guest,
            Err(e) => {
                warn!("Identity lookup failed, treating session as guest: {}", e);
                Capability::Guest
            }
        }
    }

    /// The cached record without touching the network.
    pub async fn peek(&self) -> Option<CurrentUser> {
        self.slot.lock().await.user.clone()
    }

    /// Forgets the record and detaches any identity request still in flight.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.lock().await;
        slot.generation += 1;
        slot.flight = Arc::new(Mutex::new(()));
        if slot.user.take().is_some() {
            debug!("Current user cache invalidated");
        }
    }
}
