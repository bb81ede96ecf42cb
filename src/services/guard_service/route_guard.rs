use super::navigation::{Navigator, Route};
use crate::services::session_service::SessionStore;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Authenticated,
    Unauthenticated,
}

/// What the renderer shows for the guard's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardView {
    Loading,
    Protected,
    Nothing,
}

/// Gates one mount of a page behind session presence.
///
/// `checking → authenticated | unauthenticated`, decided once. Only the
/// token's presence is checked; whether the server still accepts it is
/// found out by the page's first request.
#[derive(Debug)]
pub struct RouteGuard {
    target: Route,
    state: GuardState,
}

impl RouteGuard {
    pub fn new(target: Route) -> Self {
        Self {
            target,
            state: GuardState::Checking,
        }
    }

    pub fn target(&self) -> Route {
        self.target
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Resolves the guard. Later calls return the settled state without
    /// looking at the store again.
    pub fn check(&mut self, store: &SessionStore, navigator: &dyn Navigator) -> GuardState {
        if self.state != GuardState::Checking {
            return self.state;
        }

        if !self.target.requires_session() || store.has_session() {
            self.state = GuardState::Authenticated;
        } else {
            debug!("No session for {}, redirecting to login", self.target);
            self.state = GuardState::Unauthenticated;
            navigator.navigate(Route::Login);
        }
        self.state
    }

    pub fn view(&self) -> GuardView {
        match self.state {
            GuardState::Checking => GuardView::Loading,
            GuardState::Authenticated => GuardView::Protected,
            GuardState::Unauthenticated => GuardView::Nothing,
        }
    }
}
