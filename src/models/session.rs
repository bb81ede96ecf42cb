use super::users::UserRole;

/// What the current session may see, resolved once and handed to pages
/// instead of each page asking the server again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Capability {
    #[default]
    Guest,
    Authenticated { role: UserRole },
}

impl Capability {
    pub fn is_admin(&self) -> bool {
        matches!(self, Capability::Authenticated { role: UserRole::Admin })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Capability::Authenticated { .. })
    }
}
