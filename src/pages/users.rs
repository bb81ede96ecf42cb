use crate::error::ApiError;
use crate::models::{ResetPasswordRequest, User, UserCreate, UserUpdate};
use crate::services::resource_service::{ListQuery, Resource, ResourcePage, Users};
use crate::services::session_service::SessionContext;

/// Admin user management.
pub struct UsersPage {
    list: ResourcePage<Users>,
}

impl UsersPage {
    pub fn new(ctx: SessionContext) -> Self {
        Self {
            list: ResourcePage::new(ctx, ListQuery::all()).role_gated(),
        }
    }

    pub fn list(&self) -> &ResourcePage<Users> {
        &self.list
    }

    pub async fn mount(&self) {
        self.list.mount().await;
    }

    pub async fn create(&self, form: &UserCreate) -> Result<User, ApiError> {
        self.list.create(form).await
    }

    pub async fn update(&self, id: i64, changes: &UserUpdate) -> Result<User, ApiError> {
        self.list.update(id, changes).await
    }

    /// The backend soft-deletes: `DELETE` marks the user inactive.
    pub async fn deactivate(&self, id: i64) -> Result<(), ApiError> {
        self.list.delete(id).await
    }

    pub async fn activate(&self, id: i64) -> Result<(), ApiError> {
        let api = self.list.context().api().clone();
        let path = format!("{}/activate", Users::item_path(id));
        self.list
            .mutate("Failed to activate user", async move {
                api.post_unit::<()>(&path, None).await
            })
            .await
    }

    pub async fn reset_password(&self, id: i64, new_password: &str) -> Result<(), ApiError> {
        let api = self.list.context().api().clone();
        let path = format!("{}/reset-password", Users::item_path(id));
        let body = ResetPasswordRequest {
            new_password: new_password.to_string(),
        };
        self.list
            .mutate("Failed to reset password", async move {
                api.post_unit(&path, Some(&body)).await
            })
            .await
    }

    pub async fn users(&self) -> Vec<User> {
        self.list.items().await
    }
}
