use crate::error::{AppError, Resource};
use crate::models::User;
use crate::store::NewsStore;

pub struct UserService;

impl UserService {
    pub async fn list(store: &dyn NewsStore) -> Result<Vec<User>, AppError> {
        store.list_users().await
    }

    /// Usernames match case-insensitively.
    pub async fn get(store: &dyn NewsStore, username: &str) -> Result<User, AppError> {
        store
            .user_by_username(username)
            .await?
            .ok_or(AppError::NotFound(Resource::User))
    }
}
