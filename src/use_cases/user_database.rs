use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{domain::user::User, use_cases::database::DatabaseResult};

#[automock]
#[async_trait]
pub trait UserDatabase: Send + Sync {
    /// Fails with `UniqueViolation` when the username is taken.
    async fn create_user(&self, user: User) -> DatabaseResult<()>;

    async fn get_user_by_username(&self, username: String) -> DatabaseResult<Option<User>>;

    async fn get_user_by_id(&self, user_id: Uuid) -> DatabaseResult<Option<User>>;

    async fn list_users(&self) -> DatabaseResult<Vec<User>>;
}
