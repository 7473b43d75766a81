use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    domain::{
        blog::{Blog, BlogPatch},
        dto::{BlogView, ResourceFilter},
    },
    use_cases::database::DatabaseResult,
};

#[automock]
#[async_trait]
pub trait BlogDatabase: Send + Sync {
    /// Blogs matching `filter`, oldest first, each with its owner resolved.
    async fn list_blogs(&self, filter: ResourceFilter) -> DatabaseResult<Vec<BlogView>>;

    async fn get_blog(&self, blog_id: Uuid) -> DatabaseResult<Option<Blog>>;

    async fn create_blog(&self, blog: Blog) -> DatabaseResult<Blog>;

    /// Fails with `NotFound` if the blog does not exist.
    async fn update_blog(&self, blog_id: Uuid, patch: BlogPatch) -> DatabaseResult<Blog>;

    /// Idempotent.
    async fn delete_blog(&self, blog_id: Uuid) -> DatabaseResult<()>;
}
