use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{
        blog::{Blog, BlogPatch, NewBlog},
        dto::{BlogView, ResourceFilter},
        user::Identity,
    },
    use_cases::{
        blog_database::BlogDatabase,
        crud_error::{CrudError, CrudResult},
        database::DatabaseError,
        ownership::ensure_owner,
        user_database::UserDatabase,
    },
};

const RESOURCE: &str = "blog";

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.trim().is_empty())
}

fn check_likes(likes: i64) -> CrudResult<i64> {
    if likes < 0 {
        return Err(CrudError::Validation(
            "likes must be a non-negative integer".to_string(),
        ));
    }
    Ok(likes)
}

pub async fn list_blogs<D: BlogDatabase + ?Sized>(
    db: &D,
    filter: ResourceFilter,
) -> CrudResult<Vec<BlogView>> {
    Ok(db.list_blogs(filter).await?)
}

/// Absent is not an error here; the caller picks the response.
pub async fn get_blog<D: BlogDatabase + ?Sized>(
    db: &D,
    blog_id: Uuid,
) -> CrudResult<Option<Blog>> {
    Ok(db.get_blog(blog_id).await?)
}

/// Validates before anything is written, then binds the blog to `creator`.
pub async fn create_blog<B, U>(
    blogs: &B,
    users: &U,
    creator: &Identity,
    new_blog: NewBlog,
) -> CrudResult<Blog>
where
    B: BlogDatabase + ?Sized,
    U: UserDatabase + ?Sized,
{
    if !present(&new_blog.title) || !present(&new_blog.url) {
        return Err(CrudError::Validation("title or url missing".to_string()));
    }
    let likes = check_likes(new_blog.likes.unwrap_or(0))?;

    if users.get_user_by_id(creator.user_id).await?.is_none() {
        return Err(CrudError::UnknownUser);
    }

    let blog = Blog {
        id: Uuid::new_v4(),
        title: new_blog.title.unwrap_or_default(),
        author: new_blog.author,
        url: new_blog.url.unwrap_or_default(),
        likes,
        user: creator.user_id,
        created_at: Utc::now(),
    };

    let saved = blogs.create_blog(blog).await?;
    info!("user {} created blog {}", creator.username, saved.id);

    Ok(saved)
}

/// Only `likes` is mutable. When `caller` is given the blog must be theirs.
pub async fn update_blog_likes<D: BlogDatabase + ?Sized>(
    db: &D,
    blog_id: Uuid,
    likes: Option<i64>,
    caller: Option<&Identity>,
) -> CrudResult<Blog> {
    let Some(likes) = likes else {
        return Err(CrudError::Validation("likes are missing".to_string()));
    };
    let likes = check_likes(likes)?;

    if let Some(caller) = caller {
        let blog = db
            .get_blog(blog_id)
            .await?
            .ok_or(CrudError::NotFound(RESOURCE))?;
        ensure_owner(blog.user, caller, RESOURCE)?;
    }

    db.update_blog(blog_id, BlogPatch { likes: Some(likes) })
        .await
        .map_err(|err| match err {
            DatabaseError::NotFound => CrudError::NotFound(RESOURCE),
            other => other.into(),
        })
}

/// Only the creator may delete a blog.
pub async fn delete_blog<D: BlogDatabase + ?Sized>(
    db: &D,
    blog_id: Uuid,
    caller: &Identity,
) -> CrudResult<()> {
    let blog = db
        .get_blog(blog_id)
        .await?
        .ok_or(CrudError::NothingToDelete(RESOURCE))?;

    ensure_owner(blog.user, caller, RESOURCE)?;

    db.delete_blog(blog_id).await?;
    info!("user {} deleted blog {}", caller.username, blog_id);

    Ok(())
}
