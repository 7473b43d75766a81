use axum::{
    Extension,
    extract::{
        Json, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        blog::{Blog, NewBlog},
        dto::{BlogView, ResourceFilter},
    },
    infra::http_api::{
        AppState,
        error::{ApiError, parse_id},
        middleware_auth::AuthContext,
    },
    use_cases::blog_service::{
        create_blog, delete_blog, get_blog, list_blogs, update_blog_likes,
    },
};

#[derive(Deserialize, Serialize)]
pub struct LikesInfo {
    likes: Option<i64>,
}

pub async fn list_blogs_end(
    State(state): State<AppState>,
    filter: Result<Query<ResourceFilter>, QueryRejection>,
) -> Result<Json<Vec<BlogView>>, ApiError> {
    let Query(filter) = filter?;

    Ok(Json(list_blogs(&*state.blogs, filter).await?))
}

pub async fn get_blog_end(
    State(state): State<AppState>,
    Path(blog_id): Path<String>,
) -> Result<Json<Blog>, ApiError> {
    let blog_id = parse_id(&blog_id)?;

    match get_blog(&*state.blogs, blog_id).await? {
        Some(blog) => Ok(Json(blog)),
        None => Err(ApiError::NotFound("blog not found".to_string())),
    }
}

pub async fn create_blog_end(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<NewBlog>, JsonRejection>,
) -> Result<(StatusCode, Json<Blog>), ApiError> {
    let creator = auth.require()?;
    let Json(new_blog) = payload?;

    let blog = create_blog(&*state.blogs, &*state.users, creator, new_blog).await?;

    Ok((StatusCode::CREATED, Json(blog)))
}

pub async fn update_blog_end(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(blog_id): Path<String>,
    payload: Result<Json<LikesInfo>, JsonRejection>,
) -> Result<Json<Blog>, ApiError> {
    let caller = if state.ownership.gates_every_mutation() {
        Some(auth.require()?)
    } else {
        None
    };
    let blog_id = parse_id(&blog_id)?;
    let Json(likes_info) = payload?;

    let blog = update_blog_likes(&*state.blogs, blog_id, likes_info.likes, caller).await?;

    Ok(Json(blog))
}

pub async fn delete_blog_end(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(blog_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let caller = auth.require()?;
    let blog_id = parse_id(&blog_id)?;

    delete_blog(&*state.blogs, blog_id, caller).await?;

    Ok(StatusCode::NO_CONTENT)
}
