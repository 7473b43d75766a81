use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        dto::{Session, UserSummary},
        user::User,
    },
    infra::http_api::{AppState, error::ApiError},
    use_cases::{
        auth_service::{login, register},
        user_service::list_users,
    },
};

#[derive(Deserialize, Serialize)]
pub struct AuthInfo {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize, Serialize)]
pub struct RegisterInfo {
    #[serde(default)]
    username: String,
    name: Option<String>,
    #[serde(default)]
    password: String,
}

pub async fn login_end(
    State(state): State<AppState>,
    payload: Result<Json<AuthInfo>, JsonRejection>,
) -> Result<Json<Session>, ApiError> {
    let Json(auth_info) = payload?;

    let session = login(
        &*state.users,
        auth_info.username,
        auth_info.password,
        &state.auth,
    )
    .await?;

    Ok(Json(session))
}

pub async fn register_end(
    State(state): State<AppState>,
    payload: Result<Json<RegisterInfo>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(register_info) = payload?;

    let user = register(
        &*state.users,
        register_info.username,
        register_info.name,
        register_info.password,
        &state.auth,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn list_users_end(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = list_users(&*state.users, &*state.blogs, &*state.notes).await?;

    Ok(Json(users))
}
