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
        dto::{NoteView, ResourceFilter},
        note::{NewNote, Note, NotePatch},
    },
    infra::http_api::{
        AppState,
        error::{ApiError, parse_id},
        middleware_auth::AuthContext,
    },
    use_cases::note_service::{create_note, delete_note, get_note, list_notes, update_note},
};

#[derive(Deserialize, Serialize)]
pub struct NoteInfo {
    content: Option<String>,
    important: Option<bool>,
}

pub async fn list_notes_end(
    State(state): State<AppState>,
    filter: Result<Query<ResourceFilter>, QueryRejection>,
) -> Result<Json<Vec<NoteView>>, ApiError> {
    let Query(filter) = filter?;

    Ok(Json(list_notes(&*state.notes, filter).await?))
}

pub async fn get_note_end(
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    let note_id = parse_id(&note_id)?;

    get_note(&*state.notes, note_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("note not found".to_string()))
}

pub async fn create_note_end(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<NewNote>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let creator = auth.require()?;
    let Json(new_note) = payload?;

    let note = create_note(&*state.notes, &*state.users, creator, new_note).await?;

    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn update_note_end(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(note_id): Path<String>,
    payload: Result<Json<NoteInfo>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let caller = if state.ownership.gates_every_mutation() {
        Some(auth.require()?)
    } else {
        None
    };
    let note_id = parse_id(&note_id)?;
    let Json(note_info) = payload?;

    let patch = NotePatch {
        content: note_info.content,
        important: note_info.important,
    };
    let note = update_note(&*state.notes, note_id, patch, caller).await?;

    Ok(Json(note))
}

pub async fn delete_note_end(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(note_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let caller = if state.ownership.gates_every_mutation() {
        Some(auth.require()?)
    } else {
        None
    };
    let note_id = parse_id(&note_id)?;

    delete_note(&*state.notes, note_id, caller).await?;

    Ok(StatusCode::NO_CONTENT)
}
