use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{
        dto::{NoteView, ResourceFilter},
        note::{NewNote, Note, NotePatch},
        user::Identity,
    },
    use_cases::{
        crud_error::{CrudError, CrudResult},
        database::DatabaseError,
        note_database::NoteDatabase,
        ownership::ensure_owner,
        user_database::UserDatabase,
    },
};

const RESOURCE: &str = "note";

pub async fn list_notes<D: NoteDatabase + ?Sized>(
    db: &D,
    filter: ResourceFilter,
) -> CrudResult<Vec<NoteView>> {
    Ok(db.list_notes(filter).await?)
}

pub async fn get_note<D: NoteDatabase + ?Sized>(
    db: &D,
    note_id: Uuid,
) -> CrudResult<Option<Note>> {
    Ok(db.get_note(note_id).await?)
}

pub async fn create_note<N, U>(
    notes: &N,
    users: &U,
    creator: &Identity,
    new_note: NewNote,
) -> CrudResult<Note>
where
    N: NoteDatabase + ?Sized,
    U: UserDatabase + ?Sized,
{
    let content = match new_note.content {
        Some(content) if !content.trim().is_empty() => content,
        _ => return Err(CrudError::Validation("content missing".to_string())),
    };

    if users.get_user_by_id(creator.user_id).await?.is_none() {
        return Err(CrudError::UnknownUser);
    }

    let note = Note {
        id: Uuid::new_v4(),
        content,
        important: new_note.important.unwrap_or(false),
        user: creator.user_id,
        created_at: Utc::now(),
    };

    let saved = notes.create_note(note).await?;
    info!("user {} created note {}", creator.username, saved.id);

    Ok(saved)
}

/// Merges `content` and `important`. When `caller` is given the note must be theirs.
pub async fn update_note<D: NoteDatabase + ?Sized>(
    db: &D,
    note_id: Uuid,
    patch: NotePatch,
    caller: Option<&Identity>,
) -> CrudResult<Note> {
    if patch.is_empty() {
        return Err(CrudError::Validation(
            "content or important missing".to_string(),
        ));
    }
    if patch
        .content
        .as_deref()
        .is_some_and(|content| content.trim().is_empty())
    {
        return Err(CrudError::Validation("content missing".to_string()));
    }

    if let Some(caller) = caller {
        let note = db
            .get_note(note_id)
            .await?
            .ok_or(CrudError::NotFound(RESOURCE))?;
        ensure_owner(note.user, caller, RESOURCE)?;
    }

    db.update_note(note_id, patch).await.map_err(|err| match err {
        DatabaseError::NotFound => CrudError::NotFound(RESOURCE),
        other => other.into(),
    })
}

/// Without a caller the delete is unconditional and idempotent.
pub async fn delete_note<D: NoteDatabase + ?Sized>(
    db: &D,
    note_id: Uuid,
    caller: Option<&Identity>,
) -> CrudResult<()> {
    if let Some(caller) = caller {
        let note = db
            .get_note(note_id)
            .await?
            .ok_or(CrudError::NothingToDelete(RESOURCE))?;
        ensure_owner(note.user, caller, RESOURCE)?;
    }

    db.delete_note(note_id).await?;

    Ok(())
}
