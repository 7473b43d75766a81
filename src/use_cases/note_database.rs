use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    domain::{
        dto::{NoteView, ResourceFilter},
        note::{Note, NotePatch},
    },
    use_cases::database::DatabaseResult,
};

#[automock]
#[async_trait]
pub trait NoteDatabase: Send + Sync {
    async fn list_notes(&self, filter: ResourceFilter) -> DatabaseResult<Vec<NoteView>>;

    async fn get_note(&self, note_id: Uuid) -> DatabaseResult<Option<Note>>;

    async fn create_note(&self, note: Note) -> DatabaseResult<Note>;

    async fn update_note(&self, note_id: Uuid, patch: NotePatch) -> DatabaseResult<Note>;

    async fn delete_note(&self, note_id: Uuid) -> DatabaseResult<()>;
}
