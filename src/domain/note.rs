use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub content: String,
    pub important: bool,

    #[sqlx(rename = "user_id")]
    pub user: Uuid,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub content: Option<String>,
    pub important: Option<bool>,
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.important.is_none()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewNote {
    pub content: Option<String>,
    pub important: Option<bool>,
}
