use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,

    /// Owner. Set once from the creator's identity.
    #[sqlx(rename = "user_id")]
    pub user: Uuid,

    pub created_at: DateTime<Utc>,
}

/// Fields a PUT may change on a blog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPatch {
    pub likes: Option<i64>,
}

/// Client payload for creating a blog. The owner never comes from here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBlog {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}
