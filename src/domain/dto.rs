use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{blog::Blog, note::Note, user::User};

/// Public fields of a resource owner, inlined into listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

impl From<&User> for Owner {
    fn from(user: &User) -> Self {
        Owner {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogView {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: Owner,
    pub created_at: DateTime<Utc>,
}

impl BlogView {
    pub fn new(blog: Blog, owner: Owner) -> Self {
        BlogView {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: owner,
            created_at: blog.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub id: Uuid,
    pub content: String,
    pub important: bool,
    pub user: Owner,
    pub created_at: DateTime<Utc>,
}

impl NoteView {
    pub fn new(note: Note, owner: Owner) -> Self {
        NoteView {
            id: note.id,
            content: note.content,
            important: note.important,
            user: owner,
            created_at: note.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogEntry {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEntry {
    pub id: Uuid,
    pub content: String,
    pub important: bool,
}

/// A user with the resources they own, as listed by `GET /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<BlogEntry>,
    pub notes: Vec<NoteEntry>,
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

/// Narrows a listing to resources owned by one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ResourceFilter {
    pub user: Option<Uuid>,
}

impl ResourceFilter {
    pub fn matches(&self, owner: Uuid) -> bool {
        self.user.is_none_or(|user| user == owner)
    }
}
