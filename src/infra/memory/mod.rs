use std::sync::Arc;

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use uuid::Uuid;

use crate::{
    domain::{
        blog::{Blog, BlogPatch},
        dto::{BlogView, NoteView, Owner, ResourceFilter},
        note::{Note, NotePatch},
        user::User,
    },
    use_cases::{
        blog_database::BlogDatabase,
        database::{DatabaseError, DatabaseResult},
        note_database::NoteDatabase,
        user_database::UserDatabase,
    },
};

/// In-process store for local runs and tests. Clones share the same data.
#[derive(Clone, Debug, Default)]
pub struct MemoryDatabase {
    users: Arc<DashMap<Uuid, User>>,
    usernames: Arc<DashMap<String, Uuid>>,
    blogs: Arc<DashMap<Uuid, Blog>>,
    notes: Arc<DashMap<Uuid, Note>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn owner(&self, user_id: Uuid) -> Option<Owner> {
        self.users.get(&user_id).map(|user| Owner::from(user.value()))
    }
}

#[async_trait]
impl UserDatabase for MemoryDatabase {
    async fn create_user(&self, user: User) -> DatabaseResult<()> {
        match self.usernames.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(DatabaseError::UniqueViolation(user.username)),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user);
                Ok(())
            }
        }
    }

    async fn get_user_by_username(&self, username: String) -> DatabaseResult<Option<User>> {
        let Some(user_id) = self.usernames.get(&username).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.users.get(&user_id).map(|user| user.clone()))
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> DatabaseResult<Option<User>> {
        Ok(self.users.get(&user_id).map(|user| user.clone()))
    }

    async fn list_users(&self) -> DatabaseResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|user| user.clone()).collect();
        users.sort_by_key(|user| (user.created_at, user.id));
        Ok(users)
    }
}

#[async_trait]
impl BlogDatabase for MemoryDatabase {
    async fn list_blogs(&self, filter: ResourceFilter) -> DatabaseResult<Vec<BlogView>> {
        let mut blogs: Vec<Blog> = self
            .blogs
            .iter()
            .filter(|blog| filter.matches(blog.user))
            .map(|blog| blog.clone())
            .collect();
        blogs.sort_by_key(|blog| (blog.created_at, blog.id));

        Ok(blogs
            .into_iter()
            .filter_map(|blog| {
                let owner = self.owner(blog.user)?;
                Some(BlogView::new(blog, owner))
            })
            .collect())
    }

    async fn get_blog(&self, blog_id: Uuid) -> DatabaseResult<Option<Blog>> {
        Ok(self.blogs.get(&blog_id).map(|blog| blog.clone()))
    }

    async fn create_blog(&self, blog: Blog) -> DatabaseResult<Blog> {
        self.blogs.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn update_blog(&self, blog_id: Uuid, patch: BlogPatch) -> DatabaseResult<Blog> {
        let mut blog = self.blogs.get_mut(&blog_id).ok_or(DatabaseError::NotFound)?;
        if let Some(likes) = patch.likes {
            blog.likes = likes;
        }
        Ok(blog.clone())
    }

    async fn delete_blog(&self, blog_id: Uuid) -> DatabaseResult<()> {
        self.blogs.remove(&blog_id);
        Ok(())
    }
}

#[async_trait]
impl NoteDatabase for MemoryDatabase {
    async fn list_notes(&self, filter: ResourceFilter) -> DatabaseResult<Vec<NoteView>> {
        let mut notes: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| filter.matches(note.user))
            .map(|note| note.clone())
            .collect();
        notes.sort_by_key(|note| (note.created_at, note.id));

        Ok(notes
            .into_iter()
            .filter_map(|note| {
                let owner = self.owner(note.user)?;
                Some(NoteView::new(note, owner))
            })
            .collect())
    }

    async fn get_note(&self, note_id: Uuid) -> DatabaseResult<Option<Note>> {
        Ok(self.notes.get(&note_id).map(|note| note.clone()))
    }

    async fn create_note(&self, note: Note) -> DatabaseResult<Note> {
        self.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn update_note(&self, note_id: Uuid, patch: NotePatch) -> DatabaseResult<Note> {
        let mut note = self.notes.get_mut(&note_id).ok_or(DatabaseError::NotFound)?;
        if let Some(content) = patch.content {
            note.content = content;
        }
        if let Some(important) = patch.important {
            note.important = important;
        }
        Ok(note.clone())
    }

    async fn delete_note(&self, note_id: Uuid) -> DatabaseResult<()> {
        self.notes.remove(&note_id);
        Ok(())
    }
}
