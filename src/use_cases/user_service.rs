use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    domain::dto::{BlogEntry, NoteEntry, ResourceFilter, UserSummary},
    use_cases::{
        blog_database::BlogDatabase, crud_error::CrudResult, note_database::NoteDatabase,
        user_database::UserDatabase,
    },
};

/// Every user with the blogs and notes they own inlined.
pub async fn list_users<U, B, N>(users: &U, blogs: &B, notes: &N) -> CrudResult<Vec<UserSummary>>
where
    U: UserDatabase + ?Sized,
    B: BlogDatabase + ?Sized,
    N: NoteDatabase + ?Sized,
{
    let mut blogs_by_owner: HashMap<Uuid, Vec<BlogEntry>> = HashMap::new();
    for blog in blogs.list_blogs(ResourceFilter::default()).await? {
        blogs_by_owner.entry(blog.user.id).or_default().push(BlogEntry {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
        });
    }

    let mut notes_by_owner: HashMap<Uuid, Vec<NoteEntry>> = HashMap::new();
    for note in notes.list_notes(ResourceFilter::default()).await? {
        notes_by_owner.entry(note.user.id).or_default().push(NoteEntry {
            id: note.id,
            content: note.content,
            important: note.important,
        });
    }

    let summaries = users
        .list_users()
        .await?
        .into_iter()
        .map(|user| UserSummary {
            blogs: blogs_by_owner.remove(&user.id).unwrap_or_default(),
            notes: notes_by_owner.remove(&user.id).unwrap_or_default(),
            id: user.id,
            username: user.username,
            name: user.name,
        })
        .collect();

    Ok(summaries)
}
