use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, migrate::MigrateError, postgres::PgPoolOptions};
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

const BLOG_COLUMNS: &str = "id, title, author, url, likes, user_id, created_at";
const NOTE_COLUMNS: &str = "id, content, important, user_id, created_at";
const USER_COLUMNS: &str = "id, username, name, password_hash, created_at";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        Self::connect(database_url, 5).await
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(PostgresDatabase { pool })
    }

    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn db_error(err: sqlx::Error) -> DatabaseError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DatabaseError::UniqueViolation(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        other => DatabaseError::InternalDBError(other.to_string()),
    }
}

#[derive(FromRow)]
struct BlogRow {
    id: Uuid,
    title: String,
    author: Option<String>,
    url: String,
    likes: i64,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    owner_username: String,
    owner_name: Option<String>,
}

impl From<BlogRow> for BlogView {
    fn from(row: BlogRow) -> Self {
        BlogView {
            id: row.id,
            title: row.title,
            author: row.author,
            url: row.url,
            likes: row.likes,
            user: Owner {
                id: row.user_id,
                username: row.owner_username,
                name: row.owner_name,
            },
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct NoteRow {
    id: Uuid,
    content: String,
    important: bool,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    owner_username: String,
    owner_name: Option<String>,
}

impl From<NoteRow> for NoteView {
    fn from(row: NoteRow) -> Self {
        NoteView {
            id: row.id,
            content: row.content,
            important: row.important,
            user: Owner {
                id: row.user_id,
                username: row.owner_username,
                name: row.owner_name,
            },
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserDatabase for PostgresDatabase {
    async fn create_user(&self, user: User) -> DatabaseResult<()> {
        sqlx::query(
            "INSERT INTO users (id, username, name, password_hash, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn get_user_by_username(&self, username: String) -> DatabaseResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> DatabaseResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn list_users(&self) -> DatabaseResult<Vec<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }
}

#[async_trait]
impl BlogDatabase for PostgresDatabase {
    async fn list_blogs(&self, filter: ResourceFilter) -> DatabaseResult<Vec<BlogView>> {
        let rows = sqlx::query_as::<_, BlogRow>(
            "SELECT b.id, b.title, b.author, b.url, b.likes, b.user_id, b.created_at, \
                    u.username AS owner_username, u.name AS owner_name \
             FROM blogs b JOIN users u ON u.id = b.user_id \
             WHERE $1::uuid IS NULL OR b.user_id = $1 \
             ORDER BY b.created_at, b.id",
        )
        .bind(filter.user)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(BlogView::from).collect())
    }

    async fn get_blog(&self, blog_id: Uuid) -> DatabaseResult<Option<Blog>> {
        sqlx::query_as::<_, Blog>(&format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1"))
            .bind(blog_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn create_blog(&self, blog: Blog) -> DatabaseResult<Blog> {
        sqlx::query_as::<_, Blog>(&format!(
            "INSERT INTO blogs ({BLOG_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {BLOG_COLUMNS}"
        ))
        .bind(blog.id)
        .bind(&blog.title)
        .bind(&blog.author)
        .bind(&blog.url)
        .bind(blog.likes)
        .bind(blog.user)
        .bind(blog.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn update_blog(&self, blog_id: Uuid, patch: BlogPatch) -> DatabaseResult<Blog> {
        sqlx::query_as::<_, Blog>(&format!(
            "UPDATE blogs SET likes = COALESCE($2, likes) WHERE id = $1 RETURNING {BLOG_COLUMNS}"
        ))
        .bind(blog_id)
        .bind(patch.likes)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .ok_or(DatabaseError::NotFound)
    }

    async fn delete_blog(&self, blog_id: Uuid) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(blog_id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

#[async_trait]
impl NoteDatabase for PostgresDatabase {
    async fn list_notes(&self, filter: ResourceFilter) -> DatabaseResult<Vec<NoteView>> {
        let rows = sqlx::query_as::<_, NoteRow>(
            "SELECT n.id, n.content, n.important, n.user_id, n.created_at, \
                    u.username AS owner_username, u.name AS owner_name \
             FROM notes n JOIN users u ON u.id = n.user_id \
             WHERE $1::uuid IS NULL OR n.user_id = $1 \
             ORDER BY n.created_at, n.id",
        )
        .bind(filter.user)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(NoteView::from).collect())
    }

    async fn get_note(&self, note_id: Uuid) -> DatabaseResult<Option<Note>> {
        sqlx::query_as::<_, Note>(&format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1"))
            .bind(note_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn create_note(&self, note: Note) -> DatabaseResult<Note> {
        sqlx::query_as::<_, Note>(&format!(
            "INSERT INTO notes ({NOTE_COLUMNS}) VALUES ($1, $2, $3, $4, $5) \
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(note.id)
        .bind(&note.content)
        .bind(note.important)
        .bind(note.user)
        .bind(note.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn update_note(&self, note_id: Uuid, patch: NotePatch) -> DatabaseResult<Note> {
        sqlx::query_as::<_, Note>(&format!(
            "UPDATE notes SET content = COALESCE($2, content), \
             important = COALESCE($3, important) \
             WHERE id = $1 RETURNING {NOTE_COLUMNS}"
        ))
        .bind(note_id)
        .bind(patch.content)
        .bind(patch.important)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .ok_or(DatabaseError::NotFound)
    }

    async fn delete_note(&self, note_id: Uuid) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(note_id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
