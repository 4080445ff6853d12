use crate::error::AppError;
use crate::models::{BlogPost, Comment, PostForm, Role, User};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations, allowing the
/// services and handlers to interact with the data layer without knowing the
/// concrete implementation (SQLite, mock, etc.).
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn BlogRepository>`) safely shareable across Axum's asynchronous
/// task boundaries.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    // --- Users ---
    /// Inserts a new account. The first account on an empty store receives the
    /// Admin role; every later one is a Member. A duplicate email is rejected
    /// by the store's unique constraint and surfaces as `EmailTaken`.
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    // Primary-key lookup used to resolve the session principal.
    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError>;

    // --- Posts ---
    async fn create_post(
        &self,
        form: &PostForm,
        author_id: i64,
        date: &str,
    ) -> Result<BlogPost, AppError>;
    /// Overwrites every mutable field and reattributes the post to
    /// `author_id`. Fails with `NotFound` if the id is absent.
    async fn update_post(
        &self,
        id: i64,
        form: &PostForm,
        author_id: i64,
    ) -> Result<BlogPost, AppError>;
    /// Removes a post; its comments go with it via the relational cascade.
    /// Returns false when no row matched.
    async fn delete_post(&self, id: i64) -> Result<bool, AppError>;
    async fn list_posts(&self) -> Result<Vec<BlogPost>, AppError>;
    async fn get_post(&self, id: i64) -> Result<Option<BlogPost>, AppError>;

    // --- Comments ---
    async fn create_comment(
        &self,
        post_id: i64,
        commenter_id: i64,
        text: &str,
    ) -> Result<Comment, AppError>;
    // Comments come back in insertion (id) order.
    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, AppError>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the
/// application state.
pub type RepositoryState = Arc<dyn BlogRepository>;

// Shared column lists so every query returns fully joined rows. Posts and
// comments always carry their author's display name via a JOIN with `users`;
// relationships are plain foreign keys resolved at query time.
const POST_COLUMNS: &str = "p.id, p.title, p.subtitle, p.date, p.body, p.img_url, \
     p.author_id, u.name AS author_name \
     FROM blog_posts p JOIN users u ON p.author_id = u.id";

const COMMENT_COLUMNS: &str = "c.id, c.text, c.commenter_id, c.post_id, \
     u.name AS commenter_name \
     FROM comments c JOIN users u ON c.commenter_id = u.id";

const USER_COLUMNS: &str = "id, name, email, password_hash, role FROM users";

/// SqliteRepository
///
/// The concrete implementation of `BlogRepository`, backed by SQLite through
/// a pooled connection (safe for concurrent in-flight requests).
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// init_schema
    ///
    /// Creates the three tables if they are absent. Idempotent, called once at
    /// process start; this is the whole migration story. The comment cascade
    /// is declared here so deleting a post can never orphan its comments.
    pub async fn init_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'member'
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS blog_posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL UNIQUE,
                subtitle TEXT NOT NULL,
                date TEXT NOT NULL,
                body TEXT NOT NULL,
                img_url TEXT NOT NULL,
                author_id INTEGER NOT NULL REFERENCES users(id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS comments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                commenter_id INTEGER NOT NULL REFERENCES users(id),
                post_id INTEGER NOT NULL REFERENCES blog_posts(id) ON DELETE CASCADE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl BlogRepository for SqliteRepository {
    /// create_user
    ///
    /// Count-then-insert runs inside one transaction so the
    /// first-registered-is-admin invariant holds even under concurrent
    /// registrations. The unique email constraint turns a lost race into
    /// `EmailTaken` rather than a second row.
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await?;
        let role = if existing == 0 { Role::Admin } else { Role::Member };

        let result = sqlx::query(
            "INSERT INTO users (name, email, password_hash, role) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return AppError::EmailTaken;
                }
            }
            AppError::Database(e)
        })?;

        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} WHERE id = ?"))
            .bind(result.last_insert_rowid())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// create_post
    ///
    /// Inserts a post and returns the stored row joined with its author name.
    async fn create_post(
        &self,
        form: &PostForm,
        author_id: i64,
        date: &str,
    ) -> Result<BlogPost, AppError> {
        let result = sqlx::query(
            "INSERT INTO blog_posts (title, subtitle, date, body, img_url, author_id) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&form.title)
        .bind(&form.subtitle)
        .bind(date)
        .bind(&form.body)
        .bind(&form.img_url)
        .bind(author_id)
        .execute(&self.pool)
        .await?;

        let post =
            sqlx::query_as::<_, BlogPost>(&format!("SELECT {POST_COLUMNS} WHERE p.id = ?"))
                .bind(result.last_insert_rowid())
                .fetch_one(&self.pool)
                .await?;
        Ok(post)
    }

    /// update_post
    ///
    /// Overwrites every mutable field. The `date` column keeps its
    /// creation-time value; the author column is reassigned to `author_id`.
    async fn update_post(
        &self,
        id: i64,
        form: &PostForm,
        author_id: i64,
    ) -> Result<BlogPost, AppError> {
        let result = sqlx::query(
            "UPDATE blog_posts SET title = ?, subtitle = ?, body = ?, img_url = ?, \
             author_id = ? WHERE id = ?",
        )
        .bind(&form.title)
        .bind(&form.subtitle)
        .bind(&form.body)
        .bind(&form.img_url)
        .bind(author_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }

        let post =
            sqlx::query_as::<_, BlogPost>(&format!("SELECT {POST_COLUMNS} WHERE p.id = ?"))
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(post)
    }

    /// delete_post
    ///
    /// The ON DELETE CASCADE on `comments.post_id` removes the post's
    /// comments in the same statement.
    async fn delete_post(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let posts =
            sqlx::query_as::<_, BlogPost>(&format!("SELECT {POST_COLUMNS} ORDER BY p.id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(posts)
    }

    async fn get_post(&self, id: i64) -> Result<Option<BlogPost>, AppError> {
        let post =
            sqlx::query_as::<_, BlogPost>(&format!("SELECT {POST_COLUMNS} WHERE p.id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(post)
    }

    async fn create_comment(
        &self,
        post_id: i64,
        commenter_id: i64,
        text: &str,
    ) -> Result<Comment, AppError> {
        let result =
            sqlx::query("INSERT INTO comments (text, commenter_id, post_id) VALUES (?, ?, ?)")
                .bind(text)
                .bind(commenter_id)
                .bind(post_id)
                .execute(&self.pool)
                .await?;

        let comment =
            sqlx::query_as::<_, Comment>(&format!("SELECT {COMMENT_COLUMNS} WHERE c.id = ?"))
                .bind(result.last_insert_rowid())
                .fetch_one(&self.pool)
                .await?;
        Ok(comment)
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} WHERE c.post_id = ? ORDER BY c.id"
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }
}
