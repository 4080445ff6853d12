use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// --- Core Application Schemas (Mapped to Database) ---

/// Role
///
/// The authorization level attached to every account. The first account
/// registered on a fresh database becomes `Admin`; every later account is a
/// `Member`. Stored as lowercase text in the `users.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Member,
}

/// User
///
/// A registered account row from the `users` table. The password is only ever
/// held as a salted PHC-format digest; the plaintext never reaches a model.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default)]
pub struct User {
    pub id: i64,
    pub name: String,
    // Unique at the store level; the insert surfaces the conflict.
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// BlogPost
///
/// A post row from the `blog_posts` table, joined with its author's display
/// name. The `date` field is preformatted ("Month DD, YYYY") when the post is
/// created and never reparsed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub body: String,
    pub img_url: String,
    // FK to users.id.
    pub author_id: i64,
    // Loaded via a JOIN with `users` in every repository query.
    pub author_name: String,
}

/// Comment
///
/// A comment row from the `comments` table, joined with the commenter's
/// display name. Comments are never edited; they disappear only when their
/// parent post is deleted (relational cascade).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub commenter_id: i64,
    pub post_id: i64,
    // Loaded via a JOIN with `users` in every repository query.
    pub commenter_name: String,
}

// --- Form Payloads (Input Schemas) ---

/// RegisterForm
///
/// Input payload for POST /register.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// LoginForm
///
/// Input payload for POST /login.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// PostForm
///
/// Input payload shared by the create (POST /new-post) and edit
/// (POST /edit-post/{id}) routes. Author and date are stamped server-side,
/// never accepted from the form.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PostForm {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
}

/// CommentForm
///
/// Input payload for the comment box on POST /post/{id}.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CommentForm {
    pub text: String,
}
