use chrono::Local;

use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{BlogPost, Comment, PostForm, User},
    repository::RepositoryState,
};

/// PostService
///
/// CRUD over posts and comments, with the two server-side stamps the store
/// never sees from a form: the creation date and the author identity. Admin
/// enforcement lives in the route guard; this service trusts its caller for
/// that rule.
#[derive(Clone)]
pub struct PostService {
    repo: RepositoryState,
}

impl PostService {
    pub fn new(repo: RepositoryState) -> Self {
        Self { repo }
    }

    /// All posts, for the index view.
    pub async fn list_all(&self) -> Result<Vec<BlogPost>, AppError> {
        self.repo.list_posts().await
    }

    /// A single post, or `NotFound`. Used directly by the show, edit, and
    /// delete routes.
    pub async fn get(&self, post_id: i64) -> Result<BlogPost, AppError> {
        self.repo.get_post(post_id).await?.ok_or(AppError::NotFound)
    }

    /// create
    ///
    /// Stamps the date as the server's current calendar date, formatted once
    /// at creation time, and the author as the authenticated user.
    pub async fn create(&self, form: PostForm, author: &User) -> Result<BlogPost, AppError> {
        let date = Local::now().format("%B %d, %Y").to_string();
        self.repo.create_post(&form, author.id, &date).await
    }

    /// update
    ///
    /// Overwrites every mutable field and reattributes the post to the
    /// editor. The creation date is untouched.
    pub async fn update(
        &self,
        post_id: i64,
        form: PostForm,
        editor: &User,
    ) -> Result<BlogPost, AppError> {
        self.repo.update_post(post_id, &form, editor.id).await
    }

    /// delete
    ///
    /// Removes the post and, through the relational cascade, its comments.
    pub async fn delete(&self, post_id: i64) -> Result<(), AppError> {
        if self.repo.delete_post(post_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }

    pub async fn comments(&self, post_id: i64) -> Result<Vec<Comment>, AppError> {
        self.repo.list_comments(post_id).await
    }

    /// add_comment
    ///
    /// The route already gates on login; anonymous authorship is rejected
    /// here as well so no caller can create an unattributed comment.
    pub async fn add_comment(
        &self,
        post_id: i64,
        text: &str,
        viewer: &CurrentUser,
    ) -> Result<Comment, AppError> {
        let user = viewer.user().ok_or(AppError::RequiresLogin)?;
        self.repo.create_comment(post_id, user.id, text).await
    }
}
