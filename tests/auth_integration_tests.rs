use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{Method, Request, Uri, header, request::Parts},
};
use quillpost::{
    AppConfig, AppState, HtmlPages, ViewState,
    auth::{self, CurrentUser},
    error::AppError,
    models::{BlogPost, Comment, PostForm, Role, User},
    repository::{BlogRepository, RepositoryState},
};
use std::sync::{Arc, Mutex};

// --- Mock Repository for Auth Logic ---

/// In-memory user store mimicking the real repository's account semantics:
/// first user becomes Admin, duplicate emails are rejected by the store.
#[derive(Default)]
struct MockAuthRepo {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl BlogRepository for MockAuthRepo {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::EmailTaken);
        }
        let user = User {
            id: users.len() as i64 + 1,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: if users.is_empty() { Role::Admin } else { Role::Member },
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    // Post and comment operations are not exercised by the auth tests.
    async fn create_post(
        &self,
        _form: &PostForm,
        _author_id: i64,
        _date: &str,
    ) -> Result<BlogPost, AppError> {
        Ok(BlogPost::default())
    }
    async fn update_post(
        &self,
        _id: i64,
        _form: &PostForm,
        _author_id: i64,
    ) -> Result<BlogPost, AppError> {
        Ok(BlogPost::default())
    }
    async fn delete_post(&self, _id: i64) -> Result<bool, AppError> {
        Ok(false)
    }
    async fn list_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        Ok(vec![])
    }
    async fn get_post(&self, _id: i64) -> Result<Option<BlogPost>, AppError> {
        Ok(None)
    }
    async fn create_comment(
        &self,
        _post_id: i64,
        _commenter_id: i64,
        _text: &str,
    ) -> Result<Comment, AppError> {
        Ok(Comment::default())
    }
    async fn list_comments(&self, _post_id: i64) -> Result<Vec<Comment>, AppError> {
        Ok(vec![])
    }
}

// --- Helper Functions ---

fn create_app_state() -> AppState {
    let repo = Arc::new(MockAuthRepo::default()) as RepositoryState;
    let views = Arc::new(HtmlPages) as ViewState;
    AppState::new(repo, views, AppConfig::default())
}

/// Helper to get the mutable Parts struct from a generated Request.
fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

// --- AuthService Tests ---

#[tokio::test]
async fn test_register_opens_session_and_first_user_is_admin() {
    let state = create_app_state();

    let (admin, token) = state
        .auth
        .register("Boss", "boss@example.com", "adminpw")
        .await
        .unwrap();
    assert_eq!(admin.role, Role::Admin);

    // The returned token resolves back to the same principal.
    match state.auth.current_user(Some(&token)).await {
        CurrentUser::User(user) => assert_eq!(user.id, admin.id),
        CurrentUser::Anonymous => panic!("fresh registration should be logged in"),
    }

    // Every later account is a plain member.
    let (member, _) = state
        .auth
        .register("Alice", "a@x.com", "pw123")
        .await
        .unwrap();
    assert_eq!(member.role, Role::Member);
}

#[tokio::test]
async fn test_register_rejects_taken_email() {
    let state = create_app_state();
    state
        .auth
        .register("Alice", "a@x.com", "pw123")
        .await
        .unwrap();

    let err = state
        .auth
        .register("Impostor", "a@x.com", "other")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EmailTaken));
}

#[tokio::test]
async fn test_login_distinguishes_unknown_email_from_bad_password() {
    let state = create_app_state();
    state
        .auth
        .register("Alice", "a@x.com", "pw123")
        .await
        .unwrap();

    let err = state.auth.login("nobody@x.com", "pw123").await.unwrap_err();
    assert!(matches!(err, AppError::UserNotFound));

    let err = state.auth.login("a@x.com", "wrong").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_success_opens_session() {
    let state = create_app_state();
    state
        .auth
        .register("Alice", "a@x.com", "pw123")
        .await
        .unwrap();

    let (user, token) = state.auth.login("a@x.com", "pw123").await.unwrap();
    assert_eq!(user.email, "a@x.com");
    assert!(matches!(
        state.auth.current_user(Some(&token)).await,
        CurrentUser::User(_)
    ));
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let state = create_app_state();
    let (_, token) = state
        .auth
        .register("Alice", "a@x.com", "pw123")
        .await
        .unwrap();

    state.auth.logout(&token).await;
    // Logging out twice is not an error.
    state.auth.logout(&token).await;

    assert!(matches!(
        state.auth.current_user(Some(&token)).await,
        CurrentUser::Anonymous
    ));
}

#[tokio::test]
async fn test_unknown_token_resolves_to_anonymous() {
    let state = create_app_state();
    assert!(matches!(
        state.auth.current_user(Some("no-such-token")).await,
        CurrentUser::Anonymous
    ));
    assert!(matches!(
        state.auth.current_user(None).await,
        CurrentUser::Anonymous
    ));
}

// --- CurrentUser Extractor Tests ---

#[tokio::test]
async fn test_extractor_resolves_session_cookie() {
    let state = create_app_state();
    let (admin, token) = state
        .auth
        .register("Boss", "boss@example.com", "adminpw")
        .await
        .unwrap();

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::COOKIE,
        header::HeaderValue::from_str(&format!("{}={}", auth::SESSION_COOKIE, token)).unwrap(),
    );

    let viewer = CurrentUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();
    match viewer {
        CurrentUser::User(user) => {
            assert_eq!(user.id, admin.id);
            assert!(user.is_admin());
        }
        CurrentUser::Anonymous => panic!("valid session cookie should resolve to a user"),
    }
}

#[tokio::test]
async fn test_extractor_without_cookie_is_anonymous() {
    let state = create_app_state();
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());

    let viewer = CurrentUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();
    assert!(matches!(viewer, CurrentUser::Anonymous));
    assert!(!viewer.is_admin());
}
