use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use cookie::Cookie;
use std::{collections::HashMap, convert::Infallible, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::AppError,
    flash,
    models::User,
    password,
    repository::RepositoryState,
};

/// Cookie name for the session token.
pub const SESSION_COOKIE: &str = "session";

/// CurrentUser
///
/// The resolved principal of a request. `Anonymous` is a real variant rather
/// than a missing value, so callers pattern-match capability instead of
/// null-checking.
#[derive(Debug, Clone, Default)]
pub enum CurrentUser {
    User(User),
    #[default]
    Anonymous,
}

impl CurrentUser {
    pub fn user(&self) -> Option<&User> {
        match self {
            CurrentUser::User(user) => Some(user),
            CurrentUser::Anonymous => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(User::is_admin)
    }
}

/// AuthService
///
/// Owns the session lifecycle: a process-wide map from opaque session token
/// to user id, plus the register/login/logout operations over it. Tokens are
/// random UUIDs carried in an HttpOnly cookie; the map is the only session
/// state, so a restart logs everyone out.
#[derive(Clone)]
pub struct AuthService {
    repo: RepositoryState,
    sessions: Arc<RwLock<HashMap<String, i64>>>,
}

impl AuthService {
    pub fn new(repo: RepositoryState) -> Self {
        Self {
            repo,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// register
    ///
    /// Creates an account and logs it in. Fails with `EmailTaken` when the
    /// email is already registered; the store's unique constraint backstops
    /// this check against concurrent registrations. The plaintext password is
    /// hashed immediately and never stored or logged.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        plaintext: &str,
    ) -> Result<(User, String), AppError> {
        if self.repo.find_user_by_email(email).await?.is_some() {
            return Err(AppError::EmailTaken);
        }

        let digest = password::hash_password(plaintext)?;
        let user = self.repo.create_user(name, email, &digest).await?;
        let token = self.open_session(user.id).await;
        Ok((user, token))
    }

    /// login
    ///
    /// Resolves the account by email, verifies the password against the
    /// stored digest, and opens a session. Unknown email and wrong password
    /// are distinct errors with distinct user-facing notices.
    pub async fn login(&self, email: &str, plaintext: &str) -> Result<(User, String), AppError> {
        let user = self
            .repo
            .find_user_by_email(email)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !password::verify_password(&user.password_hash, plaintext) {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.open_session(user.id).await;
        Ok((user, token))
    }

    /// logout
    ///
    /// Invalidates the session. Idempotent: logging out an unknown or
    /// already-removed token is not an error.
    pub async fn logout(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    /// current_user
    ///
    /// Resolves a session token to its principal. Any failure along the way
    /// (no token, unknown token, user since deleted) degrades to `Anonymous`.
    pub async fn current_user(&self, token: Option<&str>) -> CurrentUser {
        let Some(token) = token else {
            return CurrentUser::Anonymous;
        };

        let user_id = {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(id) => *id,
                None => return CurrentUser::Anonymous,
            }
        };

        match self.repo.get_user(user_id).await {
            Ok(Some(user)) => CurrentUser::User(user),
            Ok(None) => CurrentUser::Anonymous,
            Err(e) => {
                tracing::error!("session principal lookup failed: {:?}", e);
                CurrentUser::Anonymous
            }
        }
    }

    async fn open_session(&self, user_id: i64) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(token.clone(), user_id);
        token
    }
}

/// Set-Cookie value establishing a session.
pub fn session_cookie(token: &str) -> String {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build()
        .encoded()
        .to_string()
}

/// Set-Cookie value ending a session on the client.
pub fn clear_session_cookie() -> String {
    let mut removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    removal.make_removal();
    removal.encoded().to_string()
}

/// CurrentUser Extractor Implementation
///
/// Makes `CurrentUser` usable as a handler argument. Resolution never
/// rejects: a request without a valid session simply arrives as `Anonymous`,
/// and each route decides what that means (render a login link, redirect, or
/// 403 via the admin guard).
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AuthService: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthService::from_ref(state);
        let token = flash::cookie_value(&parts.headers, SESSION_COOKIE);
        Ok(auth.current_user(token.as_deref()).await)
    }
}
