use crate::{
    AppState,
    auth::{self, CurrentUser},
    error::AppError,
    flash::{self, Flash},
    models::{CommentForm, LoginForm, PostForm, RegisterForm},
    views::Page,
};
use axum::{
    Form,
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};

/// index
///
/// GET / lists every post.
pub async fn index(
    State(state): State<AppState>,
    viewer: CurrentUser,
    Flash(notice): Flash,
) -> Result<Response, AppError> {
    let posts = state.posts.list_all().await?;
    let html = state
        .views
        .render(Page::Index { posts: &posts }, &viewer, notice.as_deref());
    Ok(flash::rendered(html, notice.is_some()))
}

/// register_page
///
/// GET /register renders the signup form.
pub async fn register_page(
    State(state): State<AppState>,
    viewer: CurrentUser,
    Flash(notice): Flash,
) -> Response {
    let html = state.views.render(Page::Register, &viewer, notice.as_deref());
    flash::rendered(html, notice.is_some())
}

/// register
///
/// POST /register creates the account and logs it straight in. A duplicate
/// email surfaces as `EmailTaken`, which redirects to /login with a notice.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let (_user, token) = state
        .auth
        .register(&form.name, &form.email, &form.password)
        .await?;
    Ok((
        AppendHeaders([(header::SET_COOKIE, auth::session_cookie(&token))]),
        Redirect::to("/"),
    )
        .into_response())
}

/// login_page
///
/// GET /login renders the login form, including any notice left by a failed
/// attempt or a gated action.
pub async fn login_page(
    State(state): State<AppState>,
    viewer: CurrentUser,
    Flash(notice): Flash,
) -> Response {
    let html = state.views.render(Page::Login, &viewer, notice.as_deref());
    flash::rendered(html, notice.is_some())
}

/// login
///
/// POST /login authenticates and opens a session. Unknown email and wrong
/// password each map to their own recoverable error.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let (_user, token) = state.auth.login(&form.email, &form.password).await?;
    Ok((
        AppendHeaders([(header::SET_COOKIE, auth::session_cookie(&token))]),
        Redirect::to("/"),
    )
        .into_response())
}

/// logout
///
/// GET /logout ends the session and clears the cookie. Idempotent: a request
/// without a live session still redirects home cleanly.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = flash::cookie_value(&headers, auth::SESSION_COOKIE) {
        state.auth.logout(&token).await;
    }
    (
        AppendHeaders([(header::SET_COOKIE, auth::clear_session_cookie())]),
        Redirect::to("/"),
    )
        .into_response()
}

/// show_post
///
/// GET /post/{id} renders the post with its comments, or 404.
pub async fn show_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    viewer: CurrentUser,
    Flash(notice): Flash,
) -> Result<Response, AppError> {
    let post = state.posts.get(post_id).await?;
    let comments = state.posts.comments(post_id).await?;
    let html = state.views.render(
        Page::Post {
            post: &post,
            comments: &comments,
        },
        &viewer,
        notice.as_deref(),
    );
    Ok(flash::rendered(html, notice.is_some()))
}

/// add_comment
///
/// POST /post/{id} attaches a comment for the logged-in viewer. An anonymous
/// submission creates nothing and is sent to /login with a notice; the post
/// id is still resolved first so a missing post stays a 404.
pub async fn add_comment(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    viewer: CurrentUser,
    Form(form): Form<CommentForm>,
) -> Result<Response, AppError> {
    let post = state.posts.get(post_id).await?;
    if viewer.user().is_none() {
        return Err(AppError::RequiresLogin);
    }
    state.posts.add_comment(post.id, &form.text, &viewer).await?;
    Ok(Redirect::to(&format!("/post/{}", post.id)).into_response())
}

/// new_post_page
///
/// GET /new-post renders the empty compose form. The admin guard has already
/// run by the time this handler executes.
pub async fn new_post_page(
    State(state): State<AppState>,
    viewer: CurrentUser,
    Flash(notice): Flash,
) -> Response {
    let html = state.views.render(
        Page::ComposePost { existing: None },
        &viewer,
        notice.as_deref(),
    );
    flash::rendered(html, notice.is_some())
}

/// create_post
///
/// POST /new-post stores the post, stamped with today's date and the
/// authenticated author.
pub async fn create_post(
    State(state): State<AppState>,
    viewer: CurrentUser,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    let author = viewer.user().ok_or(AppError::Forbidden)?;
    state.posts.create(form, author).await?;
    Ok(Redirect::to("/").into_response())
}

/// edit_post_page
///
/// GET /edit-post/{id} renders the compose form pre-filled with the existing
/// values, or 404.
pub async fn edit_post_page(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    viewer: CurrentUser,
    Flash(notice): Flash,
) -> Result<Response, AppError> {
    let post = state.posts.get(post_id).await?;
    let html = state.views.render(
        Page::ComposePost {
            existing: Some(&post),
        },
        &viewer,
        notice.as_deref(),
    );
    Ok(flash::rendered(html, notice.is_some()))
}

/// update_post
///
/// POST /edit-post/{id} overwrites the post's mutable fields and
/// reattributes it to the editor, then redirects to the post page.
pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    viewer: CurrentUser,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    let editor = viewer.user().ok_or(AppError::Forbidden)?;
    let post = state.posts.update(post_id, form, editor).await?;
    Ok(Redirect::to(&format!("/post/{}", post.id)).into_response())
}

/// delete_post
///
/// GET /delete/{id} removes the post and its comments, then redirects home.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Response, AppError> {
    state.posts.delete(post_id).await?;
    Ok(Redirect::to("/").into_response())
}

/// about
pub async fn about(
    State(state): State<AppState>,
    viewer: CurrentUser,
    Flash(notice): Flash,
) -> Response {
    let html = state.views.render(Page::About, &viewer, notice.as_deref());
    flash::rendered(html, notice.is_some())
}

/// contact
pub async fn contact(
    State(state): State<AppState>,
    viewer: CurrentUser,
    Flash(notice): Flash,
) -> Response {
    let html = state.views.render(Page::Contact, &viewer, notice.as_deref());
    flash::rendered(html, notice.is_some())
}
