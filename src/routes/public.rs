use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Defines the endpoints reachable without any session: the post index and
/// detail views, the account flows, and the static pages. Comment submission
/// is also mounted here; its handler redirects anonymous visitors to /login
/// instead of rejecting them, which is the friendlier behavior for a form
/// site.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load
        // balancer checks.
        .route("/health", get(|| async { "ok" }))
        // GET /
        // The index: every post, newest last.
        .route("/", get(handlers::index))
        // GET/POST /register
        // Signup form and account creation with auto-login.
        .route(
            "/register",
            get(handlers::register_page).post(handlers::register),
        )
        // GET/POST /login
        // Login form and authentication. Failed attempts come back here with
        // a one-shot notice.
        .route("/login", get(handlers::login_page).post(handlers::login))
        // GET /logout
        // Ends the session (idempotent) and redirects home.
        .route("/logout", get(handlers::logout))
        // GET/POST /post/{id}
        // Post detail with comments; POST attaches a comment for logged-in
        // viewers and bounces anonymous ones to /login.
        .route(
            "/post/{id}",
            get(handlers::show_post).post(handlers::add_comment),
        )
        // Static informational views.
        .route("/about", get(handlers::about))
        .route("/contact", get(handlers::contact))
}
