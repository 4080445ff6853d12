use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Defines the routes exclusively accessible to the admin account: creating,
/// editing, and deleting posts.
///
/// Access Control:
/// This entire router is wrapped (in `create_router`) by the `require_admin`
/// middleware layer, which resolves the current user and short-circuits with
/// 403 Forbidden before any of these handlers run. Anonymous visitors and
/// member accounts get the same 403.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET/POST /new-post
        // Compose form and submission for a new post. The date and author
        // are stamped server-side.
        .route(
            "/new-post",
            get(handlers::new_post_page).post(handlers::create_post),
        )
        // GET/POST /edit-post/{id}
        // Edit form pre-filled with the stored values; submission overwrites
        // every mutable field and reattributes the post to the editor.
        .route(
            "/edit-post/{id}",
            get(handlers::edit_post_page).post(handlers::update_post),
        )
        // GET /delete/{id}
        // Deletes the post; its comments cascade away with it.
        .route("/delete/{id}", get(handlers::delete_post))
}
