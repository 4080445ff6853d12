use axum::{
    Router,
    extract::{FromRef, Request},
    http::{HeaderName, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod views;

// Module for routing segregation (Public, Admin).
pub mod routes;
use auth::{AuthService, CurrentUser};
use routes::{admin, public};
use service::PostService;

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry
// point (main.rs) and the integration tests.
pub use config::AppConfig;
pub use repository::{RepositoryState, SqliteRepository};
pub use views::{HtmlPages, ViewState};

/// AppState
///
/// The single, thread-safe, immutable container holding all application
/// services and configuration, shared across all incoming requests. This
/// replaces any process-wide singleton: everything a handler touches arrives
/// through here.
#[derive(Clone)]
pub struct AppState {
    /// Repository Layer: Abstracts database access via the SqlitePool.
    pub repo: RepositoryState,
    /// Authentication Service: session lifecycle and principal resolution.
    pub auth: AuthService,
    /// Post/Comment Service: CRUD with server-side stamping.
    pub posts: PostService,
    /// View Layer: the template-rendering collaborator.
    pub views: ViewState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Assembles the full service graph over one repository handle.
    pub fn new(repo: RepositoryState, views: ViewState, config: AppConfig) -> Self {
        Self {
            auth: AuthService::new(repo.clone()),
            posts: PostService::new(repo.clone()),
            repo,
            views,
            config,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

// These implementations allow extractors to selectively pull components from
// the shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(app_state: &AppState) -> AuthService {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for PostService {
    fn from_ref(app_state: &AppState) -> PostService {
        app_state.posts.clone()
    }
}

impl FromRef<AppState> for ViewState {
    fn from_ref(app_state: &AppState) -> ViewState {
        app_state.views.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// require_admin
///
/// The authorization guard for the admin route group. Resolves the current
/// user and short-circuits with 403 Forbidden before the handler runs unless
/// the principal carries the Admin role. Authentication state makes no
/// difference to the status: members and anonymous visitors both get 403.
async fn require_admin(viewer: CurrentUser, request: Request, next: Next) -> Response {
    if viewer.is_admin() {
        next.run(request).await
    } else {
        StatusCode::FORBIDDEN.into_response()
    }
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and
/// scoped middleware, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 1. Base Router Assembly
    let base_router = Router::new()
        // Public Routes: No middleware applied.
        .merge(public::public_routes())
        // Admin Routes: the guard layer runs before every handler in the
        // group, so the role check cannot be forgotten on a new route.
        .merge(
            admin::admin_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
        )
        // Apply the Unified State to all routes.
        .with_state(state);

    // 2. Observability and Correlation Layers (Applied outermost/first)
    base_router.layer(
        ServiceBuilder::new()
            // 2a. Request ID Generation: a unique UUID for every request.
            .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
            // 2b. Request Tracing: wraps the request/response lifecycle in a
            // tracing span carrying the generated request ID.
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(trace_span_logger)
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(tower_http::LatencyUnit::Millis),
                    ),
            )
            // 2c. Request ID Propagation: returns the x-request-id header to
            // the client.
            .layer(PropagateRequestIdLayer::new(x_request_id)),
    )
}

/// trace_span_logger
///
/// Helper used by `TraceLayer` to customize span creation. It extracts the
/// `x-request-id` header (if present) and includes it in the structured
/// logging metadata alongside the HTTP method and URI, so every log line for
/// a single request is correlated by a unique ID.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
