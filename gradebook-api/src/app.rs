/// Application state and router builder
///
/// # Example
///
/// ```
/// use gradebook_api::{app::{build_router, AppState}, config::Config};
/// use gradebook_shared::store::memory::MemoryStore;
/// use std::sync::Arc;
///
/// let state = AppState::new(Arc::new(MemoryStore::new()), Config::in_memory());
/// let app = build_router(state);
/// ```

use crate::config::Config;
use crate::routes;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use gradebook_shared::store::Store;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend shared by every handler
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET    /health
/// ├── POST   /register
/// ├── POST   /login
/// ├── POST   /add
/// ├── PUT    /update/:roll
/// ├── GET    /show
/// ├── GET    /search/:roll
/// └── DELETE /delete/:roll
/// ```
pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    let student_routes = Router::new()
        .route("/add", post(routes::students::add_student))
        .route("/update/:roll", put(routes::students::update_student))
        .route("/show", get(routes::students::show_students))
        .route("/search/:roll", get(routes::students::search_student))
        .route("/delete/:roll", delete(routes::students::delete_student));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(auth_routes)
        .merge(student_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
