use axum::{
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::handlers;
use crate::middleware::session_layer;
use crate::state::AppState;

pub mod health;
pub mod pages;
pub mod paths;

/// API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: true,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: false,
            message: message.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn success_msg(message: impl Into<String>) -> Self {
        Self {
            code: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    // Session store (in-memory)
    let session_store = MemoryStore::default();
    let sessions = SessionManagerLayer::new(session_store)
        .with_secure(state.config.session.secure)
        .with_http_only(state.config.session.http_only);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/config", get(handlers::config::get_config))
        // Auth routes
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/session", get(handlers::auth::current_session))
        // Registration routes
        .route("/organizations", post(handlers::registration::register_organization))
        .route("/users", post(handlers::registration::register_user))
        // Department routes
        .route(
            "/departments",
            get(handlers::department::list_departments).post(handlers::department::add_department),
        )
        // Complaint routes
        .route("/complaints", post(handlers::complaint::submit_complaint))
        .route("/complaints/:case_id", get(handlers::complaint::get_complaint))
        .route("/complaints/:case_id/status", get(handlers::complaint::complaint_status))
        // Notification routes
        .route("/notifications", get(handlers::notification::list_notifications))
        .fallback(fallback);

    Router::new()
        .nest("/api", api_routes)
        .merge(pages::page_router())
        .layer(middleware::from_fn_with_state(state.clone(), session_layer))
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Fallback handler for unknown API paths
pub async fn fallback() -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error("Not Found")))
}
