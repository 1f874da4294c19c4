//! API Routes
//!
//! Configures the Axum router with all student store endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_toggle_handler, delete_student_handler, enrollment_me_handler,
    get_enrolled_student_handler, get_student_handler, health_handler, put_student_handler,
    rename_me_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/students", put(put_student_handler))
        .route(
            "/students/:email",
            get(get_student_handler).delete(delete_student_handler),
        )
        .route("/students/:email/enrolled", get(get_enrolled_student_handler))
        .route("/me/name", put(rename_me_handler))
        .route("/me/enrollment", put(enrollment_me_handler))
        .route("/stats", get(stats_handler))
        .route("/admin/cache", put(cache_toggle_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
