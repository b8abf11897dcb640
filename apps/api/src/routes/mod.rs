pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::account::handlers as account_handlers;
use crate::generation::handlers as generation_handlers;
use crate::state::AppState;

/// Uploaded résumés are small PDFs; 10 MiB leaves generous headroom over
/// axum's 2 MiB default without letting arbitrary blobs through.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Account: sign-in, résumé management, history
        .route("/api/v1/auth/login", post(account_handlers::handle_login))
        .route(
            "/api/v1/resumes",
            post(account_handlers::handle_upload_resume),
        )
        .route(
            "/api/v1/resumes/active",
            get(account_handlers::handle_get_active_resume),
        )
        .route(
            "/api/v1/dashboard",
            get(account_handlers::handle_dashboard),
        )
        .route(
            "/api/v1/applications",
            get(account_handlers::handle_list_applications),
        )
        // Generation actions
        .route(
            "/api/v1/applications/resume-review",
            post(generation_handlers::handle_resume_review),
        )
        .route(
            "/api/v1/applications/cover-letter",
            post(generation_handlers::handle_cover_letter),
        )
        .route(
            "/api/v1/applications/networking-email",
            post(generation_handlers::handle_networking_email),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
