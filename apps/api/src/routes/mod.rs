pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::dispatch::handlers;
use crate::errors::AppError;
use crate::pages;
use crate::state::AppState;

async fn not_found() -> Result<(), AppError> {
    Err(AppError::NotFound("no such page or endpoint".into()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // App shell
        .route("/", get(pages::chat_page))
        .route("/recruit", get(pages::recruit_page))
        .route("/health", get(health::health_handler))
        // Consultation API
        .route("/api/v1/roles", get(handlers::handle_list_roles))
        .route("/api/v1/consult", post(handlers::handle_consult))
        .fallback(not_found)
        .with_state(state)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
