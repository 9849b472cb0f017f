//! Axum route handlers for the consultation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::dispatch::prompts::BLANK_INPUT_WARNING;
use crate::dispatch::Role;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ConsultRequest {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ConsultResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct RoleInfo {
    pub id: Role,
    pub label: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/roles
///
/// The closed role vocabulary, so the form and API clients share one list.
pub async fn handle_list_roles() -> Json<Vec<RoleInfo>> {
    Json(
        Role::ALL
            .iter()
            .map(|role| RoleInfo {
                id: *role,
                label: role.label(),
            })
            .collect(),
    )
}

/// POST /api/v1/consult
///
/// Blank or whitespace-only text never reaches the dispatcher: it is
/// rejected here with the same warning the form shows inline.
pub async fn handle_consult(
    State(state): State<AppState>,
    Json(request): Json<ConsultRequest>,
) -> Result<Json<ConsultResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation(BLANK_INPUT_WARNING.to_string()));
    }

    let reply = state
        .dispatcher
        .dispatch(request.role, &request.text)
        .await
        .map_err(|e| AppError::Llm(format!("Consultation call failed: {e}")))?;

    Ok(Json(ConsultResponse { reply }))
}
