//! Axum route handlers for the three generation actions.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::actions::{run_action, ActionKind, ActionRequest};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateActionRequest {
    pub email: String,
    pub company_name: String,
    pub role: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateActionResponse {
    pub application_id: Uuid,
    pub action: &'static str,
    pub status: String,
    pub content: String,
}

/// POST /api/v1/applications/resume-review
pub async fn handle_resume_review(
    State(state): State<AppState>,
    Json(request): Json<GenerateActionRequest>,
) -> Result<Json<GenerateActionResponse>, AppError> {
    run(state, ActionKind::ResumeReview, request).await
}

/// POST /api/v1/applications/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<GenerateActionRequest>,
) -> Result<Json<GenerateActionResponse>, AppError> {
    run(state, ActionKind::CoverLetter, request).await
}

/// POST /api/v1/applications/networking-email
pub async fn handle_networking_email(
    State(state): State<AppState>,
    Json(request): Json<GenerateActionRequest>,
) -> Result<Json<GenerateActionResponse>, AppError> {
    run(state, ActionKind::NetworkingEmail, request).await
}

async fn run(
    state: AppState,
    kind: ActionKind,
    request: GenerateActionRequest,
) -> Result<Json<GenerateActionResponse>, AppError> {
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("'email' is required".to_string()));
    }

    let outcome = run_action(
        &state.db,
        state.llm.as_ref(),
        state.extractor.clone(),
        kind,
        ActionRequest {
            email: request.email,
            company_name: request.company_name,
            role: request.role,
            job_description: request.job_description,
        },
    )
    .await?;

    Ok(Json(GenerateActionResponse {
        application_id: outcome.application_id,
        action: outcome.action,
        status: outcome.status,
        content: outcome.content,
    }))
}
