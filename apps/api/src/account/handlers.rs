//! Handlers for sign-in, résumé management, and application history.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::ApplicationRow;
use crate::models::resume::ResumeRow;
use crate::models::user::UserRow;
use crate::state::AppState;
use crate::store;
use crate::store::cache::RequestCache;

const DEFAULT_RESUME_NAME: &str = "resume.pdf";

#[derive(Deserialize)]
pub struct OwnerQuery {
    pub email: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Sign-in
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

/// POST /api/v1/auth/login
///
/// Creates the user on first sign-in and refreshes last-login on every one.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserRow>, AppError> {
    let email = request.email.trim();
    if !is_valid_email(email) {
        return Err(AppError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }

    let user = store::users::get_or_create_user(&state.db, email).await?;
    Ok(Json(user))
}

/// A sign-in identifier must at least look like an email. Anything with an
/// `@` passes; the mail system is the real validator.
fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.contains('@')
}

// ────────────────────────────────────────────────────────────────────────────
// Résumé management
// ────────────────────────────────────────────────────────────────────────────

/// Résumé metadata returned to clients. Raw bytes never leave the store
/// except through the extraction path.
#[derive(Debug, Serialize)]
pub struct ResumeMeta {
    pub id: Uuid,
    pub file_name: String,
    pub upload_date: DateTime<Utc>,
    pub is_active: bool,
}

impl From<ResumeRow> for ResumeMeta {
    fn from(row: ResumeRow) -> Self {
        Self {
            id: row.id,
            file_name: row.file_name,
            upload_date: row.upload_date,
            is_active: row.is_active,
        }
    }
}

/// POST /api/v1/resumes?email=
///
/// Multipart upload with a single `file` part holding the PDF bytes.
/// Replaces the user's active résumé (history is kept, deactivated).
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
    mut multipart: Multipart,
) -> Result<Json<ResumeMeta>, AppError> {
    let email = params.email.trim().to_string();
    if !is_valid_email(&email) {
        return Err(AppError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }

    let mut file_name: Option<String> = None;
    let mut content: Option<bytes::Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(str::to_owned);
            content = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?,
            );
        }
    }

    let content = content
        .ok_or_else(|| AppError::Validation("Missing 'file' part in upload".to_string()))?;

    // The user row must exist before the resume FK can point at it.
    store::users::get_or_create_user(&state.db, &email).await?;

    let row = store::resumes::save_resume(
        &state.db,
        &email,
        &content,
        file_name.as_deref().unwrap_or(DEFAULT_RESUME_NAME),
    )
    .await?;

    Ok(Json(ResumeMeta::from(row)))
}

/// GET /api/v1/resumes/active?email=
pub async fn handle_get_active_resume(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<ResumeMeta>, AppError> {
    let resume = store::resumes::get_active_resume(&state.db, &params.email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No active resume for {}", params.email)))?;
    Ok(Json(ResumeMeta::from(resume)))
}

// ────────────────────────────────────────────────────────────────────────────
// Application history
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/applications?email=
///
/// Full rows, newest first, generated text included.
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let applications = store::applications::list_applications(&state.db, &params.email).await?;
    Ok(Json(applications))
}

/// One history entry for the landing view: which generated documents exist,
/// without shipping their full text.
#[derive(Debug, Serialize)]
pub struct ApplicationSummary {
    pub id: Uuid,
    pub company_name: String,
    pub role: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub has_resume_review: bool,
    pub has_cover_letter: bool,
    pub has_networking_email: bool,
}

impl From<&ApplicationRow> for ApplicationSummary {
    fn from(row: &ApplicationRow) -> Self {
        Self {
            id: row.id,
            company_name: row.company_name.clone(),
            role: row.role.clone(),
            status: row.status.clone(),
            created_at: row.created_at,
            has_resume_review: row.resume_review.is_some(),
            has_cover_letter: row.cover_letter.is_some(),
            has_networking_email: row.networking_email.is_some(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub email: String,
    pub active_resume: Option<ResumeMeta>,
    pub applications: Vec<ApplicationSummary>,
}

/// GET /api/v1/dashboard?email=
///
/// One round trip for the landing view: active résumé plus history, loaded
/// through a request-scoped cache.
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let mut cache = RequestCache::new();

    let active_resume = cache
        .active_resume(&state.db, &params.email)
        .await?
        .map(ResumeMeta::from);
    let applications = cache
        .applications(&state.db, &params.email)
        .await?
        .iter()
        .map(ApplicationSummary::from)
        .collect();

    Ok(Json(DashboardResponse {
        email: params.email,
        active_resume,
        applications,
    }))
}
