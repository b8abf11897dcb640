use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row per generation action. Exactly one of the three generated-text
/// columns is populated at insert; rows are never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub user_email: String,
    pub company_name: String,
    pub role: String,
    pub job_description: String,
    pub status: String,
    pub resume_review: Option<String>,
    pub cover_letter: Option<String>,
    pub networking_email: Option<String>,
    pub created_at: DateTime<Utc>,
}
