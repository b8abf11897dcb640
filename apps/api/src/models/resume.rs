use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_email: String,
    pub file_name: String,
    /// Raw uploaded bytes. Kept out of JSON responses; only the extraction
    /// path reads it.
    #[serde(skip_serializing, default)]
    pub content: Vec<u8>,
    pub upload_date: DateTime<Utc>,
    pub is_active: bool,
}
