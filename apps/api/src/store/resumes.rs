use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;

/// Rejects an empty upload before any row is touched.
pub fn validate_upload(content: &[u8]) -> Result<(), AppError> {
    if content.is_empty() {
        return Err(AppError::Validation(
            "Uploaded file is empty".to_string(),
        ));
    }
    Ok(())
}

/// Stores a newly uploaded résumé as the active one for `email`.
///
/// Replacement is append-only: prior rows are deactivated and a fresh active
/// row is inserted. Both statements share one transaction; a partial apply
/// would leave zero or two active résumés for the user.
pub async fn save_resume(
    pool: &PgPool,
    email: &str,
    content: &[u8],
    file_name: &str,
) -> Result<ResumeRow, AppError> {
    validate_upload(content)?;

    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE resumes SET is_active = FALSE WHERE user_email = $1 AND is_active")
        .bind(email)
        .execute(&mut *tx)
        .await?;

    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, user_email, file_name, content, is_active)
        VALUES ($1, $2, $3, $4, TRUE)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(file_name)
    .bind(content)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        "Stored resume '{}' for {} ({} bytes)",
        file_name,
        email,
        content.len()
    );

    Ok(row)
}

/// Returns the single row with `is_active = TRUE` for `email`, or none.
pub async fn get_active_resume(pool: &PgPool, email: &str) -> Result<Option<ResumeRow>, AppError> {
    Ok(sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_email = $1 AND is_active LIMIT 1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_upload_is_rejected() {
        let result = validate_upload(&[]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_nonempty_upload_passes() {
        assert!(validate_upload(b"%PDF-1.7 ...").is_ok());
    }
}
