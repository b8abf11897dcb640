use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::ApplicationRow;

/// Every application row starts (and currently stays) in this status.
pub const STATUS_CREATED: &str = "Created";

/// Company, role, and job description are all required. The error names the
/// first missing field so callers can surface it directly.
pub fn validate_job_fields(
    company_name: &str,
    role: &str,
    job_description: &str,
) -> Result<(), AppError> {
    for (field, value) in [
        ("company_name", company_name),
        ("role", role),
        ("job_description", job_description),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("'{field}' is required")));
        }
    }
    Ok(())
}

/// Inserts one application row. Each generation action creates a new row;
/// repeated actions against the same job are not deduplicated.
#[allow(clippy::too_many_arguments)]
pub async fn save_application(
    pool: &PgPool,
    email: &str,
    company_name: &str,
    role: &str,
    job_description: &str,
    resume_review: Option<&str>,
    cover_letter: Option<&str>,
    networking_email: Option<&str>,
) -> Result<ApplicationRow, AppError> {
    validate_job_fields(company_name, role, job_description)?;

    let row = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications
            (id, user_email, company_name, role, job_description, status,
             resume_review, cover_letter, networking_email)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(company_name)
    .bind(role)
    .bind(job_description)
    .bind(STATUS_CREATED)
    .bind(resume_review)
    .bind(cover_letter)
    .bind(networking_email)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// All applications for a user, newest first.
pub async fn list_applications(pool: &PgPool, email: &str) -> Result<Vec<ApplicationRow>, AppError> {
    Ok(sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE user_email = $1 ORDER BY created_at DESC",
    )
    .bind(email)
    .fetch_all(pool)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_present_passes() {
        assert!(validate_job_fields("Acme", "Platform Engineer", "Build platforms.").is_ok());
    }

    #[test]
    fn test_empty_company_is_rejected_by_name() {
        let err = validate_job_fields("", "Platform Engineer", "Build platforms.").unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("company_name")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_whitespace_role_is_rejected_by_name() {
        let err = validate_job_fields("Acme", "   ", "Build platforms.").unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("role")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_job_description_is_rejected_by_name() {
        let err = validate_job_fields("Acme", "Platform Engineer", "").unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("job_description")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
