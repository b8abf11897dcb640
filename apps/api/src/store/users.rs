use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::user::UserRow;

/// Looks up a user by email, creating the row on first sign-in.
/// `last_login` is refreshed on every call. One atomic statement, so a
/// concurrent first sign-in cannot produce duplicate users.
pub async fn get_or_create_user(pool: &PgPool, email: &str) -> Result<UserRow, AppError> {
    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (email, last_login)
        VALUES ($1, now())
        ON CONFLICT (email) DO UPDATE SET last_login = now()
        RETURNING *
        "#,
    )
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(user)
}
