//! Request-scoped read-through cache over store lookups.
//!
//! Constructed fresh for each request by whoever orchestrates it and dropped
//! when the request ends, so cached reads are never shared across requests or
//! users. Every write path touching a user must call `invalidate` with that
//! user's email before reading again.

use std::collections::HashMap;

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::application::ApplicationRow;
use crate::models::resume::ResumeRow;
use crate::store::{applications, resumes};

#[derive(Default)]
pub struct RequestCache {
    active_resumes: HashMap<String, Option<ResumeRow>>,
    applications: HashMap<String, Vec<ApplicationRow>>,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-through lookup of the active résumé for `email`.
    /// A `None` result is cached too — "no résumé yet" is a valid answer.
    pub async fn active_resume(
        &mut self,
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<ResumeRow>, AppError> {
        if let Some(cached) = self.active_resumes.get(email) {
            return Ok(cached.clone());
        }
        let row = resumes::get_active_resume(pool, email).await?;
        self.active_resumes.insert(email.to_string(), row.clone());
        Ok(row)
    }

    /// Read-through lookup of the application history for `email`.
    pub async fn applications(
        &mut self,
        pool: &PgPool,
        email: &str,
    ) -> Result<Vec<ApplicationRow>, AppError> {
        if let Some(cached) = self.applications.get(email) {
            return Ok(cached.clone());
        }
        let rows = applications::list_applications(pool, email).await?;
        self.applications.insert(email.to_string(), rows.clone());
        Ok(rows)
    }

    /// Drops every cached read for `email`. Call after any write touching
    /// that user.
    pub fn invalidate(&mut self, email: &str) {
        self.active_resumes.remove(email);
        self.applications.remove(email);
    }
}
