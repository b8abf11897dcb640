//! The three user-facing generation actions.
//!
//! Flow: resolve user → active résumé → extract text → validate job fields →
//!       pipeline::generate → persist one application row → return text.
//!
//! Every action is independent; repeating one with identical inputs inserts a
//! new application row rather than updating an existing one.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::TextExtractor;
use crate::generation::pipeline::{self, RetryPolicy, TokioSleeper};
use crate::generation::prompts;
use crate::llm_client::TextGenerator;
use crate::store::applications::{save_application, validate_job_fields};
use crate::store::cache::RequestCache;
use crate::store::users::get_or_create_user;

// ────────────────────────────────────────────────────────────────────────────
// Action kinds
// ────────────────────────────────────────────────────────────────────────────

/// One of the three supported actions. Each is bound to one prompt template
/// and one generated-text column on the application row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    ResumeReview,
    CoverLetter,
    NetworkingEmail,
}

/// Holder for the three optional generated-text columns; `ActionKind::stamp`
/// fills exactly one.
#[derive(Debug, Default)]
pub struct GeneratedFields {
    pub resume_review: Option<String>,
    pub cover_letter: Option<String>,
    pub networking_email: Option<String>,
}

impl ActionKind {
    pub fn template(&self) -> &'static str {
        match self {
            ActionKind::ResumeReview => prompts::RESUME_REVIEW_TEMPLATE,
            ActionKind::CoverLetter => prompts::COVER_LETTER_TEMPLATE,
            ActionKind::NetworkingEmail => prompts::NETWORKING_EMAIL_TEMPLATE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::ResumeReview => "resume_review",
            ActionKind::CoverLetter => "cover_letter",
            ActionKind::NetworkingEmail => "networking_email",
        }
    }

    /// Places `content` into the one column this action owns.
    pub fn stamp(&self, content: String) -> GeneratedFields {
        let mut fields = GeneratedFields::default();
        match self {
            ActionKind::ResumeReview => fields.resume_review = Some(content),
            ActionKind::CoverLetter => fields.cover_letter = Some(content),
            ActionKind::NetworkingEmail => fields.networking_email = Some(content),
        }
        fields
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestration
// ────────────────────────────────────────────────────────────────────────────

/// Input for any generation action.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    pub email: String,
    pub company_name: String,
    pub role: String,
    pub job_description: String,
}

/// Result of a successful action: the persisted row id plus the text shown
/// to the user.
#[derive(Debug)]
pub struct ActionOutcome {
    pub application_id: Uuid,
    pub action: &'static str,
    pub status: String,
    pub content: String,
}

/// Runs one generation action end to end. On any failure nothing is
/// persisted; prior state is untouched and the user may retry.
pub async fn run_action(
    pool: &PgPool,
    llm: &dyn TextGenerator,
    extractor: Arc<dyn TextExtractor>,
    kind: ActionKind,
    request: ActionRequest,
) -> Result<ActionOutcome, AppError> {
    let user = get_or_create_user(pool, request.email.trim()).await?;
    let mut cache = RequestCache::new();

    let resume = cache
        .active_resume(pool, &user.email)
        .await?
        .ok_or_else(|| {
            AppError::Validation(
                "No active resume on file. Please upload your resume first.".to_string(),
            )
        })?;

    // pdf parsing is CPU-bound; keep it off the async workers
    let text = {
        let extractor = extractor.clone();
        let bytes = resume.content.clone();
        tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?
    };

    // An unreadable resume is treated the same as a missing one.
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not read any text from the uploaded resume. Please upload a readable PDF."
                .to_string(),
        ));
    }

    validate_job_fields(&request.company_name, &request.role, &request.job_description)?;

    info!(
        "Running {} for {} ({} / {})",
        kind.name(),
        user.email,
        request.company_name,
        request.role
    );

    let fields = [
        ("text", text.as_str()),
        ("jd", request.job_description.as_str()),
        ("company_name", request.company_name.as_str()),
        ("role", request.role.as_str()),
    ];

    let generated = pipeline::generate(
        llm,
        kind.template(),
        &fields,
        &RetryPolicy::default(),
        &TokioSleeper,
    )
    .await?;

    let stamped = kind.stamp(generated.clone());
    let row = save_application(
        pool,
        &user.email,
        &request.company_name,
        &request.role,
        &request.job_description,
        stamped.resume_review.as_deref(),
        stamped.cover_letter.as_deref(),
        stamped.networking_email.as_deref(),
    )
    .await?;
    cache.invalidate(&user.email);

    info!(
        "Saved application {} ({}) for {}",
        row.id,
        kind.name(),
        user.email
    );

    Ok(ActionOutcome {
        application_id: row.id,
        action: kind.name(),
        status: row.status,
        content: generated,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::pipeline::render_template;

    #[test]
    fn test_each_action_stamps_exactly_one_field() {
        for kind in [
            ActionKind::ResumeReview,
            ActionKind::CoverLetter,
            ActionKind::NetworkingEmail,
        ] {
            let stamped = kind.stamp("output".to_string());
            let populated = [
                stamped.resume_review.is_some(),
                stamped.cover_letter.is_some(),
                stamped.networking_email.is_some(),
            ]
            .iter()
            .filter(|present| **present)
            .count();
            assert_eq!(populated, 1, "{} must fill exactly one column", kind.name());
        }
    }

    #[test]
    fn test_stamp_targets_the_matching_field() {
        assert!(ActionKind::ResumeReview
            .stamp("r".to_string())
            .resume_review
            .is_some());
        assert!(ActionKind::CoverLetter
            .stamp("c".to_string())
            .cover_letter
            .is_some());
        assert!(ActionKind::NetworkingEmail
            .stamp("n".to_string())
            .networking_email
            .is_some());
    }

    #[test]
    fn test_every_template_renders_with_the_action_field_set() {
        // The orchestrator always supplies all four fields; each template may
        // reference any subset of them.
        let fields = [
            ("text", "résumé body"),
            ("jd", "job description"),
            ("company_name", "Acme"),
            ("role", "Engineer"),
        ];
        for kind in [
            ActionKind::ResumeReview,
            ActionKind::CoverLetter,
            ActionKind::NetworkingEmail,
        ] {
            assert!(
                render_template(kind.template(), &fields).is_ok(),
                "{} template must render from the standard field set",
                kind.name()
            );
        }
    }

    #[test]
    fn test_action_names_match_result_columns() {
        assert_eq!(ActionKind::ResumeReview.name(), "resume_review");
        assert_eq!(ActionKind::CoverLetter.name(), "cover_letter");
        assert_eq!(ActionKind::NetworkingEmail.name(), "networking_email");
    }
}
