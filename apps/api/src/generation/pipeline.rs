//! Generation pipeline: fill a prompt template, call the generation backend
//! with bounded retries, hand back the text verbatim.
//!
//! A template/field mismatch is a wiring bug and fails fast with no retry.
//! A failed or empty generation call is assumed transient and retried with
//! exponential backoff. Sleeping goes through the `Sleeper` trait so tests
//! can run the loop without real delays.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::{LlmError, TextGenerator};

// ────────────────────────────────────────────────────────────────────────────
// Template rendering
// ────────────────────────────────────────────────────────────────────────────

/// Collects the distinct `{name}` placeholders a template references.
/// Only lowercase/underscore names count; stray braces in prose are ignored.
fn referenced_placeholders(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    let bytes = template.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'{' {
            if let Some(end) = template[i + 1..].find('}') {
                let name = &template[i + 1..i + 1 + end];
                if !name.is_empty()
                    && name.chars().all(|c| c.is_ascii_lowercase() || c == '_')
                {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                    i += end + 2;
                    continue;
                }
            }
        }
        i += 1;
    }
    names
}

/// Substitutes every placeholder the template references with the matching
/// field value. Extra fields are ignored; a referenced placeholder with no
/// field is a `Configuration` error.
pub fn render_template(template: &str, fields: &[(&str, &str)]) -> Result<String, AppError> {
    let mut rendered = template.to_string();
    for name in referenced_placeholders(template) {
        let value = fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                AppError::Configuration(format!(
                    "prompt template references '{{{name}}}' but no such field was supplied"
                ))
            })?;
        rendered = rendered.replace(&format!("{{{name}}}"), value);
    }
    Ok(rendered)
}

// ────────────────────────────────────────────────────────────────────────────
// Retry policy
// ────────────────────────────────────────────────────────────────────────────

/// Bounded-retry settings for generation calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent one.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Suspension point for backoff waits, injectable so tests run instantly.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

/// Production sleeper: a plain tokio sleep.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generation with retry
// ────────────────────────────────────────────────────────────────────────────

/// Renders `template` with `fields` and calls the generation backend until it
/// produces non-empty output or `policy.max_attempts` is exhausted.
/// Successful output is returned verbatim, with no post-processing.
pub async fn generate(
    client: &dyn TextGenerator,
    template: &str,
    fields: &[(&str, &str)],
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
) -> Result<String, AppError> {
    let prompt = render_template(template, fields)?;

    let mut last_error: Option<LlmError> = None;

    for attempt in 0..policy.max_attempts {
        if attempt > 0 {
            // Exponential backoff: base, 2*base, 4*base, ...
            let delay = policy.base_delay * (1 << (attempt - 1));
            warn!(
                "generation attempt {} failed, retrying after {}ms",
                attempt,
                delay.as_millis()
            );
            sleeper.sleep(delay).await;
        }

        match client.complete(&prompt).await {
            Ok(text) if text.trim().is_empty() => {
                warn!("generation backend returned empty output");
                last_error = Some(LlmError::EmptyContent);
            }
            Ok(text) => return Ok(text),
            Err(e) => {
                warn!("generation call failed: {e}");
                last_error = Some(e);
            }
        }
    }

    Err(AppError::Generation(format!(
        "text generation failed after {} attempts: {}",
        policy.max_attempts,
        last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempts were made".to_string())
    )))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Returns scripted results in order; counts every call.
    struct ScriptedGenerator {
        results: Mutex<VecDeque<Result<String, LlmError>>>,
        calls: AtomicU32,
    }

    impl ScriptedGenerator {
        fn new(results: Vec<Result<String, LlmError>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                calls: AtomicU32::new(0),
            }
        }

        fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }

    /// Records requested delays instead of waiting.
    struct RecordingSleeper {
        delays: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        fn new() -> Self {
            Self {
                delays: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, delay: Duration) {
            self.delays.lock().unwrap().push(delay);
        }
    }

    fn api_error() -> LlmError {
        LlmError::Api {
            status: 529,
            message: "overloaded".to_string(),
        }
    }

    const TEMPLATE: &str = "Resume: {text}\nJob Description: {jd}";

    #[test]
    fn test_render_substitutes_every_occurrence() {
        let rendered = render_template(
            "{role} at {company_name}: apply for {role}",
            &[("company_name", "Acme"), ("role", "Engineer")],
        )
        .unwrap();
        assert_eq!(rendered, "Engineer at Acme: apply for Engineer");
    }

    #[test]
    fn test_render_ignores_extra_fields() {
        let rendered = render_template(
            TEMPLATE,
            &[
                ("text", "résumé body"),
                ("jd", "job desc"),
                ("company_name", "unused"),
            ],
        )
        .unwrap();
        assert_eq!(rendered, "Resume: résumé body\nJob Description: job desc");
    }

    #[test]
    fn test_render_missing_placeholder_is_configuration_error() {
        let result = render_template(TEMPLATE, &[("text", "résumé body")]);
        match result {
            Err(AppError::Configuration(msg)) => assert!(msg.contains("{jd}")),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_render_ignores_prose_braces() {
        // "{curly prose}" has a space, so it is prose, not a placeholder
        let rendered =
            render_template("Keep {curly prose} but fill {text}", &[("text", "x")]).unwrap();
        assert_eq!(rendered, "Keep {curly prose} but fill x");
    }

    #[tokio::test]
    async fn test_first_success_returns_output_verbatim() {
        let client = ScriptedGenerator::new(vec![Ok("  generated text  ".to_string())]);
        let sleeper = RecordingSleeper::new();

        let output = generate(
            &client,
            TEMPLATE,
            &[("text", "résumé body"), ("jd", "job desc")],
            &RetryPolicy::default(),
            &sleeper,
        )
        .await
        .unwrap();

        assert_eq!(output, "  generated text  ");
        assert_eq!(client.call_count(), 1);
        assert!(sleeper.delays.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_two_failures_then_success_makes_three_calls() {
        let client = ScriptedGenerator::new(vec![
            Err(api_error()),
            Err(api_error()),
            Ok("third time lucky".to_string()),
        ]);
        let sleeper = RecordingSleeper::new();

        let output = generate(
            &client,
            TEMPLATE,
            &[("text", "résumé body"), ("jd", "job desc")],
            &RetryPolicy::default(),
            &sleeper,
        )
        .await
        .unwrap();

        assert_eq!(output, "third time lucky");
        assert_eq!(client.call_count(), 3);
        assert_eq!(
            *sleeper.delays.lock().unwrap(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[tokio::test]
    async fn test_persistent_failure_stops_after_max_attempts() {
        let client =
            ScriptedGenerator::new(vec![Err(api_error()), Err(api_error()), Err(api_error())]);
        let sleeper = RecordingSleeper::new();

        let result = generate(
            &client,
            TEMPLATE,
            &[("text", "résumé body"), ("jd", "job desc")],
            &RetryPolicy::default(),
            &sleeper,
        )
        .await;

        assert!(matches!(result, Err(AppError::Generation(_))));
        assert_eq!(client.call_count(), 3);
    }

    #[tokio::test]
    async fn test_empty_output_counts_as_a_failed_attempt() {
        let client = ScriptedGenerator::new(vec![
            Ok("   ".to_string()),
            Ok("real output".to_string()),
        ]);
        let sleeper = RecordingSleeper::new();

        let output = generate(
            &client,
            TEMPLATE,
            &[("text", "résumé body"), ("jd", "job desc")],
            &RetryPolicy::default(),
            &sleeper,
        )
        .await
        .unwrap();

        assert_eq!(output, "real output");
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_field_makes_zero_calls() {
        let client = ScriptedGenerator::new(vec![Ok("should not be reached".to_string())]);
        let sleeper = RecordingSleeper::new();

        let result = generate(
            &client,
            TEMPLATE,
            &[("text", "résumé body")],
            &RetryPolicy::default(),
            &sleeper,
        )
        .await;

        assert!(matches!(result, Err(AppError::Configuration(_))));
        assert_eq!(client.call_count(), 0);
    }
}
