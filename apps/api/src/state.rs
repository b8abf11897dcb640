use std::sync::Arc;

use sqlx::PgPool;

use crate::extract::TextExtractor;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Text generation backend. Trait object so tests and local runs can
    /// substitute a fake for the hosted model.
    pub llm: Arc<dyn TextGenerator>,
    /// Résumé text extraction. CPU-bound, so callers run it on the blocking
    /// pool; see `generation::actions`.
    pub extractor: Arc<dyn TextExtractor>,
}
