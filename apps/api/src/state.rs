use std::sync::Arc;

use crate::config::Config;
use crate::content::provider::ContentProvider;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable content source. Default: FileContentProvider over RESUME_PATH.
    pub content: Arc<dyn ContentProvider>,
}
