//! Resume parse pipeline.
//!
//! Flow: fetch → extract → build prompt → call LLM → normalize.
//!
//! Strictly sequential, no retries. The first failing stage aborts the run and
//! its error is returned as-is; nothing partial is ever produced.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::ApiKey;
use crate::errors::AppError;
use crate::extraction::{extract_text, ExtractionError, PageExtractor};
use crate::llm_client::GenerativeModel;
use crate::resume::normalize::normalize_response;
use crate::resume::prompts::build_prompt;
use crate::storage::DocumentFetcher;

/// Active pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Extracting,
    Prompting,
    Calling,
    Normalizing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "fetching",
            Stage::Extracting => "extracting",
            Stage::Prompting => "prompting",
            Stage::Calling => "calling",
            Stage::Normalizing => "normalizing",
        };
        f.write_str(name)
    }
}

/// Wires the collaborators together. Cheap to clone; shared read-only across requests.
#[derive(Clone)]
pub struct ResumePipeline {
    api_key: Option<ApiKey>,
    fetcher: Arc<dyn DocumentFetcher>,
    extractor: Arc<dyn PageExtractor>,
    model: Arc<dyn GenerativeModel>,
}

impl ResumePipeline {
    pub fn new(
        api_key: Option<ApiKey>,
        fetcher: Arc<dyn DocumentFetcher>,
        extractor: Arc<dyn PageExtractor>,
        model: Arc<dyn GenerativeModel>,
    ) -> Self {
        Self {
            api_key,
            fetcher,
            extractor,
            model,
        }
    }

    /// Runs the whole pipeline and returns the cleaned resume object.
    pub async fn run(&self) -> Result<Value, AppError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("parse_resume", %request_id);

        async {
            // Checked before any network call.
            let Some(api_key) = self.api_key.as_ref() else {
                warn!("Gemini API key not configured");
                return Err(AppError::Configuration);
            };

            let result = self.run_stages(api_key).await;
            match &result {
                Ok(_) => info!("Resume parsed"),
                Err((stage, _)) => warn!(%stage, "Resume parse aborted"),
            }
            result.map_err(|(_, e)| e)
        }
        .instrument(span)
        .await
    }

    async fn run_stages(&self, api_key: &ApiKey) -> Result<Value, (Stage, AppError)> {
        info!(stage = %Stage::Fetching, "Downloading resume");
        let document = self
            .fetcher
            .fetch()
            .await
            .map_err(|e| (Stage::Fetching, AppError::from(e)))?;

        info!(stage = %Stage::Extracting, bytes = document.len(), "Extracting text");
        // CPU-bound parse — spawn_blocking to avoid blocking the async executor.
        let extractor = Arc::clone(&self.extractor);
        let text = tokio::task::spawn_blocking(move || extract_text(extractor.as_ref(), &document))
            .await
            .unwrap_or_else(|e| Err(ExtractionError::Pdf(format!("extraction task failed: {e}"))))
            .map_err(|e| (Stage::Extracting, AppError::from(e)))?;

        info!(stage = %Stage::Prompting, chars = text.as_str().len(), "Building prompt");
        let prompt = build_prompt(&text);

        info!(stage = %Stage::Calling, "Calling Gemini");
        let envelope = self
            .model
            .generate_content(api_key, &prompt)
            .await
            .map_err(|e| (Stage::Calling, AppError::from(e)))?;

        info!(stage = %Stage::Normalizing, "Normalizing model answer");
        normalize_response(envelope).map_err(|e| (Stage::Normalizing, AppError::from(e)))
    }
}
