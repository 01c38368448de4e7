use crate::resume::pipeline::ResumePipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only; collaborators inside are shared across concurrent requests.
    pub pipeline: ResumePipeline,
}
