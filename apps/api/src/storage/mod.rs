//! Document Fetcher — downloads the resume PDF from object storage.
//!
//! The bucket object is public, so this is a plain unauthenticated GET.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage returned status {status}")]
    Status { status: u16 },
}

/// Raw bytes of a downloaded document. Lives for a single request.
#[derive(Debug, Clone)]
pub struct RemoteDocument(Bytes);

impl RemoteDocument {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Source of the resume document.
///
/// Carried in `AppState` as `Arc<dyn DocumentFetcher>`.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self) -> Result<RemoteDocument, FetchError>;
}

/// Fetches a fixed URL over HTTP.
#[derive(Clone)]
pub struct HttpDocumentFetcher {
    client: Client,
    url: String,
}

impl HttpDocumentFetcher {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    async fn fetch(&self) -> Result<RemoteDocument, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!("Downloaded {} bytes from {}", body.len(), self.url);

        Ok(RemoteDocument::new(body))
    }
}
