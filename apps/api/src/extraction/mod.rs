//! Text Extractor — plain text out of a PDF, page by page.
//!
//! No OCR: image-only pages yield no text.

use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, warn};

use crate::storage::RemoteDocument;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("No text extracted from PDF")]
    Empty,
}

/// Trimmed, non-empty text of a whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[cfg(test)]
    pub(crate) fn from_trusted(text: &str) -> Self {
        Self(text.to_string())
    }
}

/// Produces the text of each page in the document's native order.
pub trait PageExtractor: Send + Sync {
    fn page_texts(&self, document: &RemoteDocument) -> Result<Vec<String>, ExtractionError>;
}

/// `pdf-extract` backed page extractor.
///
/// `pdf-extract` panics on some well-formed PDFs it cannot decode (missing
/// font resources, unsupported encodings); those panics are reported as
/// `ExtractionError::Pdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfPageExtractor;

impl PageExtractor for PdfPageExtractor {
    fn page_texts(&self, document: &RemoteDocument) -> Result<Vec<String>, ExtractionError> {
        let bytes = document.as_bytes();
        match catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        })) {
            Ok(result) => result.map_err(|e| ExtractionError::Pdf(e.to_string())),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!("pdf-extract panicked: {message}");
                Err(ExtractionError::Pdf(format!("parser panicked: {message}")))
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Extracts the full document text and rejects documents with no text at all.
pub fn extract_text(
    extractor: &dyn PageExtractor,
    document: &RemoteDocument,
) -> Result<ExtractedText, ExtractionError> {
    if document.is_empty() {
        return Err(ExtractionError::Pdf("downloaded document is empty".to_string()));
    }

    let pages = extractor.page_texts(document)?;
    debug!("Extracted {} pages from {} bytes", pages.len(), document.len());

    let text = join_pages(&pages);
    if text.is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(ExtractedText(text))
}

/// Each page followed by a newline, then trimmed.
fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page.as_ref());
        text.push('\n');
    }
    text.trim().to_string()
}

/// A structurally valid one-page PDF whose content stream selects `/F1`
/// without declaring any font resources.
#[cfg(test)]
pub(crate) fn pdf_without_font_resources() -> Vec<u8> {
    let content = "BT /F1 12 Tf 72 712 Td (Jane Doe) Tj ET";
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    pdf
}
