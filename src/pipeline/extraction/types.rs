use serde::Serialize;

use super::ExtractionError;

/// Text pulled out of an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedDocument {
    pub text: String,
    pub page_count: usize,
}

/// Turns PDF bytes into plain text. Layout analysis is the implementor's concern.
pub trait PdfExtractor: Send + Sync {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError>;
}
