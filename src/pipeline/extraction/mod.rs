pub mod format;
pub mod pdf;
pub mod types;

pub use format::*;
pub use pdf::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Uploaded document is empty")]
    EmptyUpload,

    #[error("Uploaded document is not a PDF")]
    NotAPdf,

    #[error("Document is {size_bytes} bytes, limit is {limit_bytes} bytes")]
    TooLarge { size_bytes: usize, limit_bytes: usize },

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("PDF contains no extractable text")]
    NoText,
}
