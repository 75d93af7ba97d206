use super::ExtractionError;

/// Default upload limit: 10 MB.
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Check an upload before any extraction work is done.
///
/// Detection uses magic bytes, never the client-supplied file name or
/// content type.
pub fn check_document(bytes: &[u8], limit_bytes: usize) -> Result<(), ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::EmptyUpload);
    }
    if bytes.len() > limit_bytes {
        return Err(ExtractionError::TooLarge {
            size_bytes: bytes.len(),
            limit_bytes,
        });
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ExtractionError::NotAPdf);
    }
    Ok(())
}

/// Size in megabytes with one decimal, for user-facing messages.
pub fn megabytes(bytes: usize) -> String {
    format!("{:.1}", bytes as f64 / (1024.0 * 1024.0))
}
