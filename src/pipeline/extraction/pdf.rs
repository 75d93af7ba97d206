use std::panic::{catch_unwind, AssertUnwindSafe};

use super::types::{ExtractedDocument, PdfExtractor};
use super::ExtractionError;

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers; scanned pages yield no text.
pub struct PdfTextExtractor;

impl PdfExtractor for PdfTextExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
        // pdf-extract panics on some malformed inputs instead of returning an error.
        let page_texts = catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        }))
        .map_err(|_| ExtractionError::PdfParsing("parser aborted on malformed PDF".into()))?
        .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

        let page_count = page_texts.len();
        let text = page_texts
            .iter()
            .map(|page| page.trim())
            .filter(|page| !page.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");

        if text.is_empty() {
            return Err(ExtractionError::NoText);
        }

        tracing::debug!(page_count, chars = text.len(), "PDF text extracted");
        Ok(ExtractedDocument { text, page_count })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Generate a valid PDF with one page per entry using lopdf.
    pub(crate) fn make_test_pdf(pages: &[&str]) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });
        let pages_id = doc.new_object_id();

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn extract_text_from_digital_pdf() {
        let pdf_bytes = make_test_pdf(&["Take ibuprofen twice daily"]);
        let doc = PdfTextExtractor.extract_text(&pdf_bytes).unwrap();

        assert_eq!(doc.page_count, 1);
        assert!(
            doc.text.contains("ibuprofen"),
            "Expected text to contain 'ibuprofen', got: {}",
            doc.text
        );
    }

    #[test]
    fn multiple_pages_are_joined() {
        let pdf_bytes = make_test_pdf(&["Rest at home", "Follow up in two weeks"]);
        let doc = PdfTextExtractor.extract_text(&pdf_bytes).unwrap();

        assert_eq!(doc.page_count, 2);
        assert!(doc.text.contains("Rest"));
        assert!(doc.text.contains("Follow"));
    }

    #[test]
    fn invalid_pdf_returns_error() {
        let result = PdfTextExtractor.extract_text(b"%PDF-1.4 not really a pdf");
        assert!(matches!(result, Err(ExtractionError::PdfParsing(_))));
    }

    #[test]
    fn pdf_without_text_is_rejected() {
        let pdf_bytes = make_test_pdf(&[""]);
        let result = PdfTextExtractor.extract_text(&pdf_bytes);
        assert!(matches!(result, Err(ExtractionError::NoText)));
    }
}
