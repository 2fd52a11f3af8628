use super::{ExtractedContent, TextExtractor};
use crate::document::DocumentFormat;
use crate::error::{FinancialDocumentError, Result};
use log::{debug, warn};
use lopdf::Document as PdfDocument;

/// Page-by-page text extraction from the PDF text layer. Pages without one
/// (scanned images) contribute an empty segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Returns `(page_number, text)` for each page in document order.
    pub fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<(u32, String)>> {
        let pdf = PdfDocument::load_mem(bytes)
            .map_err(|e| FinancialDocumentError::document_read(DocumentFormat::Pdf, e))?;

        if pdf.is_encrypted() {
            return Err(FinancialDocumentError::document_read(
                DocumentFormat::Pdf,
                "document is encrypted",
            ));
        }

        let mut pages = Vec::new();
        for page_number in pdf.get_pages().into_keys() {
            let text = pdf.extract_text(&[page_number]).map_err(|e| {
                FinancialDocumentError::document_read(
                    DocumentFormat::Pdf,
                    format!("page {}: {}", page_number, e),
                )
            })?;

            if text.trim().is_empty() {
                debug!("PDF page {} has no text layer", page_number);
            }
            pages.push((page_number, text));
        }

        Ok(pages)
    }
}

impl TextExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract(&self, bytes: &[u8]) -> Result<ExtractedContent> {
        let pages = self.extract_pages(bytes)?;

        let mut text = String::new();
        for (_, page_text) in &pages {
            text.push_str(page_text);
            text.push('\n');
        }

        if text.trim().is_empty() {
            warn!(
                "No text found in any of the {} PDF pages (no OCR is performed)",
                pages.len()
            );
        }

        Ok(ExtractedContent { text, sheets: None })
    }
}
