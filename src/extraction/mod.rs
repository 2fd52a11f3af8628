pub mod pdf;
pub mod spreadsheet;

pub use pdf::PdfExtractor;
pub use spreadsheet::{CellValue, SheetTable, SpreadsheetExtractor};

use crate::document::{Document, DocumentFormat};
use crate::error::Result;

/// Text pulled out of a document, plus the sheet tables for workbooks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedContent {
    pub text: String,
    pub sheets: Option<Vec<SheetTable>>,
}

/// Converts one document format into the canonical text representation.
///
/// Implementations never truncate the text.
pub trait TextExtractor {
    fn format(&self) -> DocumentFormat;

    fn extract(&self, bytes: &[u8]) -> Result<ExtractedContent>;
}

pub fn extractor_for(format: DocumentFormat) -> &'static dyn TextExtractor {
    match format {
        DocumentFormat::Pdf => &PdfExtractor,
        DocumentFormat::Spreadsheet => &SpreadsheetExtractor,
    }
}

pub fn extract_content(document: &Document) -> Result<ExtractedContent> {
    extractor_for(document.format()).extract(document.bytes())
}

pub fn extract_text(document: &Document) -> Result<String> {
    extract_content(document).map(|content| content.text)
}
