use crate::document::{Document, DocumentFormat};
use crate::error::Result;
use crate::extraction::{extractor_for, SheetTable};
use crate::metrics::Metrics;
use crate::patterns::MetricPatternSet;
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentStats {
    #[schemars(description = "Number of characters in the extracted text")]
    pub characters: usize,

    #[schemars(description = "Number of whitespace-separated words in the extracted text")]
    pub words: usize,
}

impl DocumentStats {
    pub fn from_text(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: text.split_whitespace().count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractionResult {
    #[schemars(description = "Source format of the processed document")]
    pub format: DocumentFormat,

    #[schemars(
        description = "Full extracted text. This is the only document content sent to the language model."
    )]
    pub raw_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Per-sheet tables in workbook order. Present only for spreadsheets.")]
    pub sheets: Option<Vec<SheetTable>>,

    #[schemars(description = "Metrics found in the text, in pattern table order. Missing names were not found.")]
    pub metrics: Metrics,

    pub stats: DocumentStats,
}

impl ExtractionResult {
    /// The first `limit` characters of the extracted text.
    pub fn text_preview(&self, limit: usize) -> &str {
        match self.raw_text.char_indices().nth(limit) {
            Some((idx, _)) => &self.raw_text[..idx],
            None => &self.raw_text,
        }
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ExtractionResult)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// Runs text extraction followed by metric extraction for one document.
#[derive(Debug, Clone)]
pub struct DocumentPipeline {
    patterns: MetricPatternSet,
}

impl Default for DocumentPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentPipeline {
    pub fn new() -> Self {
        Self::with_patterns(MetricPatternSet::standard().clone())
    }

    pub fn with_patterns(patterns: MetricPatternSet) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &MetricPatternSet {
        &self.patterns
    }

    pub fn process(&self, document: Document) -> Result<ExtractionResult> {
        let format = document.format();
        info!(
            "Processing {} document{} ({} bytes)",
            format,
            document
                .name()
                .map(|n| format!(" '{}'", n))
                .unwrap_or_default(),
            document.len()
        );

        let content = extractor_for(format).extract(document.bytes())?;
        let stats = DocumentStats::from_text(&content.text);

        debug!(
            "Extracted {} characters of text{}",
            stats.characters,
            content
                .sheets
                .as_ref()
                .map(|s| format!(" from {} sheets", s.len()))
                .unwrap_or_default()
        );

        let metrics = self.patterns.extract(&content.text);

        info!(
            "Found {} of {} metrics",
            metrics.len(),
            self.patterns.len()
        );

        Ok(ExtractionResult {
            format,
            raw_text: content.text,
            sheets: content.sheets,
            metrics,
            stats,
        })
    }
}
