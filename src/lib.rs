//! # Financial Document Q&A
//!
//! Turns a single financial document (PDF or spreadsheet) into plain text and
//! a handful of headline metrics, and answers free-text questions about it
//! through a locally hosted Ollama model.
//!
//! ## Core Concepts
//!
//! - **Text extraction**: PDFs are read page by page from their text layer;
//!   workbooks are read sheet by sheet, keeping each sheet as a table too
//! - **Metric patterns**: a declarative table of label synonyms per metric
//!   (revenue, expenses, profit, assets, liabilities, equity)
//! - **First match wins**: each metric takes the earliest figure found after
//!   one of its labels; metrics with no match are absent, never zero
//! - **Degraded values**: a figure that cannot be parsed is kept as text
//! - **Q&A**: the question plus a truncated copy of the text is sent to the
//!   model in one bounded, non-retried request
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_document_qa::*;
//! use std::path::Path;
//!
//! let pipeline = DocumentPipeline::new();
//! let mut session = ExtractionSession::new();
//!
//! let result = session.load(&pipeline, Document::from_path(Path::new("statement.pdf"))?)?;
//! for (name, value) in result.metrics.iter() {
//!     println!("{name}: {value}");
//! }
//!
//! let assistant = DocumentAssistant::new(GatewayConfig::from_env()?)?;
//! let turn = session.ask(&assistant, "What was the total revenue?")?;
//! println!("{}", turn.answer);
//! ```

pub mod document;
pub mod error;
pub mod extraction;
pub mod llm;
pub mod metrics;
pub mod number;
pub mod patterns;
pub mod pipeline;
pub mod session;

pub use document::{Document, DocumentFormat};
pub use error::{FinancialDocumentError, Result};
pub use extraction::{
    extract_text, extractor_for, CellValue, ExtractedContent, PdfExtractor, SheetTable,
    SpreadsheetExtractor, TextExtractor,
};
pub use llm::{build_prompt, GatewayConfig, QaGateway};
#[cfg(feature = "ollama")]
pub use llm::{DocumentAssistant, OllamaClient};
pub use metrics::{extract_metrics, MetricEntry, MetricValue, Metrics};
pub use number::{normalize_number, parse_number};
pub use patterns::{CaptureRule, MetricDefinition, MetricPattern, MetricPatternSet};
pub use pipeline::{DocumentPipeline, DocumentStats, ExtractionResult};
pub use session::{ChatTurn, ExtractionSession, QUICK_QUESTIONS};

/// Processes one document with the standard metric table.
pub fn process_document(document: Document) -> Result<ExtractionResult> {
    DocumentPipeline::new().process(document)
}
