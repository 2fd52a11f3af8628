use crate::document::Document;
use crate::error::{FinancialDocumentError, Result};
use crate::llm::QaGateway;
use crate::pipeline::{DocumentPipeline, ExtractionResult};
use chrono::{DateTime, Utc};
use log::{info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Preset questions offered next to the free-text input.
pub const QUICK_QUESTIONS: &[&str] = &[
    "What was the total revenue?",
    "What were the main expenses?",
    "What was the net profit?",
    "What are the total assets?",
    "Show me the key financial ratios",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

/// The derived data and chat log for one uploaded document.
#[derive(Debug, Clone, Default)]
pub struct ExtractionSession {
    result: Option<ExtractionResult>,
    history: Vec<ChatTurn>,
}

impl ExtractionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes `document` and makes it the session's document, starting a
    /// fresh chat log. On failure the session is left as it was.
    pub fn load(
        &mut self,
        pipeline: &DocumentPipeline,
        document: Document,
    ) -> Result<&ExtractionResult> {
        let result = pipeline.process(document)?;

        if self.result.is_some() {
            info!(
                "Replacing session document, discarding {} chat turns",
                self.history.len()
            );
        }
        self.history.clear();

        Ok(&*self.result.insert(result))
    }

    /// Asks a question about the loaded document. Only answered questions
    /// are recorded.
    pub fn ask(&mut self, gateway: &dyn QaGateway, question: &str) -> Result<&ChatTurn> {
        let result = self
            .result
            .as_ref()
            .ok_or(FinancialDocumentError::NoDocumentLoaded)?;

        let answer = gateway.ask(question, &result.raw_text).map_err(|e| {
            warn!("Question failed: {}", e);
            e
        })?;

        self.history.push(ChatTurn {
            question: question.to_string(),
            answer,
            asked_at: Utc::now(),
        });

        Ok(&self.history[self.history.len() - 1])
    }

    pub fn result(&self) -> Option<&ExtractionResult> {
        self.result.as_ref()
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.result = None;
        self.history.clear();
    }
}
