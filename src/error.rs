use crate::document::DocumentFormat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinancialDocumentError {
    #[error("Could not read {format} document: {source}")]
    DocumentRead {
        format: DocumentFormat,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Unsupported document type: {0}")]
    UnsupportedFormat(String),

    #[error("Inference service is not reachable at {endpoint} ({reason}). Make sure Ollama is running (`ollama serve`)")]
    ServiceUnavailable { endpoint: String, reason: String },

    #[error("Inference service returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid metric pattern '{metric}': {reason}")]
    InvalidPattern { metric: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No document has been processed in this session")]
    NoDocumentLoaded,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl FinancialDocumentError {
    pub(crate) fn document_read<E>(format: DocumentFormat, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::DocumentRead {
            format,
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinancialDocumentError>;
