use crate::error::{FinancialDocumentError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[schemars(description = "Portable Document Format file with an embedded text layer")]
    Pdf,

    #[schemars(description = "Excel or OpenDocument workbook with one or more sheets")]
    Spreadsheet,
}

impl DocumentFormat {
    /// Detects the format from a file path using its MIME type, falling back
    /// to the extension for workbook types `mime_guess` does not know.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let essence = mime.essence_str();

        if essence == "application/pdf" {
            return Ok(Self::Pdf);
        }

        if essence.starts_with("application/vnd.ms-excel")
            || essence.starts_with("application/vnd.openxmlformats-officedocument.spreadsheetml")
            || essence == "application/vnd.oasis.opendocument.spreadsheet"
        {
            return Ok(Self::Spreadsheet);
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(Self::Pdf),
            Some(ext) if SPREADSHEET_EXTENSIONS.contains(&ext) => Ok(Self::Spreadsheet),
            _ => Err(FinancialDocumentError::UnsupportedFormat(format!(
                "{} ({})",
                path.display(),
                essence
            ))),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}

/// An uploaded document: raw bytes plus the declared format.
#[derive(Debug, Clone)]
pub struct Document {
    bytes: Vec<u8>,
    format: DocumentFormat,
    name: Option<String>,
}

impl Document {
    pub fn new(bytes: impl Into<Vec<u8>>, format: DocumentFormat) -> Self {
        Self {
            bytes: bytes.into(),
            format,
            name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let format = DocumentFormat::from_path(path)?;
        let bytes =
            std::fs::read(path).map_err(|e| FinancialDocumentError::document_read(format, e))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);

        Ok(Self {
            bytes,
            format,
            name,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
