use super::{ExtractedContent, TextExtractor};
use crate::document::DocumentFormat;
use crate::error::{FinancialDocumentError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Integer(i64),
    Bool(bool),
    #[schemars(description = "Spreadsheet error value such as #DIV/0!")]
    Error(String),
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => Self::Empty,
            Data::String(s) => Self::Text(s.clone()),
            Data::Float(f) => Self::Number(*f),
            Data::Int(i) => Self::Integer(*i),
            Data::Bool(b) => Self::Bool(*b),
            Data::Error(e) => Self::Error(e.to_string()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Error(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SheetTable {
    #[schemars(description = "Sheet name as shown on the workbook tab")]
    pub name: String,

    #[schemars(description = "Cell values in row-major order, starting at the first used cell")]
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn header(&self) -> Option<&[CellValue]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// The first `limit` rows, for sheet previews.
    pub fn preview(&self, limit: usize) -> &[Vec<CellValue>] {
        &self.rows[..limit.min(self.rows.len())]
    }

    /// One line per row, cells separated by tabs.
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Reads every sheet of an Excel or OpenDocument workbook in workbook order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetExtractor;

impl SpreadsheetExtractor {
    pub fn read_sheets(&self, bytes: &[u8]) -> Result<Vec<SheetTable>> {
        let read_error = |e: calamine::Error| {
            FinancialDocumentError::document_read(DocumentFormat::Spreadsheet, e)
        };

        let mut workbook =
            open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(read_error)?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&name).map_err(read_error)?;
            let rows: Vec<Vec<CellValue>> = range
                .rows()
                .map(|row| row.iter().map(CellValue::from).collect())
                .collect();

            debug!("Sheet '{}': {} rows", name, rows.len());
            sheets.push(SheetTable { name, rows });
        }

        Ok(sheets)
    }
}

impl TextExtractor for SpreadsheetExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Spreadsheet
    }

    fn extract(&self, bytes: &[u8]) -> Result<ExtractedContent> {
        let sheets = self.read_sheets(bytes)?;

        let mut text = String::new();
        for sheet in &sheets {
            text.push_str(&sheet.to_text());
            text.push('\n');
        }

        Ok(ExtractedContent {
            text,
            sheets: Some(sheets),
        })
    }
}
