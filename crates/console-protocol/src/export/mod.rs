//! Exporting the filtered collection to CSV, XLSX and PDF
//!
//! Exports ignore pagination: they take the first `limit` rows of the
//! filtered collection, project them through [`Record::columns`] and hand the
//! resulting [`Table`] to one of the writers.

pub mod csv;
pub mod pdf;
pub mod xlsx;

use console_types::{AppResult, Record};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub use pdf::invoice_pdf;

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma separated values
    Csv,
    /// Excel workbook
    Xlsx,
    /// Printable PDF table
    Pdf,
}

impl ExportFormat {
    /// Every format, in menu order
    pub const ALL: [Self; 3] = [Self::Csv, Self::Xlsx, Self::Pdf];

    /// File extension without the dot
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }

    /// MIME type of the download
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Csv => "text/csv;charset=utf-8",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Pdf => "application/pdf",
        }
    }

    /// Parse a menu value (`csv`, `xlsx`, `pdf`)
    #[must_use]
    pub fn from_extension(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "CSV",
            Self::Xlsx => "Excel",
            Self::Pdf => "PDF",
        })
    }
}

/// What the user picked in the export menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Output format
    pub format: ExportFormat,
    /// Maximum number of rows
    pub limit: usize,
    /// Timestamp printed in PDF headers, supplied by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_on: Option<String>,
}

impl ExportRequest {
    /// Request without a generation timestamp
    #[must_use]
    pub const fn new(format: ExportFormat, limit: usize) -> Self {
        Self {
            format,
            limit,
            generated_on: None,
        }
    }

    /// Attach the generation timestamp
    #[must_use]
    pub fn generated_on(mut self, stamp: impl Into<String>) -> Self {
        self.generated_on = Some(stamp.into());
        self
    }
}

/// Bytes ready to download
#[derive(Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Download filename
    pub filename: String,
    /// MIME type
    pub mime: &'static str,
    /// File contents
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ExportFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportFile")
            .field("filename", &self.filename)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Header row plus projected cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column headers
    pub headers: Vec<&'static str>,
    /// One row of cells per record, `"N/A"` for missing values
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Project records through their entity's columns
    pub fn project<'a, T: Record>(records: impl IntoIterator<Item = &'a T>) -> Self {
        let columns = T::columns();
        let rows = records
            .into_iter()
            .map(|record| columns.iter().map(|column| column.cell(record)).collect())
            .collect();
        Self {
            headers: columns.iter().map(|column| column.header).collect(),
            rows,
        }
    }
}

/// Deterministic download name, `<entity>_export.<ext>`
#[must_use]
pub fn filename(entity: &str, format: ExportFormat) -> String {
    format!("{entity}_export.{}", format.extension())
}

/// Export the first `request.limit` rows
///
/// # Errors
///
/// Returns [`console_types::AppError::Export`] if the writer fails.
pub fn export<'a, T: Record>(
    rows: impl IntoIterator<Item = &'a T>,
    request: &ExportRequest,
) -> AppResult<ExportFile> {
    let table = Table::project(rows.into_iter().take(request.limit));
    debug!(
        entity = T::ENTITY,
        format = request.format.extension(),
        rows = table.rows.len(),
        "Exporting"
    );

    let bytes = match request.format {
        ExportFormat::Csv => csv::write(&table)?,
        ExportFormat::Xlsx => xlsx::write(&table, T::LABEL)?,
        ExportFormat::Pdf => pdf::write(&table, T::LABEL, request.generated_on.as_deref())?,
    };

    Ok(ExportFile {
        filename: filename(T::ENTITY, request.format),
        mime: request.format.mime(),
        bytes,
    })
}
