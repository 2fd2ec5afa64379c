//! Excel workbook writer

use super::Table;
use console_types::{AppError, AppResult};
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, XlsxError};

/// Excel's limit on worksheet name length
const MAX_SHEET_NAME: usize = 31;

/// Write the table as a single-sheet workbook with a bold header row
///
/// # Errors
///
/// Returns [`AppError::Export`] if the workbook cannot be built, including
/// when the table exceeds the worksheet's row or column limits.
pub fn write(table: &Table, sheet_name: &str) -> AppResult<Vec<u8>> {
    build(table, sheet_name).map_err(|e| AppError::Export(format!("xlsx write failed: {e}")))
}

fn build(table: &Table, sheet_name: &str) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_title(sheet_name))?;

    for (col, title) in table.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col_num(col)?, *title, &header)?;
    }
    for (index, row) in table.rows.iter().enumerate() {
        let row_num = row_num(index.saturating_add(1))?;
        for (col, cell) in row.iter().enumerate() {
            worksheet.write_string(row_num, col_num(col)?, cell)?;
        }
    }
    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();

    workbook.save_to_buffer()
}

fn row_num(index: usize) -> Result<RowNum, XlsxError> {
    RowNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_num(index: usize) -> Result<ColNum, XlsxError> {
    ColNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

/// Worksheet names may not contain `[]:*?/\` and are at most 31 characters
fn sheet_title(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME)
        .collect();
    if cleaned.trim().is_empty() {
        "Export".to_string()
    } else {
        cleaned
    }
}
