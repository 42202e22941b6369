//! Spreadsheet uploads: the first worksheet of an `.xlsx` workbook.
//!
//! The first row of the used range is the header and every later row is one
//! record. Empty cells read as empty text; numbers, booleans, dates and error
//! cells use their display form.

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx, open_workbook_from_rs};
use sentilabel_core::{Record, number_records};

use crate::TEXT_COLUMN;
use crate::error::ExtractError;

pub(crate) fn extract_xlsx(bytes: &[u8]) -> Result<Vec<Record>, ExtractError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ExtractError::MalformedInput("workbook has no worksheets".into()))??;
    records_from_range(&range)
}

pub(crate) fn records_from_range(range: &Range<Data>) -> Result<Vec<Record>, ExtractError> {
    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| ExtractError::MalformedInput("worksheet is empty".into()))?;

    let column = header
        .iter()
        .position(|cell| matches!(cell, Data::String(s) if s.trim() == TEXT_COLUMN))
        .ok_or_else(|| {
            ExtractError::MalformedInput(format!("no `{TEXT_COLUMN}` column in header row"))
        })?;

    Ok(number_records(
        rows.map(|row| row.get(column).map(cell_text).unwrap_or_default()),
    ))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
