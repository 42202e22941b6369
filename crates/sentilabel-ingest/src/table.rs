//! Comma-delimited uploads with a `text` column.
//!
//! Every data row yields one record, in file order. Rows that fail to decode
//! or carry more fields than the header are skipped and logged, never fatal.
//! A short row reads as an empty text cell. Only a missing header is an error.

use sentilabel_core::{Record, number_records};
use tracing::debug;

use crate::TEXT_COLUMN;
use crate::error::ExtractError;

pub(crate) fn extract_csv(bytes: &[u8]) -> Result<Vec<Record>, ExtractError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?;
    let width = headers.len();
    let column = text_column(headers.iter()).ok_or_else(|| {
        ExtractError::MalformedInput(format!("no `{TEXT_COLUMN}` column in header"))
    })?;

    let mut texts = Vec::new();
    let mut skipped = 0usize;
    for (row, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!(row = row + 1, error = %e, "skipping unparseable CSV row");
                skipped += 1;
                continue;
            }
        };
        if record.len() > width {
            debug!(row = row + 1, fields = record.len(), width, "skipping overlong CSV row");
            skipped += 1;
            continue;
        }
        texts.push(record.get(column).map(str::trim).unwrap_or_default().to_string());
    }

    if skipped > 0 {
        debug!(skipped, kept = texts.len(), "CSV rows skipped");
    }
    Ok(number_records(texts))
}

/// Index of the `text` column, matched after trimming whitespace and a BOM.
pub(crate) fn text_column<'a>(headers: impl IntoIterator<Item = &'a str>) -> Option<usize> {
    headers
        .into_iter()
        .position(|h| crate::strip_bom(h).trim() == TEXT_COLUMN)
}
