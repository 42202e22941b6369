//! Record extraction: turns an uploaded file into ordered `(id, text)` records.
//!
//! The extraction rule is chosen by the file's declared extension, never by
//! sniffing its contents. Every rule assigns ids densely from 1.

mod error;
mod json;
mod kind;
#[cfg(feature = "xlsx")]
mod sheet;
mod table;
mod text;

pub use error::ExtractError;
pub use kind::FileKind;

use sentilabel_core::Record;
use tracing::debug;

/// Column holding the text to classify in tabular uploads.
pub const TEXT_COLUMN: &str = "text";

/// Extract records from raw file content.
///
/// Zero records is a valid result; callers decide how to report it.
pub fn extract(kind: FileKind, bytes: &[u8]) -> Result<Vec<Record>, ExtractError> {
    let records = match kind {
        FileKind::PlainText => text::extract_text(bytes)?,
        FileKind::Json => json::extract_json(bytes)?,
        FileKind::Csv => table::extract_csv(bytes)?,
        #[cfg(feature = "xlsx")]
        FileKind::Xlsx => sheet::extract_xlsx(bytes)?,
        #[cfg(not(feature = "xlsx"))]
        FileKind::Xlsx => {
            return Err(ExtractError::UnsupportedFormat(
                "xlsx (built without spreadsheet support)".into(),
            ));
        }
    };
    debug!(
        kind = kind.extension(),
        bytes = bytes.len(),
        records = records.len(),
        "extracted records"
    );
    Ok(records)
}

/// Drop a leading UTF-8 byte order mark.
fn strip_bom(s: &str) -> &str {
    s.strip_prefix('\u{feff}').unwrap_or(s)
}
