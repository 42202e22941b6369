use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "xlsx")]
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] calamine::XlsxError),
}

impl ExtractError {
    /// Everything except an unknown extension is a decode failure of the
    /// file's contents.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Self::UnsupportedFormat(_))
    }
}
