use crate::error::ExtractError;

/// Declared upload type, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    PlainText,
    Json,
    Csv,
    Xlsx,
}

impl FileKind {
    pub const ALL: [FileKind; 4] = [Self::PlainText, Self::Json, Self::Csv, Self::Xlsx];

    /// Map an extension (case-insensitive, leading dot optional) to a kind.
    pub fn from_extension(ext: &str) -> Result<Self, ExtractError> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Ok(Self::PlainText),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            _ => Err(ExtractError::UnsupportedFormat(if ext.is_empty() {
                "(no extension)".into()
            } else {
                ext
            })),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        for kind in FileKind::ALL {
            assert_eq!(FileKind::from_extension(kind.extension()).unwrap(), kind);
        }
    }

    #[test]
    fn case_and_dot_insensitive() {
        assert_eq!(FileKind::from_extension(".TXT").unwrap(), FileKind::PlainText);
        assert_eq!(FileKind::from_extension("Csv").unwrap(), FileKind::Csv);
    }

    #[test]
    fn unsupported_extension() {
        let err = FileKind::from_extension("pdf").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(ref e) if e == "pdf"));
        assert!(!err.is_malformed());
    }

    #[test]
    fn missing_extension() {
        let err = FileKind::from_extension("").unwrap_err();
        assert_eq!(err.to_string(), "unsupported file type: (no extension)");
    }
}
