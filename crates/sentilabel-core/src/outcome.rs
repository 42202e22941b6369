//! Per-file outcome handed to the display layer.
//!
//! Every processed file ends in exactly one of these variants. Failures are
//! values here, not errors: one bad file never stops its siblings.

use std::fmt;

use serde::Serialize;

use crate::tally::FileResult;

/// Conditions that leave a file without a table but are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileWarning {
    /// Extraction produced zero records; the oracle was not called.
    NoValidText,
    /// The oracle was called but no reply line could be decoded.
    NoSentimentOutput,
}

impl fmt::Display for FileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoValidText => f.write_str("No valid text found in this file."),
            Self::NoSentimentOutput => f.write_str("No sentiment output for this file."),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Rows were produced. `notes` describes chunks that failed along the way.
    Classified {
        result: FileResult,
        notes: Vec<String>,
    },
    Warning {
        filename: String,
        warning: FileWarning,
        notes: Vec<String>,
    },
    Error {
        filename: String,
        message: String,
    },
}

impl FileOutcome {
    pub fn warning(filename: impl Into<String>, warning: FileWarning) -> Self {
        Self::Warning {
            filename: filename.into(),
            warning,
            notes: Vec::new(),
        }
    }

    pub fn error(filename: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Error {
            filename: filename.into(),
            message: message.to_string(),
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            Self::Classified { result, .. } => &result.filename,
            Self::Warning { filename, .. } | Self::Error { filename, .. } => filename,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
