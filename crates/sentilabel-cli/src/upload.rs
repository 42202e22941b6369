//! Uploaded files: a name, a declared extension, and lazy access to bytes.

use std::path::{Path, PathBuf};

enum Source {
    Path(PathBuf),
    #[cfg(test)]
    Memory(Vec<u8>),
}

pub struct Upload {
    pub filename: String,
    /// Lower-cased extension without the dot; empty if the name has none.
    pub extension: String,
    source: Source,
}

impl Upload {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            extension: extension_of(&path),
            filename,
            source: Source::Path(path),
        }
    }

    #[cfg(test)]
    pub fn in_memory(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        Self {
            extension: extension_of(Path::new(&filename)),
            filename,
            source: Source::Memory(bytes),
        }
    }

    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            Source::Path(path) => tokio::fs::read(path).await,
            #[cfg(test)]
            Source::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}

pub fn collect_uploads(paths: &[PathBuf]) -> Vec<Upload> {
    paths.iter().cloned().map(Upload::from_path).collect()
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}
