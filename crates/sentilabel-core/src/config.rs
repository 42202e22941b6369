//! Pipeline settings shared by every frontend.

use thiserror::Error;

use crate::batch::ChunkSize;

pub const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// How records are grouped and dispatched.
///
/// `concurrency` is the number of chunks of one file that may be in flight
/// at once. A value of 1 dispatches chunks strictly one after another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub chunk_size: ChunkSize,
    pub concurrency: usize,
}

impl PipelineConfig {
    pub fn new(chunk_size: usize, concurrency: usize) -> Result<Self, ConfigError> {
        let chunk_size = ChunkSize::new(chunk_size)?;
        if concurrency == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "concurrency must be at least 1".into(),
            ));
        }
        Ok(Self {
            chunk_size,
            concurrency,
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: ChunkSize::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.chunk_size.get(), 10);
        assert_eq!(cfg.concurrency, 4);
    }

    #[test]
    fn rejects_zero_concurrency() {
        assert!(matches!(
            PipelineConfig::new(10, 0),
            Err(ConfigError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_zero_chunk_size() {
        assert!(PipelineConfig::new(0, 1).is_err());
    }

    #[test]
    fn accepts_sequential_dispatch() {
        let cfg = PipelineConfig::new(3, 1).unwrap();
        assert_eq!(cfg.chunk_size.get(), 3);
        assert_eq!(cfg.concurrency, 1);
    }
}
