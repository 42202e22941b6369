//! Split a file's records into fixed-size chunks for submission.
//!
//! Chunk size bounds the payload of a single oracle call. It trades
//! throughput against per-call latency and rate limits; it has no bearing on
//! correctness, so any positive value is accepted.

use crate::config::ConfigError;
use crate::record::Record;

pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// A validated, strictly positive chunk size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSize(usize);

impl ChunkSize {
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "chunk size must be at least 1".into(),
            ));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self(DEFAULT_CHUNK_SIZE)
    }
}

/// An ordered, non-empty slice of records sent in one oracle call.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    /// Position of this chunk within its file, from 0.
    pub index: usize,
    pub records: &'a [Record],
}

impl Chunk<'_> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last record ids, for log lines and failure notes.
    pub fn id_span(&self) -> Option<(u64, u64)> {
        Some((self.records.first()?.id, self.records.last()?.id))
    }
}

/// Lazily partition `records` into chunks of `size`, in order.
///
/// Every record lands in exactly one chunk; only the last chunk may be
/// shorter than `size`. An empty input yields no chunks.
pub fn batches(records: &[Record], size: ChunkSize) -> impl ExactSizeIterator<Item = Chunk<'_>> {
    records
        .chunks(size.get())
        .enumerate()
        .map(|(index, records)| Chunk { index, records })
}
