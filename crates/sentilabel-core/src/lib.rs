pub mod batch;
pub mod config;
pub mod outcome;
pub mod record;
pub mod tally;

pub use batch::{Chunk, ChunkSize, DEFAULT_CHUNK_SIZE, batches};
pub use config::{ConfigError, PipelineConfig};
pub use outcome::{FileOutcome, FileWarning};
pub use record::{ClassificationRow, Record, Sentiment, number_records};
pub use tally::{FileResult, ReportedCounts, SentimentCounts, tally};
