//! Classification pipeline: upload → records → chunks → oracle → rows → tally.
//!
//! Files and, within a file, chunks are dispatched concurrently, each level
//! bounded by `PipelineConfig::concurrency`. Chunk replies are joined back in
//! chunk order before tallying, and file outcomes are yielded in upload order.

use std::time::Instant;

use futures::stream::{self, Stream, StreamExt};
use sentilabel_ai::{Classifier, OracleError, parse_reply};
use sentilabel_core::{
    Chunk, FileOutcome, FileResult, FileWarning, PipelineConfig, Record, ReportedCounts, batches,
};
use sentilabel_ingest::{FileKind, extract};
use tracing::{debug, info, warn};

use crate::upload::Upload;

pub struct Pipeline {
    classifier: Classifier,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(classifier: Classifier, config: PipelineConfig) -> Self {
        Self { classifier, config }
    }

    /// Outcomes for every upload, yielded in upload order as each completes.
    /// A failing file never stops the rest.
    pub fn outcomes<'a>(&'a self, uploads: &'a [Upload]) -> impl Stream<Item = FileOutcome> + 'a {
        stream::iter(uploads)
            .map(|upload| self.process_file(upload))
            .buffered(self.config.concurrency)
    }

    pub async fn run(&self, uploads: &[Upload]) -> Vec<FileOutcome> {
        self.outcomes(uploads).collect().await
    }

    pub async fn process_file(&self, upload: &Upload) -> FileOutcome {
        let start = Instant::now();
        info!(file = %upload.filename, "processing file");

        let kind = match FileKind::from_extension(&upload.extension) {
            Ok(kind) => kind,
            Err(e) => {
                warn!(file = %upload.filename, error = %e, "skipping file");
                return FileOutcome::error(&upload.filename, e);
            }
        };

        let bytes = match upload.read().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(file = %upload.filename, error = %e, "could not read file");
                return FileOutcome::error(&upload.filename, format!("Error reading file: {e}"));
            }
        };

        let outcome = self.process_bytes(&upload.filename, kind, &bytes).await;
        info!(
            file = %upload.filename,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "file done"
        );
        outcome
    }

    pub async fn process_bytes(&self, filename: &str, kind: FileKind, bytes: &[u8]) -> FileOutcome {
        let records = match extract(kind, bytes) {
            Ok(records) => records,
            Err(e) if !e.is_malformed() => {
                warn!(file = filename, error = %e, "skipping file");
                return FileOutcome::error(filename, e);
            }
            Err(e) => {
                warn!(file = filename, error = %e, "extraction failed");
                return FileOutcome::error(filename, format!("Error reading file: {e}"));
            }
        };

        if records.is_empty() {
            info!(file = filename, "no valid text found");
            return FileOutcome::warning(filename, FileWarning::NoValidText);
        }

        self.classify_records(filename, &records).await
    }

    /// Classify non-empty `records` and tally the rows.
    pub async fn classify_records(&self, filename: &str, records: &[Record]) -> FileOutcome {
        let chunks = batches(records, self.config.chunk_size);
        let total = chunks.len();
        info!(
            file = filename,
            records = records.len(),
            chunks = total,
            concurrency = self.config.concurrency,
            "submitting chunks"
        );

        let replies: Vec<(Chunk<'_>, Result<String, OracleError>)> = stream::iter(chunks)
            .map(|chunk| async move { (chunk, self.classifier.classify(chunk.records).await) })
            .buffered(self.config.concurrency)
            .collect()
            .await;

        let mut rows = Vec::new();
        let mut notes = Vec::new();
        let mut reported = ReportedCounts::default();
        let mut every_chunk_reported = true;
        let mut first_error = None;

        for (chunk, reply) in replies {
            match reply {
                Ok(reply) => {
                    let parsed = parse_reply(&reply);
                    debug!(
                        file = filename,
                        chunk = chunk.index,
                        rows = parsed.rows.len(),
                        dropped = parsed.dropped,
                        "parsed reply"
                    );
                    match &parsed.reported {
                        Some(counts) => reported.merge(counts),
                        None => every_chunk_reported = false,
                    }
                    rows.extend(parsed.rows);
                }
                Err(e) => {
                    every_chunk_reported = false;
                    let note = chunk_failure_note(&chunk, total, &e);
                    warn!(file = filename, chunk = chunk.index, error = %e, "chunk failed");
                    notes.push(note);
                    first_error.get_or_insert(e);
                }
            }
        }

        if notes.len() == total
            && let Some(e) = first_error
        {
            return FileOutcome::error(filename, format!("Oracle error: {e}"));
        }

        let result = FileResult::new(filename, rows);
        if every_chunk_reported && !reported.agrees_with(&result) {
            warn!(
                file = filename,
                reported_total = reported.total(),
                parsed_total = result.rows.len(),
                "oracle's counts line disagrees with parsed rows"
            );
        }

        if result.is_empty() {
            info!(file = filename, "no sentiment output");
            return FileOutcome::Warning {
                filename: filename.to_string(),
                warning: FileWarning::NoSentimentOutput,
                notes,
            };
        }

        info!(
            file = filename,
            rows = result.rows.len(),
            failed_chunks = notes.len(),
            "classified"
        );
        FileOutcome::Classified { result, notes }
    }
}

fn chunk_failure_note(chunk: &Chunk<'_>, total: usize, error: &OracleError) -> String {
    let ids = match chunk.id_span() {
        Some((first, last)) => format!("records {first}-{last}"),
        None => "no records".to_string(),
    };
    format!(
        "chunk {}/{} ({ids}) failed: {error}",
        chunk.index + 1,
        total
    )
}
