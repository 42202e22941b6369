//! Terminal and JSON rendering of per-file outcomes.

use std::io::{self, Write};

use sentilabel_core::{FileOutcome, FileResult};
use serde::Serialize;

const MAX_TEXT_CHARS: usize = 70;

// ── Table output ──

/// Write one file's section: header, row table, counts, and any notes.
pub fn write_outcome(out: &mut impl Write, outcome: &FileOutcome) -> io::Result<()> {
    writeln!(out, "=== File: {} ===", outcome.filename())?;

    match outcome {
        FileOutcome::Classified { result, notes } => {
            write_rows(out, result)?;
            write_counts(out, result)?;
            write_notes(out, notes)?;
        }
        FileOutcome::Warning { warning, notes, .. } => {
            writeln!(out, "warning: {warning}")?;
            write_notes(out, notes)?;
        }
        FileOutcome::Error { message, .. } => {
            writeln!(out, "error: {message}")?;
        }
    }

    writeln!(out)
}

fn write_rows(out: &mut impl Write, result: &FileResult) -> io::Result<()> {
    let id_width = result
        .rows
        .iter()
        .map(|r| r.id.chars().count())
        .max()
        .unwrap_or(0)
        .max(2);

    writeln!(out)?;
    writeln!(out, "  {:<id_width$}  {:<10}  TEXT", "ID", "SENTIMENT")?;
    for row in &result.rows {
        writeln!(
            out,
            "  {:<id_width$}  {:<10}  {}",
            row.id,
            row.sentiment.as_str(),
            shorten(&row.text, MAX_TEXT_CHARS)
        )?;
    }
    Ok(())
}

fn write_counts(out: &mut impl Write, result: &FileResult) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  Sentiment counts ({} rows)", result.rows.len())?;
    for (sentiment, n) in result.ranked_counts() {
        writeln!(out, "    {:<12} {}", sentiment.as_str(), n)?;
    }
    Ok(())
}

fn write_notes(out: &mut impl Write, notes: &[String]) -> io::Result<()> {
    if notes.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    for note in notes {
        writeln!(out, "  warning: {note}")?;
    }
    Ok(())
}

/// One-line run summary across all files.
pub fn write_summary(out: &mut impl Write, outcomes: &[FileOutcome]) -> io::Result<()> {
    let (mut classified, mut warned, mut failed) = (0, 0, 0);
    for outcome in outcomes {
        match outcome {
            FileOutcome::Classified { .. } => classified += 1,
            FileOutcome::Warning { .. } => warned += 1,
            FileOutcome::Error { .. } => failed += 1,
        }
    }
    writeln!(
        out,
        "{} file(s): {classified} classified, {warned} warning(s), {failed} error(s)",
        outcomes.len()
    )
}

/// Truncate to `max` characters, marking the cut with `...`.
fn shorten(text: &str, max: usize) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() <= max {
        return flat;
    }
    let kept: String = flat.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

// ── JSON output ──

#[derive(Serialize)]
struct Report<'a> {
    generated_at: String,
    model: &'a str,
    files: &'a [FileOutcome],
}

pub fn write_json(out: &mut impl Write, model: &str, outcomes: &[FileOutcome]) -> io::Result<()> {
    let report = Report {
        generated_at: chrono::Utc::now().to_rfc3339(),
        model,
        files: outcomes,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
