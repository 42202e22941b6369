//! Lenient decoder for the oracle's line-oriented reply.
//!
//! Expected line grammar:
//!
//! ```text
//! id_no:<id>|text:<text>|sentiment:<label>
//! counts|positive:<n>|negative:<n>|neutral:<n>
//! ```
//!
//! The reply is untrusted free text. Each line is decoded on its own; a line
//! that does not fit is dropped and the rest of the reply still counts.
//! Sentiment labels are not validated against the canonical set.

use sentilabel_core::{ClassificationRow, ReportedCounts, Sentiment};
use tracing::debug;

/// Prefix of the trailing aggregate line.
pub const COUNTS_PREFIX: &str = "counts";

const FIELD_DELIMITER: char = '|';
const LABEL_DELIMITER: char = ':';
const TEXT_LABEL: &str = "text:";
const SENTIMENT_LABEL: &str = "sentiment:";

/// Everything recovered from one chunk's reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedReply {
    pub rows: Vec<ClassificationRow>,
    /// The oracle's own totals, if it sent a decodable counts line.
    pub reported: Option<ReportedCounts>,
    /// Non-empty lines that were neither rows nor a counts line.
    pub dropped: usize,
}

pub fn parse_reply(reply: &str) -> ParsedReply {
    let mut parsed = ParsedReply::default();

    for line in reply.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with(COUNTS_PREFIX) {
            if let Some(counts) = parse_counts_line(line) {
                parsed.reported = Some(counts);
            }
            continue;
        }
        match parse_row(line) {
            Some(row) => parsed.rows.push(row),
            None => {
                debug!(line, "dropping malformed reply line");
                parsed.dropped += 1;
            }
        }
    }

    parsed
}

/// Decode one classification line. Needs at least three `|`-separated parts;
/// anything after the third part is ignored.
pub fn parse_row(line: &str) -> Option<ClassificationRow> {
    let mut parts = line.split(FIELD_DELIMITER);
    let id_part = parts.next()?;
    let text_part = parts.next()?;
    let sentiment_part = parts.next()?;

    let id = id_part
        .rsplit(LABEL_DELIMITER)
        .next()
        .unwrap_or(id_part)
        .trim();

    Some(ClassificationRow {
        id: id.to_string(),
        text: strip_label(text_part, TEXT_LABEL).to_string(),
        sentiment: Sentiment::parse(strip_label(sentiment_part, SENTIMENT_LABEL)),
    })
}

/// Decode `counts|positive:<n>|negative:<n>|neutral:<n>`.
///
/// Fields may come in any order; unknown or non-numeric fields are ignored.
/// Returns `None` when no canonical field could be read.
pub fn parse_counts_line(line: &str) -> Option<ReportedCounts> {
    let rest = line.trim().strip_prefix(COUNTS_PREFIX)?;
    let mut counts = ReportedCounts::default();
    let mut seen = false;

    for field in rest.split(FIELD_DELIMITER) {
        let Some((label, value)) = field.split_once(LABEL_DELIMITER) else {
            continue;
        };
        let Ok(n) = value.trim().parse::<usize>() else {
            continue;
        };
        let slot = match label.trim() {
            "positive" => &mut counts.positive,
            "negative" => &mut counts.negative,
            "neutral" => &mut counts.neutral,
            _ => continue,
        };
        *slot = n;
        seen = true;
    }

    seen.then_some(counts)
}

fn strip_label<'a>(part: &'a str, label: &str) -> &'a str {
    let part = part.trim();
    part.strip_prefix(label).unwrap_or(part).trim()
}
