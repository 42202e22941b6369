//! Per-file aggregation of classification rows.
//!
//! Counts are always recomputed from the rows. The oracle's own `counts|…`
//! line is decoded into [`ReportedCounts`] and only ever compared against
//! the tally, never trusted in its place.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::{ClassificationRow, Sentiment};

/// Frequency of each distinct sentiment value, canonical labels first.
pub type SentimentCounts = BTreeMap<Sentiment, usize>;

/// Count rows by sentiment value, including non-canonical values.
pub fn tally(rows: &[ClassificationRow]) -> SentimentCounts {
    let mut counts = SentimentCounts::new();
    for row in rows {
        *counts.entry(row.sentiment.clone()).or_insert(0) += 1;
    }
    counts
}

/// Rows and counts for one uploaded file.
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub filename: String,
    pub rows: Vec<ClassificationRow>,
    pub counts: SentimentCounts,
}

impl FileResult {
    /// Build a result from rows already in original record order.
    pub fn new(filename: impl Into<String>, rows: Vec<ClassificationRow>) -> Self {
        let counts = tally(&rows);
        Self {
            filename: filename.into(),
            rows,
            counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn count(&self, sentiment: &Sentiment) -> usize {
        self.counts.get(sentiment).copied().unwrap_or(0)
    }

    /// Counts ordered by frequency (descending), ties broken by label order.
    pub fn ranked_counts(&self) -> Vec<(&Sentiment, usize)> {
        let mut ranked: Vec<_> = self.counts.iter().map(|(s, &n)| (s, n)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Totals the oracle claims in its trailing `counts|…` line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportedCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl ReportedCounts {
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Add another chunk's reported totals.
    pub fn merge(&mut self, other: &ReportedCounts) {
        self.positive += other.positive;
        self.negative += other.negative;
        self.neutral += other.neutral;
    }

    /// True when the claimed totals equal the canonical counts of `result`
    /// and no non-canonical values were tallied.
    pub fn agrees_with(&self, result: &FileResult) -> bool {
        let other: usize = result
            .counts
            .iter()
            .filter(|(s, _)| !s.is_canonical())
            .map(|(_, n)| n)
            .sum();
        other == 0
            && result.count(&Sentiment::Positive) == self.positive
            && result.count(&Sentiment::Negative) == self.negative
            && result.count(&Sentiment::Neutral) == self.neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, sentiment: &str) -> ClassificationRow {
        ClassificationRow {
            id: id.into(),
            text: format!("text {id}"),
            sentiment: Sentiment::parse(sentiment),
        }
    }

    #[test]
    fn tally_counts_each_value() {
        let rows = vec![
            row("1", "positive"),
            row("2", "negative"),
            row("3", "neutral"),
            row("4", "positive"),
        ];
        let counts = tally(&rows);
        assert_eq!(counts[&Sentiment::Positive], 2);
        assert_eq!(counts[&Sentiment::Negative], 1);
        assert_eq!(counts[&Sentiment::Neutral], 1);
    }

    #[test]
    fn tally_keeps_unknown_values() {
        let rows = vec![row("1", "mixed"), row("2", "mixed"), row("3", "positive")];
        let counts = tally(&rows);
        assert_eq!(counts[&Sentiment::Other("mixed".into())], 2);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn sum_of_counts_equals_row_count() {
        let labels = ["positive", "negative", "neutral", "sarcastic", "", "positive"];
        for n in 0..=labels.len() {
            let rows: Vec<_> = labels[..n]
                .iter()
                .enumerate()
                .map(|(i, s)| row(&i.to_string(), s))
                .collect();
            let result = FileResult::new("f.txt", rows);
            assert_eq!(result.counts.values().sum::<usize>(), result.rows.len());
        }
    }

    #[test]
    fn empty_rows_give_empty_counts() {
        let result = FileResult::new("empty.txt", vec![]);
        assert!(result.is_empty());
        assert!(result.counts.is_empty());
        assert_eq!(result.count(&Sentiment::Positive), 0);
    }

    #[test]
    fn ranked_counts_by_frequency() {
        let rows = vec![
            row("1", "neutral"),
            row("2", "negative"),
            row("3", "negative"),
            row("4", "positive"),
        ];
        let result = FileResult::new("f.csv", rows);
        let ranked: Vec<(&str, usize)> = result
            .ranked_counts()
            .into_iter()
            .map(|(s, n)| (s.as_str(), n))
            .collect();
        assert_eq!(
            ranked,
            vec![("negative", 2), ("positive", 1), ("neutral", 1)]
        );
    }

    #[test]
    fn reported_counts_agreement() {
        let rows = vec![row("1", "positive"), row("2", "negative"), row("3", "neutral")];
        let result = FileResult::new("f.txt", rows);
        let reported = ReportedCounts {
            positive: 1,
            negative: 1,
            neutral: 1,
        };
        assert!(reported.agrees_with(&result));

        let off = ReportedCounts {
            positive: 2,
            ..reported
        };
        assert!(!off.agrees_with(&result));
    }

    #[test]
    fn reported_counts_disagree_with_unknown_labels() {
        let result = FileResult::new("f.txt", vec![row("1", "positive"), row("2", "mixed")]);
        let reported = ReportedCounts {
            positive: 1,
            ..Default::default()
        };
        assert!(!reported.agrees_with(&result));
    }

    #[test]
    fn reported_counts_merge() {
        let mut total = ReportedCounts::default();
        total.merge(&ReportedCounts {
            positive: 3,
            negative: 1,
            neutral: 0,
        });
        total.merge(&ReportedCounts {
            positive: 1,
            negative: 0,
            neutral: 2,
        });
        assert_eq!(total.total(), 7);
        assert_eq!(total.positive, 4);
    }

    #[test]
    fn counts_serialise_with_string_keys() {
        let result = FileResult::new("f.txt", vec![row("1", "positive"), row("2", "odd")]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["counts"]["positive"], 1);
        assert_eq!(json["counts"]["odd"], 1);
    }
}
