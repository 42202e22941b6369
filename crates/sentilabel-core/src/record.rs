//! Records submitted to the oracle and the rows decoded from its replies.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// A candidate text extracted from an uploaded file.
///
/// Ids are 1-based and dense within a file, in extraction order. The
/// serialised form `{"id": .., "text": ..}` is exactly what the oracle
/// receives in the user payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub text: String,
}

/// Assign dense 1-based ids to texts in iteration order.
pub fn number_records<I>(texts: I) -> Vec<Record>
where
    I: IntoIterator<Item = String>,
{
    texts
        .into_iter()
        .zip(1u64..)
        .map(|(text, id)| Record { id, text })
        .collect()
}

/// Sentiment label as reported by the oracle.
///
/// Anything outside the three canonical labels is carried verbatim in
/// [`Sentiment::Other`] so that drift in the oracle's output stays visible
/// in the counts instead of being folded into a canonical bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Other(String),
}

impl Sentiment {
    /// Map a raw label to a sentiment. Matching is exact: `"Positive"` is
    /// not `positive`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            "neutral" => Self::Neutral,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Sentiment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One decoded line of an oracle reply.
///
/// `id` stays a string: the oracle echoes whatever it likes and the row is
/// not cross-checked against the submitted records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationRow {
    pub id: String,
    pub text: String,
    pub sentiment: Sentiment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_records_is_dense_from_one() {
        let records = number_records(["a", "b", "c"].map(String::from));
        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(records[2].text, "c");
    }

    #[test]
    fn number_records_empty() {
        assert!(number_records(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn record_payload_shape() {
        let json = serde_json::to_string(&Record {
            id: 7,
            text: "It is a table.".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"id":7,"text":"It is a table."}"#);
    }

    #[test]
    fn canonical_labels_parse() {
        assert_eq!(Sentiment::parse("positive"), Sentiment::Positive);
        assert_eq!(Sentiment::parse("negative"), Sentiment::Negative);
        assert_eq!(Sentiment::parse("neutral"), Sentiment::Neutral);
    }

    #[test]
    fn unknown_labels_pass_through() {
        let s = Sentiment::parse("mixed");
        assert_eq!(s, Sentiment::Other("mixed".into()));
        assert_eq!(s.as_str(), "mixed");
        assert!(!s.is_canonical());
        assert_eq!(
            Sentiment::parse("Positive"),
            Sentiment::Other("Positive".into())
        );
    }

    #[test]
    fn sentiment_serialises_as_bare_string() {
        let row = ClassificationRow {
            id: "1".into(),
            text: "ok".into(),
            sentiment: Sentiment::Neutral,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["sentiment"], "neutral");
    }
}
