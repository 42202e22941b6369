//! JSON array uploads: `[{"text": ...}, ...]`.

use sentilabel_core::{Record, number_records};
use serde_json::Value;

use crate::TEXT_COLUMN;
use crate::error::ExtractError;

pub(crate) fn extract_json(bytes: &[u8]) -> Result<Vec<Record>, ExtractError> {
    records_from_str(crate::strip_bom(std::str::from_utf8(bytes)?))
}

/// Parse a JSON array of objects, one record per element in array order.
pub(crate) fn records_from_str(s: &str) -> Result<Vec<Record>, ExtractError> {
    let Value::Array(items) = serde_json::from_str::<Value>(s)? else {
        return Err(ExtractError::MalformedInput(
            "expected a JSON array of objects".into(),
        ));
    };

    let texts = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            text_field(item).ok_or_else(|| {
                ExtractError::MalformedInput(format!("element {i} has no `{TEXT_COLUMN}` field"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(number_records(texts))
}

/// Non-string scalars are kept in their JSON text form.
fn text_field(item: Value) -> Option<String> {
    let Value::Object(mut map) = item else {
        return None;
    };
    match map.remove(TEXT_COLUMN)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_order_and_dense_ids() {
        let input = br#"[
            {"text": "first", "lang": "en"},
            {"id": 99, "text": "second"},
            {"text": "third"}
        ]"#;
        let records = extract_json(input).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].text, "first");
        assert_eq!(records[1].id, 2);
        assert_eq!(records[2].text, "third");
    }

    #[test]
    fn array_of_length_n() {
        for n in [0usize, 1, 10, 25] {
            let items: Vec<String> = (0..n).map(|i| format!(r#"{{"text": "t{i}"}}"#)).collect();
            let input = format!("[{}]", items.join(","));
            let records = records_from_str(&input).unwrap();
            assert_eq!(records.len(), n);
            assert!(records.iter().zip(1u64..).all(|(r, id)| r.id == id));
        }
    }

    #[test]
    fn non_string_text_is_stringified() {
        let records = records_from_str(r#"[{"text": 42}, {"text": true}]"#).unwrap();
        assert_eq!(records[0].text, "42");
        assert_eq!(records[1].text, "true");
    }

    #[test]
    fn object_instead_of_array() {
        let err = records_from_str(r#"{"text": "x"}"#).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedInput(_)));
    }

    #[test]
    fn element_without_text() {
        let err = records_from_str(r#"[{"text": "ok"}, {"body": "nope"}]"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed input: element 1 has no `text` field"
        );
    }

    #[test]
    fn null_text_counts_as_missing() {
        assert!(records_from_str(r#"[{"text": null}]"#).is_err());
    }

    #[test]
    fn scalar_elements_rejected() {
        assert!(records_from_str(r#"["just a string"]"#).is_err());
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(
            extract_json(b"[{\"text\": }]").unwrap_err(),
            ExtractError::Json(_)
        ));
    }
}
