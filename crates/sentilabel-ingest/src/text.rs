//! Plain-text uploads.
//!
//! A `.txt` file is either one text per line, or a pasted JSON array
//! (`[...]`, optionally behind an assignment such as `data = [...]`).

use sentilabel_core::{Record, number_records};

use crate::error::ExtractError;
use crate::json;

pub(crate) fn extract_text(bytes: &[u8]) -> Result<Vec<Record>, ExtractError> {
    let content = crate::strip_bom(std::str::from_utf8(bytes)?).trim();

    if let Some(array) = embedded_array(content) {
        return json::records_from_str(array);
    }

    Ok(number_records(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from),
    ))
}

/// Return the JSON array literal if `content` is structured data.
///
/// Content is structured when it starts with `[` or with an assignment
/// `name = ...`; everything after the first `=` (minus a trailing `;`) must
/// then be a JSON array. The target must be a plain identifier so that prose
/// containing `=` stays prose.
fn embedded_array(content: &str) -> Option<&str> {
    if content.starts_with('[') {
        return Some(content);
    }
    let (name, rest) = content.split_once('=')?;
    if !is_identifier(name.trim()) {
        return None;
    }
    let rest = rest.trim();
    Some(rest.strip_suffix(';').unwrap_or(rest).trim_end())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn one_record_per_non_blank_line() {
        let input = b"I love this.\n\n   \nI hate that.\r\n  It is a table.  \n";
        let records = extract_text(input).unwrap();
        assert_eq!(
            texts(&records),
            vec!["I love this.", "I hate that.", "It is a table."]
        );
        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn n_lines_give_ids_one_to_n() {
        for n in [1usize, 2, 9, 31] {
            let body: String = (1..=n).map(|i| format!("line {i}\n\n")).collect();
            let records = extract_text(body.as_bytes()).unwrap();
            assert_eq!(records.len(), n);
            for (i, r) in records.iter().enumerate() {
                assert_eq!(r.id, i as u64 + 1);
                assert_eq!(r.text, format!("line {}", i + 1));
            }
        }
    }

    #[test]
    fn empty_and_blank_files_yield_nothing() {
        assert!(extract_text(b"").unwrap().is_empty());
        assert!(extract_text(b"  \n\t\n  ").unwrap().is_empty());
    }

    #[test]
    fn bare_json_array() {
        let input = br#"  [{"text": "great"}, {"text": "awful"}]  "#;
        let records = extract_text(input).unwrap();
        assert_eq!(texts(&records), vec!["great", "awful"]);
    }

    #[test]
    fn assigned_json_array() {
        let input = br#"data = [
            {"id": 10, "text": "great"},
            {"id": 20, "text": "awful"}
        ];"#;
        let records = extract_text(input).unwrap();
        assert_eq!(texts(&records), vec!["great", "awful"]);
        assert_eq!(records[1].id, 2, "ids are reassigned, not taken from input");
    }

    #[test]
    fn prose_with_equals_sign_is_plain_text() {
        let input = b"2 + 2 = 4 is fine\nthe result = good";
        let records = extract_text(input).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn broken_embedded_array_is_malformed() {
        let err = extract_text(b"data = [{\"text\": \"x\"").unwrap_err();
        assert!(matches!(err, ExtractError::Json(_)));
        assert!(err.is_malformed());
    }

    #[test]
    fn assignment_of_non_array_is_malformed() {
        let err = extract_text(br#"data = {"text": "x"}"#).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedInput(_)));

        let err = extract_text(b"data = hello").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let err = extract_text(&[0x66, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, ExtractError::Utf8(_)));
    }

    #[test]
    fn identifier_rules() {
        assert!(is_identifier("data"));
        assert!(is_identifier("window.data"));
        assert!(is_identifier("_rows2"));
        assert!(!is_identifier("2 + 2"));
        assert!(!is_identifier("the result"));
        assert!(!is_identifier(""));
    }
}
