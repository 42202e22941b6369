//! Prompt templates.
//!
//! The instruction text is a compatibility surface: the reply grammar the
//! parser expects is defined here, so the wording must not drift.

use sentilabel_core::Record;

pub const SYSTEM_PROMPT: &str = "\
You are a sentiment classification engine.
Task: Classify sentiment ONLY.
Input: A JSON array of objects, each with keys id and text.
Output rules (STRICT):
1. One record per line, format exactly:
   id_no:<id>|text:<text>|sentiment:<positive|negative|neutral>
2. No explanations, no code, no HTML/tables/colors, no extra text.
After all records, output one final line:
counts|positive:<n>|negative:<n>|neutral:<n>";

/// User message for one chunk: a JSON array of `{id, text}` objects.
pub fn build_user_payload(records: &[Record]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
