//! Token table normalization.
//!
//! A token table arrives either as a raw line-oriented text table or as a
//! structured mapping; both normalize into the same flat mapping of
//! trimmed key -> trimmed value. No value syntax (units, color formats)
//! is validated here: the external compiler is the authority on that, and
//! malformed values surface as compiler errors downstream.

use indexmap::IndexMap;

use crate::types::TokenSource;

/// Separates a token definition from an inline comment.
const COMMENT_SEPARATOR: &str = "//";

/// Separates a token key from its value.
const DEFINITION_SEPARATOR: char = ':';

impl TokenSource {
    /// Normalize this source into a flat token mapping.
    ///
    /// Text tables are split into lines; blank lines are discarded, each
    /// remaining line splits on the first `:` into key and value, and the
    /// value's inline `//` comment (if any) is stripped. Structured
    /// mappings are taken entry by entry with scalar values stringified.
    /// Keys and values are always trimmed. Parsing is idempotent: the
    /// same source always yields a bit-identical mapping.
    pub fn parse(&self) -> IndexMap<String, String> {
        match self {
            TokenSource::Table(text) => parse_table(text),
            TokenSource::Map(entries) => entries
                .iter()
                .map(|(key, value)| (key.trim().to_string(), scalar_text(value)))
                .collect(),
        }
    }
}

fn parse_table(text: &str) -> IndexMap<String, String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            // Lines without a separator carry no definition; skip them.
            let (key, rest) = line.split_once(DEFINITION_SEPARATOR)?;
            let value = rest.split(COMMENT_SEPARATOR).next().unwrap_or_default();
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

fn scalar_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.trim().to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string().trim().to_string(),
    }
}
