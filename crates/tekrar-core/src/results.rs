//! Results-log decoding.
//!
//! The quiz log arrives as a CSV export (double-quote quoting, `""` as the
//! escaped quote) or as a JSON document wrapping an array of row objects.
//! Records are split on newlines before field scanning, so multi-line
//! quoted fields are not supported.

use std::collections::HashMap;

use crate::error::LogError;

/// One decoded record, keyed by the header's column names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    /// Field value for a column, if the header declared it.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Build a row directly from column/value pairs, for callers that
    /// already hold structured data.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Row {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Split one CSV record into fields.
///
/// A quote toggles quoted state and may open mid-field; the quote character
/// itself never reaches the output. Inside quotes, `""` emits one literal
/// quote and a comma is ordinary text.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if ch == ',' && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }

    fields.push(current);
    fields
}

/// Decode a CSV document into rows keyed by its header line.
///
/// Line endings are normalized (`\r\n` and lone `\r` become `\n`) and blank
/// lines are dropped; the first surviving line is the header, each of its
/// fields trimmed and used verbatim as a column name. Rows shorter than the
/// header read as empty strings for the missing columns; extra fields are
/// ignored. Blank input decodes to no rows.
pub fn parse_csv(text: &str) -> Vec<Row> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = normalized.lines().filter(|line| !line.trim().is_empty());

    let header: Vec<String> = match lines.next() {
        Some(line) => parse_line(line)
            .into_iter()
            .map(|field| field.trim().to_string())
            .collect(),
        None => return Vec::new(),
    };

    lines
        .map(|line| {
            let values = parse_line(line);
            let fields = header
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), values.get(i).cloned().unwrap_or_default()))
                .collect();
            Row { fields }
        })
        .collect()
}

/// Decode a JSON results document into rows.
///
/// Accepts `{"rows": [...]}`, `{"items": [...]}`, or a bare top-level array
/// of row objects. Scalar values stringify, nulls read as empty strings,
/// and non-object entries are dropped.
pub fn rows_from_json(text: &str) -> Result<Vec<Row>, LogError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| LogError::InvalidJson(e.to_string()))?;

    let entries = match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::Array(rows)) = map.get("rows") {
                rows.clone()
            } else if let Some(serde_json::Value::Array(items)) = map.get("items") {
                items.clone()
            } else {
                Vec::new()
            }
        }
        serde_json::Value::Array(rows) => rows,
        _ => Vec::new(),
    };

    let rows = entries
        .into_iter()
        .filter_map(|entry| match entry {
            serde_json::Value::Object(map) => Some(Row {
                fields: map
                    .into_iter()
                    .map(|(key, value)| (key, stringify_scalar(&value)))
                    .collect(),
            }),
            _ => None,
        })
        .collect();

    Ok(rows)
}

fn stringify_scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Decode a fetched results document, CSV or JSON.
///
/// The shape is sniffed from the first non-whitespace character: `{` or `[`
/// reads as JSON, anything else as CSV. An entirely blank document is an
/// error so an upstream fetch failure is never mistaken for an empty log.
pub fn parse_results(text: &str) -> Result<Vec<Row>, LogError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Err(LogError::EmptyDocument);
    }
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return rows_from_json(text);
    }
    Ok(parse_csv(text))
}
