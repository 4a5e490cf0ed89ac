//! Decoding of the wrapped JSON table returned by the visualization endpoint.
//!
//! The payload looks like
//! `/*O_o*/\ngoogle.visualization.Query.setResponse({...});` where the
//! object carries `table.rows[].c[]` and each cell may hold a raw value `v`
//! and a formatted value `f`.

use serde::Deserialize;
use serde_json::Value;

use super::post::value_text;
use super::ParseError;
use crate::constants::{ENVELOPE_PREFIX_LEN, ENVELOPE_SUFFIX_LEN};

#[derive(Debug, Deserialize)]
struct Envelope {
    table: Option<RawTable>,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    rows: Option<Vec<Value>>,
}

/// One table row. Cells are kept as loose JSON so a malformed cell only
/// blanks that field instead of failing the whole payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    c: Option<Vec<Value>>,
}

impl RawRow {
    /// Build a row from any JSON value. A non-object row or a `c` that is
    /// not an array yields a row without cells.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let c = match value {
            Value::Object(mut row) => match row.remove("c") {
                Some(Value::Array(cells)) => Some(cells),
                _ => None,
            },
            _ => None,
        };
        Self { c }
    }

    fn cell(&self, index: usize) -> Option<&serde_json::Map<String, Value>> {
        self.c.as_ref()?.get(index)?.as_object()
    }

    fn field(&self, index: usize, key: &str) -> String {
        self.cell(index)
            .and_then(|cell| cell.get(key))
            .map(value_text)
            .unwrap_or_default()
    }

    /// Raw value `v` of a cell as text.
    #[must_use]
    pub fn raw_text(&self, index: usize) -> String {
        self.field(index, "v")
    }

    /// Formatted value `f`, falling back to the raw value.
    #[must_use]
    pub fn display_text(&self, index: usize) -> String {
        let formatted = self.field(index, "f");
        if formatted.is_empty() {
            self.raw_text(index)
        } else {
            formatted
        }
    }
}

/// Strip the fixed wrapper and decode the table rows.
///
/// Null rows are returned as `None`; the header row is still included.
///
/// # Errors
///
/// Returns a [`ParseError`] for non-UTF-8 bodies, payloads too short to carry
/// the wrapper, invalid JSON, or a missing `table.rows` structure.
pub fn decode_rows(body: &[u8]) -> Result<Vec<Option<RawRow>>, ParseError> {
    let text = std::str::from_utf8(body).map_err(|_| ParseError::Encoding)?;
    let json = unwrap_envelope(text)?;

    let envelope: Envelope = serde_json::from_str(json)?;
    let table = envelope.table.ok_or(ParseError::MissingField("table"))?;
    let rows = table.rows.ok_or(ParseError::MissingField("table.rows"))?;

    Ok(rows
        .into_iter()
        .map(|row| (!row.is_null()).then(|| RawRow::from_value(row)))
        .collect())
}

fn unwrap_envelope(text: &str) -> Result<&str, ParseError> {
    let end = text
        .len()
        .checked_sub(ENVELOPE_SUFFIX_LEN)
        .filter(|end| *end >= ENVELOPE_PREFIX_LEN)
        .ok_or(ParseError::Envelope { len: text.len() })?;

    text.get(ENVELOPE_PREFIX_LEN..end)
        .ok_or(ParseError::Envelope { len: text.len() })
}

/// Wrap a JSON document the way the visualization endpoint does.
#[must_use]
pub fn wrap_envelope(json: &str) -> String {
    format!("/*O_o*/\ngoogle.visualization.Query.setResponse({json});")
}
