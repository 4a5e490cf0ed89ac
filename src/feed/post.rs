//! The normalized post model.

use serde::Serialize;
use serde_json::Value;

use super::envelope::RawRow;
use super::images::resolve_image_refs;
use crate::constants::{DEFAULT_DESCRIPTION, DEFAULT_EVENT_DATE, ELLIPSIS};

/// Column positions in the source table.
const COL_TIMESTAMP: usize = 0;
const COL_TOPIC: usize = 1;
const COL_EVENT_DATE: usize = 2;
const COL_DESCRIPTION: usize = 3;
const COL_IMAGES: usize = 4;

/// One feed entry, normalized from a raw table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRecord {
    /// Submission timestamp as displayed by the source. Carried, never sorted on.
    pub created_at: String,
    /// Always non-blank once the record is part of a feed.
    pub topic: String,
    pub event_date: String,
    pub description: String,
    /// Unparsed image cell; see [`PostRecord::images`].
    pub image_refs_raw: String,
}

impl PostRecord {
    /// Map one raw row into a record.
    ///
    /// Every cell is optional. Returns `None` when the topic is blank, which
    /// excludes the row from the feed.
    #[must_use]
    pub fn from_row(row: &RawRow) -> Option<Self> {
        let topic = row.raw_text(COL_TOPIC);
        if topic.trim().is_empty() {
            return None;
        }

        Some(Self {
            created_at: row.display_text(COL_TIMESTAMP),
            topic,
            event_date: non_empty_or(row.display_text(COL_EVENT_DATE), DEFAULT_EVENT_DATE),
            description: non_empty_or(row.raw_text(COL_DESCRIPTION), DEFAULT_DESCRIPTION),
            image_refs_raw: row.raw_text(COL_IMAGES),
        })
    }

    /// Canonical display URLs, resolved from the raw cell on every call.
    #[must_use]
    pub fn images(&self) -> Vec<String> {
        resolve_image_refs(&self.image_refs_raw)
    }

    /// Description cut to `max_chars` characters for card previews.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        truncate_text(&self.description, max_chars)
    }
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// Truncate to `max_chars` characters, appending an ellipsis when cut.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
    }
}

/// Text of a raw cell value. Falsy values (null, false, 0, "") are empty.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) if n.as_f64() != Some(0.0) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
        Value::Null | Value::Bool(false) | Value::Number(_) => String::new(),
    }
}
