//! Image reference resolution.
//!
//! Spreadsheet cells hold image references in whatever shape the site owner
//! pasted: storage-provider share links, bare file ids, or plain URLs, joined
//! by commas, semicolons or newlines. [`resolve_image_refs`] turns such a cell
//! into an ordered list of URLs that can be placed directly in an `img` tag.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;
use url::Url;

use crate::constants::{THUMBNAIL_SIZE_PARAM, THUMBNAIL_URL_PREFIX};

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;\n]+").unwrap());

/// Extraction patterns in priority order.
static ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"drive\.google\.com/open\?id=([A-Za-z0-9_-]+)").unwrap(),
        Regex::new(r"drive\.google\.com/file/d/([A-Za-z0-9_-]+)").unwrap(),
        Regex::new(r"[?&]id=([A-Za-z0-9_-]+)").unwrap(),
    ]
});

static BARE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{25,50}$").unwrap());

/// Resolve a raw image cell into canonical display URLs.
///
/// Order is preserved and duplicates are kept. Pieces that are neither an
/// identifier nor an absolute http(s) URL are dropped without error.
#[must_use]
pub fn resolve_image_refs(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    SEPARATORS
        .split(raw)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .filter_map(resolve_piece)
        .collect()
}

fn resolve_piece(piece: &str) -> Option<String> {
    if is_canonical(piece) {
        return Some(piece.to_string());
    }

    if let Some(id) = extract_file_id(piece) {
        return Some(canonical_url(id));
    }

    if is_absolute_url(piece) {
        return Some(piece.to_string());
    }

    trace!(piece, "Dropping unrecognized image reference");
    None
}

/// Pull a storage-provider file id out of one reference.
#[must_use]
pub fn extract_file_id(piece: &str) -> Option<&str> {
    ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(piece).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
        .or_else(|| BARE_ID.is_match(piece).then_some(piece))
}

/// Canonical thumbnail URL for a file id.
#[must_use]
pub fn canonical_url(file_id: &str) -> String {
    format!("{THUMBNAIL_URL_PREFIX}{file_id}{THUMBNAIL_SIZE_PARAM}")
}

fn is_canonical(piece: &str) -> bool {
    piece
        .strip_prefix(THUMBNAIL_URL_PREFIX)
        .and_then(|rest| rest.strip_suffix(THUMBNAIL_SIZE_PARAM))
        .is_some_and(|id| !id.is_empty() && id.bytes().all(is_id_byte))
}

const fn is_id_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn is_absolute_url(piece: &str) -> bool {
    Url::parse(piece).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}
