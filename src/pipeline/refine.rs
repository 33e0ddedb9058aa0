//! Text refinement: whitespace normalisation and length bounding.

use once_cell::sync::Lazy;
use regex::Regex;

/// Appended when refined text was cut.
pub const ELLIPSIS: &str = "...";

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse whitespace runs to single spaces, trim, and cap at `limit`
/// characters, appending [`ELLIPSIS`] when anything was cut.
///
/// `limit` counts Unicode scalar values, not bytes, so the cut never splits
/// a character.
pub fn refine_text(text: &str, limit: usize) -> String {
    let normalised = RE_WHITESPACE.replace_all(text.trim(), " ");
    let cut = normalised.char_indices().nth(limit).map(|(idx, _)| idx);
    match cut {
        Some(cut) => format!("{}{ELLIPSIS}", &normalised[..cut]),
        None => normalised.into_owned(),
    }
}
