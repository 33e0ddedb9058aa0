//! Relevance scoring: keyword occurrence counting over page text.

use super::keywords::KeywordSet;

/// Sum, over all keywords, of the non-overlapping occurrences of the keyword
/// in the lowercased `text`.
///
/// Matching is plain substring search: `"team"` also counts inside
/// `"steam"`. Word-boundary matching would change which pages rank first.
pub fn score_text(text: &str, keywords: &KeywordSet) -> usize {
    let text = text.to_lowercase();
    keywords.iter().map(|k| text.matches(k).count()).sum()
}
