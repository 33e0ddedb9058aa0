//! Keyword derivation: task description → set of lowercase scoring terms.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Tokens must be strictly longer than this to become keywords.
pub const MIN_KEYWORD_LEN: usize = 3;

static RE_NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s]").unwrap());

/// The scoring terms derived from a task description.
///
/// Stored sorted so iteration order, and with it any debug output, is stable
/// across runs. Ordering carries no meaning for scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet(BTreeSet<String>);

impl KeywordSet {
    /// Derive keywords from free text.
    ///
    /// The text is lowercased, every character that is neither ASCII
    /// alphanumeric nor whitespace is dropped, and the remaining
    /// whitespace-separated tokens longer than [`MIN_KEYWORD_LEN`] are kept.
    /// Dropping (rather than replacing) punctuation joins its neighbours:
    /// `"gluten-free"` becomes `"glutenfree"`.
    pub fn from_task(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let cleaned = RE_NON_ALNUM.replace_all(&lowered, "");
        Self(
            cleaned
                .split_whitespace()
                .filter(|w| w.chars().count() > MIN_KEYWORD_LEN)
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.0.contains(keyword)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}
