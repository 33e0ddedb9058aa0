//! Section title heuristic: pick a heading-looking line from a page.
//!
//! A line counts as a heading when it is fully upper-case and short. This is
//! not layout-aware: an all-caps warning line is taken for a heading, and a
//! Title Case heading is not recognised.

/// Returned when a page has no lines at all.
pub const UNTITLED_SECTION: &str = "Untitled Section";

/// Headings longer than this many words are treated as body text.
pub const MAX_HEADING_WORDS: usize = 10;

/// Choose a title for a page from its trimmed, non-empty lines.
///
/// Returns the first heading-like line, else the first line, else
/// [`UNTITLED_SECTION`].
pub fn extract_section_title<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|line| line.as_ref())
        .find(|line| is_heading(line))
        .or_else(|| lines.first().map(|line| line.as_ref()))
        .unwrap_or(UNTITLED_SECTION)
        .to_string()
}

/// Split page text into trimmed, non-empty lines.
pub fn page_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn is_heading(line: &str) -> bool {
    is_all_upper(line) && line.split_whitespace().count() <= MAX_HEADING_WORDS
}

/// At least one cased character and no lower-case ones, so digits and
/// punctuation alone never qualify.
fn is_all_upper(line: &str) -> bool {
    let mut cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}
