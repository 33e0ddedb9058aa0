//! Ranking and truncation of the per-page records.
//!
//! Sections and subsections are ordered independently: a page can make the
//! top list of one and not the other. Both sorts are stable, so ties keep
//! the order in which pages were processed (document order, then page order).

use crate::output::{ExtractedSection, SubsectionAnalysis};

/// Keep the `k` sections with the highest importance rank.
pub fn rank_sections(mut sections: Vec<ExtractedSection>, k: usize) -> Vec<ExtractedSection> {
    sections.sort_by(|a, b| b.importance_rank.cmp(&a.importance_rank));
    sections.truncate(k);
    sections
}

/// Keep the first `k` subsections in page-number order.
///
/// Equal page numbers from different documents stay in document order.
pub fn order_subsections(
    mut subsections: Vec<SubsectionAnalysis>,
    k: usize,
) -> Vec<SubsectionAnalysis> {
    subsections.sort_by_key(|s| s.page_number);
    subsections.truncate(k);
    subsections
}
