//! Pipeline stages for collection analysis.
//!
//! Each submodule implements exactly one transformation step and is pure
//! except for [`input`] and [`extract`], which touch the file system.
//!
//! ## Data Flow
//!
//! ```text
//!                 task ──▶ keywords ─────────┐
//!                                            ▼
//! input ──▶ extract ──▶ (per page) ──▶ score + title + refine ──▶ rank
//! (paths)   (pdfium)                                            (top K)
//! ```
//!
//! 1. [`input`]   : discover collection directories, validate document paths
//! 2. [`extract`] : read non-empty page text through a [`extract::PageTextSource`]
//! 3. [`keywords`]: derive the scoring terms from the task description
//! 4. [`score`]   : count keyword occurrences in a page
//! 5. [`title`]   : pick a heading-like line as the section title
//! 6. [`refine`]  : collapse whitespace and cap the text length
//! 7. [`rank`]    : order sections by score and subsections by page, keep K

pub mod extract;
pub mod input;
pub mod keywords;
pub mod rank;
pub mod refine;
pub mod score;
pub mod title;
