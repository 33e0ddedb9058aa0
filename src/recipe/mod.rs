//! Recipe segmentation and dietary filtering for food-related collections.
//!
//! Not part of the ranking pipeline in [`crate::analyze`]; callers run it on
//! page text they already have.

pub mod diet;
pub mod segment;

pub use diet::{meets_dietary_requirements, DietaryNeed};
pub use segment::{extract_recipes, RecipeRecord, RecipeSegmenter, SegmenterPhase};
