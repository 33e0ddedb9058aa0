//! Dietary needs: detection from free text and keyword-based recipe filtering.

use super::segment::RecipeRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const NON_VEGETARIAN: &[&str] = &["meat", "beef", "pork", "chicken", "fish", "lamb"];
const NON_VEGAN: &[&str] = &["meat", "dairy", "cheese", "milk", "egg", "honey"];

/// A dietary need a persona or task can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryNeed {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    NutFree,
    Kosher,
    Halal,
    LowCarb,
    Keto,
}

impl DietaryNeed {
    pub const ALL: [DietaryNeed; 9] = [
        DietaryNeed::Vegetarian,
        DietaryNeed::Vegan,
        DietaryNeed::GlutenFree,
        DietaryNeed::DairyFree,
        DietaryNeed::NutFree,
        DietaryNeed::Kosher,
        DietaryNeed::Halal,
        DietaryNeed::LowCarb,
        DietaryNeed::Keto,
    ];

    /// Canonical lowercase name, as it appears in task text.
    pub fn as_str(self) -> &'static str {
        match self {
            DietaryNeed::Vegetarian => "vegetarian",
            DietaryNeed::Vegan => "vegan",
            DietaryNeed::GlutenFree => "gluten-free",
            DietaryNeed::DairyFree => "dairy-free",
            DietaryNeed::NutFree => "nut-free",
            DietaryNeed::Kosher => "kosher",
            DietaryNeed::Halal => "halal",
            DietaryNeed::LowCarb => "low-carb",
            DietaryNeed::Keto => "keto",
        }
    }

    /// Every need whose name occurs, case-insensitively, in `text`, in
    /// [`ALL`](Self::ALL) order.
    ///
    /// ```
    /// use persona_digest::recipe::DietaryNeed;
    ///
    /// let needs = DietaryNeed::detect("Prepare a Vegetarian, gluten-free buffet");
    /// assert_eq!(needs, vec![DietaryNeed::Vegetarian, DietaryNeed::GlutenFree]);
    /// ```
    pub fn detect(text: &str) -> Vec<DietaryNeed> {
        let lower = text.to_lowercase();
        Self::ALL
            .into_iter()
            .filter(|need| lower.contains(need.as_str()))
            .collect()
    }

    fn is_met_by(self, haystack: &str) -> bool {
        let forbidden = match self {
            DietaryNeed::Vegetarian => NON_VEGETARIAN,
            DietaryNeed::Vegan => NON_VEGAN,
            other => return haystack.contains(other.as_str()),
        };
        !forbidden.iter().any(|word| haystack.contains(word))
    }
}

impl fmt::Display for DietaryNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietaryNeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|need| need.as_str() == wanted)
            .ok_or_else(|| format!("Unknown dietary need: {}", s))
    }
}

/// Whether `recipe` satisfies every need in `needs`.
///
/// Matching runs on the lowercased title plus all ingredients. Vegetarian and
/// vegan fail when a disqualifying ingredient word appears; any other need
/// passes only when its own name is mentioned. No needs always passes.
pub fn meets_dietary_requirements(recipe: &RecipeRecord, needs: &[DietaryNeed]) -> bool {
    if needs.is_empty() {
        return true;
    }
    let mut haystack = recipe.title.to_lowercase();
    for ingredient in &recipe.ingredients {
        haystack.push(' ');
        haystack.push_str(&ingredient.to_lowercase());
    }
    needs.iter().all(|need| need.is_met_by(&haystack))
}
