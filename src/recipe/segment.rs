//! Line-oriented recipe segmentation.
//!
//! A small state machine walks the trimmed, non-empty lines of a document.
//! Two line predicates drive every transition:
//!
//! * **section start**: the line mentions "recipe" or "ingredients"
//! * **instruction marker**: the line mentions "instruction" or "method"
//!
//! ```text
//!              section start                 instruction marker
//! Scanning ─────────────────▶ Collecting ──────────────────────▶ Collecting
//!                             Ingredients                        Instructions
//!                                 ▲          section start            │
//!                                 └───────── (new record) ────────────┘
//! ```
//!
//! A document with no instruction marker stays in
//! [`SegmenterPhase::CollectingIngredients`] until the end, so the title of a
//! following recipe becomes one more ingredient. That is a known limit of the
//! heuristic, and [`RecipeSegmenter::phase`] exposes it to callers.

use serde::{Deserialize, Serialize};

/// One recipe-like block of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    /// The line that opened the record.
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl RecipeRecord {
    fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}

/// Where the segmenter is within the current document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmenterPhase {
    /// Looking for the first section start; lines are discarded.
    Scanning,
    /// Lines are ingredients until an instruction marker appears.
    CollectingIngredients,
    /// Lines are instructions until the next section start.
    CollectingInstructions,
}

/// Segmenter state. The record being built lives inside the collecting
/// states, so there is never an open record while scanning.
#[derive(Debug)]
enum State {
    Scanning,
    Ingredients(RecipeRecord),
    Instructions(RecipeRecord),
}

/// Incremental recipe segmenter: feed lines, then [`finish`](Self::finish).
#[derive(Debug)]
pub struct RecipeSegmenter {
    state: State,
    done: Vec<RecipeRecord>,
}

impl Default for RecipeSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeSegmenter {
    pub fn new() -> Self {
        Self {
            state: State::Scanning,
            done: Vec::new(),
        }
    }

    pub fn phase(&self) -> SegmenterPhase {
        match self.state {
            State::Scanning => SegmenterPhase::Scanning,
            State::Ingredients(_) => SegmenterPhase::CollectingIngredients,
            State::Instructions(_) => SegmenterPhase::CollectingInstructions,
        }
    }

    /// Feed one line. Blank lines are ignored; others are trimmed.
    pub fn feed(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.step(line);
    }

    fn step(&mut self, line: &str) {
        self.state = match std::mem::replace(&mut self.state, State::Scanning) {
            State::Scanning if starts_section(line) => {
                State::Ingredients(RecipeRecord::titled(line))
            }
            State::Scanning => State::Scanning,
            State::Ingredients(record) if starts_instructions(line) => {
                // The marker line itself is handled as instruction-phase input.
                self.state = State::Instructions(record);
                return self.step(line);
            }
            State::Ingredients(mut record) => {
                record.ingredients.push(line.to_string());
                State::Ingredients(record)
            }
            State::Instructions(record) if starts_section(line) => {
                self.done.push(record);
                State::Ingredients(RecipeRecord::titled(line))
            }
            State::Instructions(mut record) => {
                record.instructions.push(line.to_string());
                State::Instructions(record)
            }
        };
    }

    /// Close the record in progress, if any, and return all records in
    /// document order.
    pub fn finish(mut self) -> Vec<RecipeRecord> {
        match self.state {
            State::Ingredients(record) | State::Instructions(record) => self.done.push(record),
            State::Scanning => {}
        }
        self.done
    }
}

/// Segment a whole document's text into recipe records.
pub fn extract_recipes(text: &str) -> Vec<RecipeRecord> {
    let mut segmenter = RecipeSegmenter::new();
    for line in text.lines() {
        segmenter.feed(line);
    }
    segmenter.finish()
}

fn starts_section(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("recipe") || lower.contains("ingredients")
}

fn starts_instructions(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("instruction") || lower.contains("method")
}
