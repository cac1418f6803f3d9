use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a record in the persisted collection.
///
/// Assigned when the collection is loaded and never written back, so it stays
/// valid for as long as the file is not reordered behind our back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct QuestionId(pub usize);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(skip)]
    pub id: QuestionId,
    pub category: String,
    pub subcategory: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub marked: bool,
}

impl QuestionRecord {
    /// Checks the record invariants, returning a human readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.category.trim().is_empty() {
            return Err("category is empty".to_string());
        }
        if self.subcategory.trim().is_empty() {
            return Err("subcategory is empty".to_string());
        }
        if self.options.is_empty() {
            return Err("options are empty".to_string());
        }
        if !self.options.contains(&self.correct) {
            return Err(format!("correct answer {:?} is not one of the options", self.correct));
        }
        Ok(())
    }

    /// Options other than the correct one.
    pub fn distractors(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .map(String::as_str)
            .filter(|option| *option != self.correct)
    }
}
