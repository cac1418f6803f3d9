use std::collections::BTreeSet;

use crate::models::QuestionRecord;

/// Set of category or subcategory names a practice run should cover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector(BTreeSet<String>);

impl Selector {
    /// A selector matching one category (or subcategory) name.
    pub fn single(name: impl Into<String>) -> Self {
        Self(BTreeSet::from([name.into()]))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Add `name` if absent, remove it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.0.remove(name) {
            false
        } else {
            self.0.insert(name.to_string());
            true
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Selector {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Keep the records whose category or subcategory is selected.
pub fn filter_by_selector(records: Vec<QuestionRecord>, selector: &Selector) -> Vec<QuestionRecord> {
    records
        .into_iter()
        .filter(|r| selector.contains(&r.category) || selector.contains(&r.subcategory))
        .collect()
}

/// Distinct category names in order of first appearance.
pub fn categories(records: &[QuestionRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.category.as_str()))
}

/// Distinct subcategory names in order of first appearance.
pub fn subcategories(records: &[QuestionRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.subcategory.as_str()))
}

fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    names
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}
