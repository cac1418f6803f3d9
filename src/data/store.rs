use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::StoreError;
use super::loader::{parse_records, read_document, toggle_marked_in_place};
use crate::models::{QuestionId, QuestionRecord};

/// Durable home of the question bank and of each question's `marked` flag.
pub trait QuestionStore {
    /// Read the complete collection.
    fn load_all(&self) -> Result<Vec<QuestionRecord>, StoreError>;

    /// Flip `marked` on the record with `id` and persist. Returns the new flag.
    fn toggle_marked(&mut self, id: QuestionId) -> Result<bool, StoreError>;

    /// Flip `marked` on the first record whose question text equals `question`.
    ///
    /// Returns `None` without touching the collection when nothing matches.
    fn toggle_marked_by_text(&mut self, question: &str) -> Result<Option<bool>, StoreError>;

    /// Records currently flagged as marked.
    ///
    /// A missing or unreadable collection simply has no marked questions.
    fn load_marked(&self) -> Result<Vec<QuestionRecord>, StoreError> {
        match self.load_all() {
            Ok(records) => Ok(records.into_iter().filter(|r| r.marked).collect()),
            Err(err @ (StoreError::NotFound { .. } | StoreError::Parse { .. })) => {
                warn!(error = %err, "no marked questions available");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }
}

/// A question bank stored as one JSON array on disk.
///
/// Every mutation rewrites the whole file, changing only the bytes of the
/// toggled flag.
#[derive(Debug, Clone)]
pub struct JsonQuestionStore {
    path: PathBuf,
}

impl JsonQuestionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn toggle_at(&self, index: usize) -> Result<bool, StoreError> {
        let marked = toggle_marked_in_place(&self.path, index)?;
        info!(question = index, marked, path = %self.path.display(), "toggled marked flag");
        Ok(marked)
    }
}

impl QuestionStore for JsonQuestionStore {
    fn load_all(&self) -> Result<Vec<QuestionRecord>, StoreError> {
        let document = read_document(&self.path)?;
        let records = parse_records(&self.path, &document)?;
        debug!(count = records.len(), path = %self.path.display(), "loaded questions");
        Ok(records)
    }

    fn toggle_marked(&mut self, id: QuestionId) -> Result<bool, StoreError> {
        self.toggle_at(id.0)
    }

    fn toggle_marked_by_text(&mut self, question: &str) -> Result<Option<bool>, StoreError> {
        let document = read_document(&self.path)?;
        let position = document
            .iter()
            .position(|entry| entry.get("question").and_then(Value::as_str) == Some(question));

        match position {
            Some(index) => self.toggle_at(index).map(Some),
            None => {
                debug!(question, "no question with this text to toggle");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // Mixed layouts on purpose: compact, spread out, and one record per line.
    const SAMPLE: &str = r#"[
  {"category":"Math","subcategory":"Algebra","question":"2 + 2?","options":["3","4"],"correct":"4","image":null,"marked":false},
  {
      "category": "Math",
      "subcategory": "Geometry",
      "question": "Corners of a square?",
      "options": [ "4", "5" ],
      "correct": "4",
      "marked": true
  },
  {"category": "History", "subcategory": "Rome", "question": "2 + 2?", "options": ["a", "b"], "correct": "a", "marked": false}
]
"#;

    fn store_with(contents: &str) -> (tempfile::TempDir, JsonQuestionStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        fs::write(&path, contents).unwrap();
        (dir, JsonQuestionStore::new(path))
    }

    #[test]
    fn test_load_all_reads_every_record() {
        let (_dir, store) = store_with(SAMPLE);
        let records = store.load_all().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].category, "History");
        assert_eq!(records[2].id, QuestionId(2));
    }

    #[test]
    fn test_load_all_missing_file_fails() {
        let store = JsonQuestionStore::new("/nonexistent/questions.json");
        assert!(matches!(store.load_all(), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_load_marked_filters_and_tolerates_absence() {
        let (_dir, store) = store_with(SAMPLE);
        let marked = store.load_marked().unwrap();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].question, "Corners of a square?");

        let absent = JsonQuestionStore::new("/nonexistent/questions.json");
        assert!(absent.load_marked().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_file_bytes() {
        let (_dir, mut store) = store_with(SAMPLE);
        let before = fs::read(store.path()).unwrap();

        assert!(store.toggle_marked(QuestionId(0)).unwrap());
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            SAMPLE.replacen("\"marked\":false", "\"marked\":true", 1)
        );
        let during = store.load_all().unwrap();
        assert!(during[0].marked);
        assert!(during[1].marked);
        assert!(!during[2].marked);

        assert!(!store.toggle_marked(QuestionId(0)).unwrap());
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_toggle_inserts_missing_marked_key() {
        let (_dir, mut store) = store_with(
            r#"[{"category":"A","subcategory":"a","question":"Q","options":["x"],"correct":"x"}]"#,
        );
        assert!(store.toggle_marked(QuestionId(0)).unwrap());
        assert!(store.load_all().unwrap()[0].marked);
    }

    #[test]
    fn test_toggle_unknown_id_fails() {
        let (_dir, mut store) = store_with(SAMPLE);
        assert!(matches!(
            store.toggle_marked(QuestionId(9)),
            Err(StoreError::UnknownQuestion(QuestionId(9)))
        ));
    }

    #[test]
    fn test_toggle_by_text_flips_first_match_only() {
        let (_dir, mut store) = store_with(SAMPLE);
        assert_eq!(store.toggle_marked_by_text("2 + 2?").unwrap(), Some(true));
        let records = store.load_all().unwrap();
        assert!(records[0].marked);
        assert!(!records[2].marked);
    }

    #[test]
    fn test_toggle_by_text_without_match_is_noop() {
        let (_dir, mut store) = store_with(SAMPLE);
        let before = fs::read(store.path()).unwrap();
        assert_eq!(store.toggle_marked_by_text("unknown").unwrap(), None);
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }
}
