use super::QuestionRecord;

/// The option a user picked for one question of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRecord {
    pub question_index: usize,
    pub selected: String,
    pub correct: String,
    pub options: Vec<String>,
    pub category: String,
}

impl AnswerRecord {
    /// Snapshot the scoring inputs of `question` together with the selected text.
    pub fn new(question_index: usize, question: &QuestionRecord, selected: impl Into<String>) -> Self {
        Self {
            question_index,
            selected: selected.into(),
            correct: question.correct.clone(),
            options: question.options.clone(),
            category: question.category.clone(),
        }
    }
}
