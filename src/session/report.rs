use super::Mode;

/// Minimum percentage needed to pass a run or an exam category.
pub const DEFAULT_PASS_THRESHOLD: f64 = 75.0;

/// Score of one scope: a whole run or one exam category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub passed: bool,
}

impl Outcome {
    /// `None` when the scope holds no questions.
    pub fn from_counts(score: usize, total: usize, pass_threshold: f64) -> Option<Self> {
        if total == 0 {
            return None;
        }
        let percentage = score as f64 / total as f64 * 100.0;
        Some(Self {
            score,
            total,
            percentage,
            passed: percentage >= pass_threshold,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryOutcome {
    pub category: String,
    pub outcome: Outcome,
}

/// Everything the result screen shows after a run.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizReport {
    pub mode: Mode,
    pub overall: Option<Outcome>,
    /// Exam runs only. Categories without an answered question are left out.
    pub categories: Vec<CategoryOutcome>,
    /// Indices (into the finished run) answered wrongly or not at all.
    pub wrong: Vec<usize>,
}

impl QuizReport {
    /// Practice and review runs may replay their wrong questions; exams may not.
    pub fn can_repeat_wrong(&self) -> bool {
        self.mode != Mode::Exam && !self.wrong.is_empty()
    }
}
