mod answer;
mod question;

pub use answer::AnswerRecord;
pub use question::{QuestionId, QuestionRecord};

/// Which screen the application is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Category selection, exam and marked-question entry points.
    Menu,
    /// A run is in progress.
    Quiz,
    /// A finished run's report.
    Result,
}
