//! Quiz run state machine.
//!
//! A session walks through a fixed working set of questions, collects one
//! answer per question and scores everything at once when the run ends, so
//! answers can be revised while navigating back and forth.

mod exam;
mod report;

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use crate::QuizError;
use crate::models::{AnswerRecord, QuestionRecord};
use crate::scoring::score_answer;

pub use exam::draw_exam;
pub use report::{CategoryOutcome, DEFAULT_PASS_THRESHOLD, Outcome, QuizReport};

/// How a run was started, which decides how it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// User-chosen categories, one aggregate score.
    Practice,
    /// Random sample per category, scored per category.
    Exam,
    /// Replay of the marked questions, one aggregate score.
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    Finished,
}

/// Result of moving forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Now showing the question at this index.
    Moved(usize),
    /// The last question was left; the run is ready to be scored.
    Finished,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuestionRecord>,
    current: usize,
    answers: BTreeMap<usize, AnswerRecord>,
    wrong: BTreeSet<usize>,
    mode: Mode,
    score: usize,
    phase: Phase,
    pass_threshold: f64,
}

impl QuizSession {
    /// Begin a run over `questions`.
    pub fn start(questions: Vec<QuestionRecord>, mode: Mode) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptySelection);
        }
        info!(?mode, questions = questions.len(), "starting run");

        Ok(Self {
            questions,
            current: 0,
            answers: BTreeMap::new(),
            wrong: BTreeSet::new(),
            mode,
            score: 0,
            phase: Phase::Active,
            pass_threshold: DEFAULT_PASS_THRESHOLD,
        })
    }

    #[must_use]
    pub fn with_pass_threshold(mut self, pass_threshold: f64) -> Self {
        self.pass_threshold = pass_threshold;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &QuestionRecord {
        &self.questions[self.current]
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn wrong_indices(&self) -> &BTreeSet<usize> {
        &self.wrong
    }

    pub fn answer(&self, index: usize) -> Option<&AnswerRecord> {
        self.answers.get(&index)
    }

    /// The stored answer for the question on screen, for restoring a selection.
    pub fn current_answer(&self) -> Option<&AnswerRecord> {
        self.answer(self.current)
    }

    /// Record (or replace) the answer to the current question.
    pub fn submit_answer(&mut self, selected: impl Into<String>) {
        if self.phase != Phase::Active {
            return;
        }
        let answer = AnswerRecord::new(self.current, &self.questions[self.current], selected);
        self.answers.insert(self.current, answer);
    }

    /// Move to the next question, flagging the current one if it was skipped.
    pub fn advance(&mut self) -> Advance {
        if self.phase == Phase::Finished {
            return Advance::Finished;
        }
        if !self.answers.contains_key(&self.current) {
            self.wrong.insert(self.current);
        }

        if self.is_last() {
            self.phase = Phase::Finished;
            Advance::Finished
        } else {
            self.current += 1;
            Advance::Moved(self.current)
        }
    }

    /// Step back one question. Returns `false` on the first question.
    pub fn retreat(&mut self) -> bool {
        if self.phase != Phase::Active || self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Mirror a persisted marked flag into the working copy.
    pub fn set_marked(&mut self, index: usize, marked: bool) {
        if let Some(question) = self.questions.get_mut(index) {
            question.marked = marked;
        }
    }

    /// Score every question and end the run.
    pub fn finish(&mut self) -> QuizReport {
        self.score = 0;
        self.wrong.clear();

        // (category, answered, correct) in first-appearance order
        let mut tallies: Vec<(String, usize, usize)> = Vec::new();

        for index in 0..self.questions.len() {
            let answer = self.answers.get(&index);
            let correct = score_answer(answer);
            if correct {
                self.score += 1;
            } else {
                self.wrong.insert(index);
            }

            if let Some(answer) = answer {
                let position = match tallies.iter().position(|(c, _, _)| *c == answer.category) {
                    Some(position) => position,
                    None => {
                        tallies.push((answer.category.clone(), 0, 0));
                        tallies.len() - 1
                    }
                };
                tallies[position].1 += 1;
                tallies[position].2 += usize::from(correct);
            }
        }

        let categories = if self.mode == Mode::Exam {
            tallies
                .into_iter()
                .filter_map(|(category, answered, correct)| {
                    Outcome::from_counts(correct, answered, self.pass_threshold)
                        .map(|outcome| CategoryOutcome { category, outcome })
                })
                .collect()
        } else {
            Vec::new()
        };

        self.phase = Phase::Finished;
        let overall = Outcome::from_counts(self.score, self.questions.len(), self.pass_threshold);
        info!(
            mode = ?self.mode,
            score = self.score,
            total = self.questions.len(),
            wrong = self.wrong.len(),
            "run finished"
        );

        QuizReport {
            mode: self.mode,
            overall,
            categories,
            wrong: self.wrong.iter().copied().collect(),
        }
    }

    /// Restart with only the wrongly answered questions.
    ///
    /// Returns `false` and leaves the session untouched when nothing was wrong.
    pub fn repeat_wrong(&mut self) -> bool {
        if self.wrong.is_empty() {
            return false;
        }

        let questions: Vec<QuestionRecord> = self
            .wrong
            .iter()
            .filter_map(|&index| self.questions.get(index).cloned())
            .collect();
        info!(questions = questions.len(), "repeating wrong questions");

        self.questions = questions;
        self.current = 0;
        self.score = 0;
        self.wrong.clear();
        self.answers.clear();
        self.phase = Phase::Active;
        true
    }
}
