//! # quiz-trainer
//!
//! A terminal multiple-choice trainer over a JSON question bank, with practice
//! runs per category, randomly drawn exams scored per category, and replay of
//! questions the user marked for later.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_trainer::{Quiz, QuizConfig, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     let config = QuizConfig {
//!         questions: "questions.json".into(),
//!         ..QuizConfig::default()
//!     };
//!
//!     // Run the quiz in the terminal
//!     Quiz::new(config).run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod config;
mod data;
mod models;
pub mod scoring;
mod session;
pub mod terminal;
pub mod text;
mod ui;

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;
use tracing::info;

pub use app::{App, MenuState, Notice};
pub use config::{ConfigError, QuizConfig};
pub use data::{
    JsonQuestionStore, QuestionStore, Selector, StoreError, categories, filter_by_selector,
    subcategories,
};
pub use models::{AnswerRecord, AppState, QuestionId, QuestionRecord};
pub use session::{
    Advance, CategoryOutcome, DEFAULT_PASS_THRESHOLD, Mode, Outcome, Phase, QuizReport,
    QuizSession, draw_exam,
};

/// Error type for quiz operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    /// The question bank is missing or malformed; no run can start.
    #[error("question bank unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
    /// A run was requested with nothing to ask.
    #[error("no questions selected")]
    EmptySelection,
    /// Marked-question replay was requested but nothing is marked.
    #[error("no questions are marked")]
    NoMarkedQuestions,
    /// Persisting a change to the question bank failed.
    #[error("failed to update question bank: {0}")]
    Store(#[source] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// IO error during quiz execution.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a quiz backed by the JSON question bank named in `config`.
    pub fn new(config: QuizConfig) -> Self {
        let store = JsonQuestionStore::new(config.questions.clone());
        Self::with_store(store, config)
    }

    /// Create a quiz over any question store.
    pub fn with_store(store: impl QuestionStore + 'static, config: QuizConfig) -> Self {
        Self {
            app: App::new(store, config),
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        settle(result, terminal::restore())
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

/// Combine the loop outcome with the terminal restore; the loop error wins.
fn settle(result: Result<(), QuizError>, restored: io::Result<()>) -> Result<(), QuizError> {
    result.and(restored.map_err(QuizError::from))
}

fn run_event_loop(terminal: &mut terminal::QuizTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                info!("quit requested");
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    if app.notice().is_some() {
        app.dismiss_notice();
        return false;
    }

    match app.state {
        AppState::Menu => handle_menu_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_menu_input(app: &mut App, key: KeyCode) -> bool {
    let result = match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.menu_next();
            Ok(())
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.menu_previous();
            Ok(())
        }
        KeyCode::Char(' ') => {
            app.menu_toggle();
            Ok(())
        }
        KeyCode::Enter => app.menu_activate(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.on_start_exam(),
        KeyCode::Char('m') | KeyCode::Char('M') => app.on_repeat_marked(),
        KeyCode::Esc => {
            app.menu_close_picker();
            Ok(())
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => Ok(()),
    };
    app.handle_result(result);
    false
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.choose_option(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => app.on_next(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => app.on_previous(),
        KeyCode::Char('m') | KeyCode::Char('M') => {
            let result = app.on_mark_toggle();
            app.handle_result(result);
        }
        KeyCode::Esc => app.back_to_menu(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.on_repeat_wrong(),
        KeyCode::Enter | KeyCode::Esc => app.back_to_menu(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}
