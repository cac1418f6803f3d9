use tracing::{debug, warn};

use crate::QuizError;
use crate::config::QuizConfig;
use crate::data::{QuestionStore, Selector, categories, filter_by_selector, subcategories};
use crate::models::{AppState, QuestionRecord};
use crate::session::{Advance, Mode, QuizReport, QuizSession, draw_exam};
use crate::text::add_line_breaks;

/// A dialog shown on top of the current screen until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    StoreUnavailable(String),
    NoMarkedQuestions,
    Error(String),
}

/// Category picker shown on the menu screen.
#[derive(Debug, Default)]
pub struct MenuState {
    categories: Vec<String>,
    subcategories: Vec<String>,
    cursor: usize,
    picking_subcategories: bool,
    sub_cursor: usize,
    chosen: Selector,
}

impl MenuState {
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn subcategories(&self) -> &[String] {
        &self.subcategories
    }

    /// Highlighted row; `categories().len()` is the "choose subcategories" row.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_picking_subcategories(&self) -> bool {
        self.picking_subcategories
    }

    pub fn sub_cursor(&self) -> usize {
        self.sub_cursor
    }

    pub fn chosen(&self) -> &Selector {
        &self.chosen
    }

    fn rows(&self) -> usize {
        self.categories.len() + 1
    }
}

/// Application controller: receives Display events and owns the run state.
pub struct App {
    pub state: AppState,
    config: QuizConfig,
    store: Box<dyn QuestionStore>,
    menu: MenuState,
    session: Option<QuizSession>,
    report: Option<QuizReport>,
    notice: Option<Notice>,
    selected_option: usize,
    result_scroll: usize,
}

impl App {
    pub fn new(store: impl QuestionStore + 'static, config: QuizConfig) -> Self {
        let mut app = Self {
            state: AppState::Menu,
            config,
            store: Box::new(store),
            menu: MenuState::default(),
            session: None,
            report: None,
            notice: None,
            selected_option: 0,
            result_scroll: 0,
        };
        let result = app.refresh_menu();
        app.handle_result(result);
        app
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn report(&self) -> Option<&QuizReport> {
        self.report.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Turn an operation failure into what the user sees.
    ///
    /// An empty selection is ignored; everything else becomes a dialog.
    pub fn handle_result(&mut self, result: Result<(), QuizError>) {
        let Err(err) = result else {
            return;
        };
        self.notice = match err {
            QuizError::EmptySelection => {
                debug!("nothing selected, staying put");
                None
            }
            QuizError::NoMarkedQuestions => Some(Notice::NoMarkedQuestions),
            QuizError::StoreUnavailable(source) => {
                warn!(error = %source, "question bank unavailable");
                Some(Notice::StoreUnavailable(source.to_string()))
            }
            other => {
                warn!(error = %other, "operation failed");
                Some(Notice::Error(other.to_string()))
            }
        };
    }

    /// Reload category names from the store.
    pub fn refresh_menu(&mut self) -> Result<(), QuizError> {
        let records = self.store.load_all().map_err(QuizError::StoreUnavailable)?;
        self.menu.categories = categories(&records);
        self.menu.subcategories = subcategories(&records);
        self.menu.cursor = self.menu.cursor.min(self.menu.categories.len());
        self.menu.sub_cursor = self
            .menu
            .sub_cursor
            .min(self.menu.subcategories.len().saturating_sub(1));
        Ok(())
    }

    // Display events

    pub fn on_start_practice(&mut self, selector: &Selector) -> Result<(), QuizError> {
        if selector.is_empty() {
            return Err(QuizError::EmptySelection);
        }
        let records = self.store.load_all().map_err(QuizError::StoreUnavailable)?;
        let questions = filter_by_selector(records, selector);
        self.begin(questions, Mode::Practice)
    }

    pub fn on_start_exam(&mut self) -> Result<(), QuizError> {
        let records = self.store.load_all().map_err(QuizError::StoreUnavailable)?;
        let questions = draw_exam(
            &records,
            self.config.exam_questions_per_category,
            &mut rand::rng(),
        );
        self.begin(questions, Mode::Exam)
    }

    pub fn on_repeat_marked(&mut self) -> Result<(), QuizError> {
        let questions = self.store.load_marked().map_err(QuizError::StoreUnavailable)?;
        if questions.is_empty() {
            return Err(QuizError::NoMarkedQuestions);
        }
        self.begin(questions, Mode::Review)
    }

    pub fn on_option_selected(&mut self, text: &str) {
        if let Some(session) = self.session.as_mut() {
            session.submit_answer(text);
        }
    }

    pub fn on_next(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.advance() {
            Advance::Moved(_) => self.sync_option_cursor(),
            Advance::Finished => {
                self.report = Some(session.finish());
                self.result_scroll = 0;
                self.state = AppState::Result;
            }
        }
    }

    pub fn on_previous(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if session.retreat() {
                self.sync_option_cursor();
            }
        }
    }

    pub fn on_mark_toggle(&mut self) -> Result<(), QuizError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let id = session.current_question().id;
        let marked = self.store.toggle_marked(id).map_err(QuizError::Store)?;
        session.set_marked(session.current_index(), marked);
        Ok(())
    }

    pub fn on_repeat_wrong(&mut self) {
        let can_repeat = self.report.as_ref().is_some_and(QuizReport::can_repeat_wrong);
        if !can_repeat {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            if session.repeat_wrong() {
                self.report = None;
                self.selected_option = 0;
                self.state = AppState::Quiz;
            }
        }
    }

    pub fn back_to_menu(&mut self) {
        self.session = None;
        self.report = None;
        self.selected_option = 0;
        self.result_scroll = 0;
        self.state = AppState::Menu;
        let result = self.refresh_menu();
        self.handle_result(result);
    }

    // Quiz screen helpers

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.session.as_ref().map(QuizSession::current_question)
    }

    /// Answer options as displayed, with line breaks inserted.
    pub fn displayed_options(&self) -> Vec<String> {
        self.current_question()
            .map(|q| {
                q.options
                    .iter()
                    .map(|option| add_line_breaks(option, self.config.wrap_width))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Index of the displayed option holding the stored answer, if any.
    pub fn chosen_option(&self) -> Option<usize> {
        let answer = self.session.as_ref()?.current_answer()?;
        self.displayed_options()
            .iter()
            .position(|option| *option == answer.selected)
    }

    pub fn select_next_option(&mut self) {
        let count = self.displayed_options().len().max(1);
        self.selected_option = (self.selected_option + 1) % count;
    }

    pub fn select_previous_option(&mut self) {
        let count = self.displayed_options().len().max(1);
        self.selected_option = (self.selected_option + count - 1) % count;
    }

    /// Emit the highlighted option's displayed text as the answer.
    pub fn choose_option(&mut self) {
        if let Some(text) = self.displayed_options().get(self.selected_option).cloned() {
            self.on_option_selected(&text);
        }
    }

    // Menu helpers

    pub fn menu_next(&mut self) {
        if self.menu.picking_subcategories {
            let count = self.menu.subcategories.len().max(1);
            self.menu.sub_cursor = (self.menu.sub_cursor + 1) % count;
        } else {
            self.menu.cursor = (self.menu.cursor + 1) % self.menu.rows();
        }
    }

    pub fn menu_previous(&mut self) {
        if self.menu.picking_subcategories {
            let count = self.menu.subcategories.len().max(1);
            self.menu.sub_cursor = (self.menu.sub_cursor + count - 1) % count;
        } else {
            let rows = self.menu.rows();
            self.menu.cursor = (self.menu.cursor + rows - 1) % rows;
        }
    }

    /// Toggle the highlighted subcategory while picking subcategories.
    pub fn menu_toggle(&mut self) {
        if !self.menu.picking_subcategories {
            return;
        }
        if let Some(name) = self.menu.subcategories.get(self.menu.sub_cursor).cloned() {
            self.menu.chosen.toggle(&name);
        }
    }

    /// Start practice on the highlighted category, or open/confirm the subcategory picker.
    pub fn menu_activate(&mut self) -> Result<(), QuizError> {
        if self.menu.picking_subcategories {
            let selector = self.menu.chosen.clone();
            return self.on_start_practice(&selector);
        }
        match self.menu.categories.get(self.menu.cursor).cloned() {
            Some(category) => self.on_start_practice(&Selector::single(category)),
            None => {
                self.menu.picking_subcategories = true;
                Ok(())
            }
        }
    }

    pub fn menu_close_picker(&mut self) {
        self.menu.picking_subcategories = false;
    }

    pub fn scroll_results_down(&mut self) {
        self.result_scroll = self.result_scroll.saturating_add(1);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    fn begin(&mut self, questions: Vec<QuestionRecord>, mode: Mode) -> Result<(), QuizError> {
        let session =
            QuizSession::start(questions, mode)?.with_pass_threshold(self.config.pass_threshold);
        self.session = Some(session);
        self.report = None;
        self.notice = None;
        self.selected_option = 0;
        self.state = AppState::Quiz;
        Ok(())
    }

    fn sync_option_cursor(&mut self) {
        self.selected_option = self.chosen_option().unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::JsonQuestionStore;
    use serde_json::json;
    use std::fs;

    fn write_bank(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("questions.json");
        let bank = json!([
            {"category":"Math","subcategory":"Algebra","question":"2 + 2?","options":["3","4","5"],"correct":"4","marked":false},
            {"category":"Math","subcategory":"Geometry","question":"Sides of a triangle?","options":["3","4"],"correct":"3","marked":true},
            {"category":"History","subcategory":"Rome","question":"Founded in?","options":["753 BC","1066 AD"],"correct":"753 BC","marked":false},
            {"category":"History","subcategory":"Greece","question":"Capital of Greece?","options":["Sparta","Athens with a rather long description that needs wrapping"],"correct":"Athens with a rather long description that needs wrapping","marked":false}
        ]);
        fs::write(&path, serde_json::to_string_pretty(&bank).unwrap()).unwrap();
        path
    }

    fn app(dir: &tempfile::TempDir) -> App {
        let config = QuizConfig {
            questions: write_bank(dir),
            wrap_width: 20,
            ..QuizConfig::default()
        };
        App::new(JsonQuestionStore::new(config.questions.clone()), config)
    }

    #[test]
    fn test_menu_lists_categories() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);
        assert_eq!(app.menu().categories(), ["Math", "History"]);
        assert_eq!(app.menu().subcategories().len(), 4);
        assert_eq!(app.state, AppState::Menu);
        assert!(app.notice().is_none());
    }

    #[test]
    fn test_missing_store_shows_dialog() {
        let app = App::new(JsonQuestionStore::new("/nonexistent/q.json"), QuizConfig::default());
        assert!(matches!(app.notice(), Some(Notice::StoreUnavailable(_))));
        assert_eq!(app.state, AppState::Menu);
    }

    #[test]
    fn test_empty_selection_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        let result = app.on_start_practice(&Selector::default());
        app.handle_result(result);
        assert!(app.notice().is_none());
        assert_eq!(app.state, AppState::Menu);
    }

    #[test]
    fn test_practice_run_to_result() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.on_start_practice(&Selector::single("History")).unwrap();
        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.session().unwrap().total(), 2);

        app.choose_option();
        app.on_next();
        // the long correct option is displayed wrapped and still scores
        app.select_next_option();
        app.choose_option();
        assert!(app.session().unwrap().current_answer().unwrap().selected.contains('\n'));
        app.on_next();

        assert_eq!(app.state, AppState::Result);
        let overall = app.report().unwrap().overall.unwrap();
        assert_eq!(overall.score, 2);
        assert!(overall.passed);
    }

    #[test]
    fn test_previous_restores_chosen_option() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.on_start_practice(&Selector::single("Math")).unwrap();
        app.select_next_option();
        app.choose_option();
        app.on_next();
        assert_eq!(app.selected_option(), 0);
        app.on_previous();
        assert_eq!(app.selected_option(), 1);
        assert_eq!(app.chosen_option(), Some(1));
    }

    #[test]
    fn test_repeat_wrong_from_result() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.on_start_practice(&Selector::single("Math")).unwrap();
        app.on_next();
        app.on_next();
        assert!(app.report().unwrap().can_repeat_wrong());

        app.on_repeat_wrong();
        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.session().unwrap().total(), 2);
    }

    #[test]
    fn test_repeat_marked_and_toggle() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.on_repeat_marked().unwrap();
        assert_eq!(app.session().unwrap().mode(), Mode::Review);
        assert_eq!(app.current_question().unwrap().question, "Sides of a triangle?");

        app.on_mark_toggle().unwrap();
        assert!(!app.current_question().unwrap().marked);
        app.back_to_menu();

        let result = app.on_repeat_marked();
        app.handle_result(result);
        assert_eq!(app.notice(), Some(&Notice::NoMarkedQuestions));
        assert_eq!(app.state, AppState::Menu);
    }

    #[test]
    fn test_exam_draws_one_per_category() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.on_start_exam().unwrap();
        let session = app.session().unwrap();
        assert_eq!(session.mode(), Mode::Exam);
        assert_eq!(session.total(), 2);
        assert_eq!(session.questions()[0].category, "Math");
        assert_eq!(session.questions()[1].category, "History");
    }

    #[test]
    fn test_subcategory_picker() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.menu_previous();
        assert_eq!(app.menu().cursor(), 2);
        app.menu_activate().unwrap();
        assert!(app.menu().is_picking_subcategories());

        // nothing chosen yet
        assert!(matches!(app.menu_activate(), Err(QuizError::EmptySelection)));

        app.menu_next();
        app.menu_toggle();
        assert!(app.menu().chosen().contains("Geometry"));
        app.menu_activate().unwrap();
        assert_eq!(app.session().unwrap().total(), 1);
    }

    #[test]
    fn test_mark_toggle_failure_keeps_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.on_start_practice(&Selector::single("Math")).unwrap();
        fs::remove_file(dir.path().join("questions.json")).unwrap();

        let result = app.on_mark_toggle();
        app.handle_result(result);
        assert!(matches!(app.notice(), Some(Notice::Error(_))));
        assert_eq!(app.state, AppState::Quiz);
        assert!(app.session().is_some());
    }
}
