use std::fs;

use quiz_trainer::{
    JsonQuestionStore, Mode, QuestionId, QuestionStore, QuizSession, Selector, draw_exam,
    filter_by_selector,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const BANK: &str = r#"[
    {"category": "Math", "subcategory": "Algebra", "question": "x + 1 = 3, x = ?", "options": ["1", "2", "3"], "correct": "2", "marked": false},
    {"category": "Math", "subcategory": "Geometry", "question": "Angles in a triangle sum to?", "options": ["90 degrees", "180 degrees", "360 degrees"], "correct": "180 degrees", "marked": false},
    {"category": "History", "subcategory": "Rome", "question": "Who crossed the Rubicon?", "options": ["Caesar", "Nero", "Augustus"], "correct": "Caesar", "marked": false},
    {"category": "History", "subcategory": "Greece", "question": "Where were the first Olympics held?", "options": ["Athens", "Olympia", "Sparta"], "correct": "Olympia", "image": "img/olympia.png", "marked": true}
]"#;

fn store() -> (tempfile::TempDir, JsonQuestionStore) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.json");
    fs::write(&path, BANK).unwrap();
    (dir, JsonQuestionStore::new(path))
}

fn pick(session: &mut QuizSession, option: usize) {
    let text = session.current_question().options[option].clone();
    session.submit_answer(text);
}

#[test]
fn practice_over_both_categories() {
    let (_dir, store) = store();
    let questions = filter_by_selector(
        store.load_all().unwrap(),
        &["Math", "History"].into_iter().collect::<Selector>(),
    );
    let mut session = QuizSession::start(questions, Mode::Practice).unwrap();

    pick(&mut session, 1); // correct
    session.advance();
    pick(&mut session, 0); // wrong
    session.advance();
    session.advance(); // unanswered
    pick(&mut session, 1); // correct
    session.advance();

    let report = session.finish();
    let overall = report.overall.unwrap();
    assert_eq!(overall.score, 2);
    assert_eq!(overall.percentage, 50.0);
    assert!(!overall.passed);
    assert_eq!(report.wrong, vec![1, 2]);

    assert!(session.repeat_wrong());
    pick(&mut session, 1);
    session.advance();
    pick(&mut session, 0);
    session.advance();
    let report = session.finish();
    assert!(report.wrong.is_empty());
    assert_eq!(session.score(), 2);
}

#[test]
fn exam_reports_categories_separately() {
    let (_dir, store) = store();
    let mut rng = StdRng::seed_from_u64(11);
    let questions = draw_exam(&store.load_all().unwrap(), 2, &mut rng);
    let mut session = QuizSession::start(questions, Mode::Exam).unwrap();

    // answer every Math question correctly and every History question wrongly
    loop {
        let question = session.current_question().clone();
        let text = if question.category == "Math" {
            question.correct.clone()
        } else {
            question.distractors().next().unwrap().to_string()
        };
        session.submit_answer(text);
        if session.advance() == quiz_trainer::Advance::Finished {
            break;
        }
    }

    let report = session.finish();
    let summary: Vec<_> = report
        .categories
        .iter()
        .map(|c| (c.category.as_str(), c.outcome.score, c.outcome.total, c.outcome.passed))
        .collect();
    assert_eq!(summary, vec![("Math", 2, 2, true), ("History", 0, 2, false)]);
}

#[test]
fn marked_review_and_toggle_round_trip() {
    let (_dir, mut store) = store();
    let before = fs::read(store.path()).unwrap();
    let marked = store.load_marked().unwrap();
    assert_eq!(marked.len(), 1);
    assert_eq!(marked[0].image.as_deref(), Some("img/olympia.png"));

    let id = marked[0].id;
    assert!(!store.toggle_marked(id).unwrap());
    assert!(store.load_marked().unwrap().is_empty());
    assert!(store.toggle_marked(id).unwrap());
    assert_eq!(fs::read(store.path()).unwrap(), before);

    let records = store.load_all().unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[3].image.as_deref(), Some("img/olympia.png"));
}

#[test]
fn toggling_the_bundled_bank_keeps_its_bytes() {
    let shipped = include_str!("../questions/questions.json");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.json");
    fs::write(&path, shipped).unwrap();
    let mut store = JsonQuestionStore::new(&path);

    let records = store.load_all().unwrap();
    let first = QuestionId(0);
    let last = records[records.len() - 1].id;

    assert!(store.toggle_marked(first).unwrap());
    let toggled = fs::read_to_string(&path).unwrap();
    // "false" becomes "true": one byte shorter, everything after shifts by one
    assert_eq!(toggled.len(), shipped.len() - 1);
    assert!(toggled.ends_with("]\n"));
    assert_eq!(
        toggled.find("\"category\": \"Networking\""),
        shipped.find("\"category\": \"Networking\"").map(|at| at - 1)
    );

    let last_question = &records[last.0].question;
    assert_eq!(store.toggle_marked_by_text(last_question).unwrap(), Some(true));
    assert!(!store.toggle_marked(first).unwrap());
    assert!(!store.toggle_marked(last).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), shipped);
}
