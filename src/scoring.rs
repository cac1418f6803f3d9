//! Answer scoring by nearest match.
//!
//! The text a user picks may differ from the stored correct answer by inserted
//! line breaks or spacing, so answers are not compared for equality. A pick is
//! correct when it is strictly closer, in edit distance, to the correct answer
//! than to every other option.

use crate::models::AnswerRecord;

/// Levenshtein distance between `a` and `b`, counted in Unicode scalar values.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Decide whether `selected` counts as the `correct` option among `options`.
///
/// Every option other than `correct` is a distractor. An absent answer is wrong.
pub fn is_correct<S: AsRef<str>>(selected: Option<&str>, correct: &str, options: &[S]) -> bool {
    let Some(selected) = selected else {
        return false;
    };

    let to_correct = edit_distance(selected, correct);
    options
        .iter()
        .map(|option| option.as_ref())
        .filter(|option| *option != correct)
        .all(|distractor| to_correct < edit_distance(selected, distractor))
}

/// Score a stored answer; `None` stands for a question left unanswered.
pub fn score_answer(answer: Option<&AnswerRecord>) -> bool {
    answer.is_some_and(|a| is_correct(Some(a.selected.as_str()), &a.correct, a.options.as_slice()))
}
