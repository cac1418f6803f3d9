use rand::Rng;
use rand::seq::index;
use tracing::debug;

use crate::data::categories;
use crate::models::QuestionRecord;

/// Build an exam: up to `per_category` questions from every category, drawn
/// uniformly without replacement. Categories keep their first-appearance order.
pub fn draw_exam<R: Rng + ?Sized>(
    records: &[QuestionRecord],
    per_category: usize,
    rng: &mut R,
) -> Vec<QuestionRecord> {
    let mut exam = Vec::new();

    for category in categories(records) {
        let pool: Vec<&QuestionRecord> = records.iter().filter(|r| r.category == category).collect();
        let amount = per_category.min(pool.len());
        if amount < per_category {
            debug!(%category, available = pool.len(), requested = per_category, "category pool smaller than exam size");
        }
        exam.extend(
            index::sample(rng, pool.len(), amount)
                .into_iter()
                .map(|i| pool[i].clone()),
        );
    }

    exam
}
