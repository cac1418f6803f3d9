//! Question bank persistence and selection.

mod filter;
mod loader;
mod store;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::QuestionId;

pub use filter::{Selector, categories, filter_by_selector, subcategories};
pub use store::{JsonQuestionStore, QuestionStore};

/// Errors raised while reading or writing the question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("question file {} not found", .path.display())]
    NotFound { path: PathBuf },
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("question {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
    #[error("question {0} does not exist")]
    UnknownQuestion(QuestionId),
}
