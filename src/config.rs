//! Runtime configuration.
//!
//! Values come from the defaults below, optionally overridden by a TOML file,
//! and finally by command line flags applied in `main`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::DEFAULT_PASS_THRESHOLD;

pub const DEFAULT_QUESTIONS_PATH: &str = "questions/questions.json";
pub const DEFAULT_EXAM_QUESTIONS_PER_CATEGORY: usize = 1;
pub const DEFAULT_WRAP_WIDTH: usize = 140;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// JSON file holding the question bank.
    pub questions: PathBuf,
    /// Questions drawn from each category for an exam.
    pub exam_questions_per_category: usize,
    /// Percentage needed to pass.
    pub pass_threshold: f64,
    /// Maximum line width for displayed answer options.
    pub wrap_width: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions: PathBuf::from(DEFAULT_QUESTIONS_PATH),
            exam_questions_per_category: DEFAULT_EXAM_QUESTIONS_PER_CATEGORY,
            pass_threshold: DEFAULT_PASS_THRESHOLD,
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

impl QuizConfig {
    /// Load a config file. Keys it leaves out keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exam_questions_per_category == 0 {
            return Err(ConfigError::Invalid(
                "exam_questions_per_category must be at least 1".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.pass_threshold) {
            return Err(ConfigError::Invalid(format!(
                "pass_threshold must be between 0 and 100, got {}",
                self.pass_threshold
            )));
        }
        if self.wrap_width == 0 {
            return Err(ConfigError::Invalid("wrap_width must be positive".to_string()));
        }
        Ok(())
    }
}
